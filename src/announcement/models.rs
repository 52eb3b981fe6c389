use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph the announcing bot puts in front of the day's best line.
pub const WINNER_MARKER: char = '👑';

/// Literal every score token ends with.
pub const SCORE_SUFFIX: &str = "/6";

/// Stored value for an unsolved puzzle (`X/6`).
pub const FAIL_SCORE: u8 = 7;

/// Guess count for one player, or the fail sentinel.
///
/// Digits are kept as written so that unexpected tokens such as `0/6`
/// reach the validator instead of being dropped here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const FAIL: Score = Score(FAIL_SCORE);

    pub fn new(value: u8) -> Self {
        Self(value)
    }

    /// Maps the character in front of `/6` to a score. `X` is a failed solve.
    pub fn from_token(token: char) -> Option<Self> {
        match token {
            'X' => Some(Self::FAIL),
            c => c.to_digit(10).map(|d| Self(d as u8)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_fail(self) -> bool {
        self.0 == FAIL_SCORE
    }

    /// Within `1..=7`, the range the store accepts.
    pub fn is_plausible(self) -> bool {
        (1..=FAIL_SCORE).contains(&self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fail() {
            write!(f, "X{}", SCORE_SUFFIX)
        } else {
            write!(f, "{}{}", self.0, SCORE_SUFFIX)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_name: String,
    pub score: Score,
    pub is_winner: bool,
}

impl PlayerResult {
    pub fn new(player_name: impl Into<String>, score: Score, is_winner: bool) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            is_winner,
        }
    }
}

impl fmt::Display for PlayerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_winner {
            write!(f, "{}", WINNER_MARKER)?;
        }
        write!(f, "{}: {}", self.player_name, self.score)
    }
}

/// Everything pulled out of one announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub results: Vec<PlayerResult>,
    pub streak: Option<u64>,
    pub puzzle_number: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Neither "streak" nor "results" appears; unrelated chatter.
    NotAnAnnouncement,
    /// Looked like an announcement but no segment produced a result.
    NoParsableSegments,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NotAnAnnouncement => write!(f, "not a results announcement"),
            EmptyReason::NoParsableSegments => write!(f, "no parsable score segments"),
        }
    }
}

/// Outcome of [`parse`](super::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Empty(EmptyReason),
    Parsed(ParsedMessage),
}

impl Extraction {
    pub fn parsed(&self) -> Option<&ParsedMessage> {
        match self {
            Extraction::Parsed(message) => Some(message),
            Extraction::Empty(_) => None,
        }
    }

    pub fn into_parsed(self) -> Option<ParsedMessage> {
        match self {
            Extraction::Parsed(message) => Some(message),
            Extraction::Empty(_) => None,
        }
    }

    /// Results in order of appearance; empty for [`Extraction::Empty`].
    pub fn results(&self) -> &[PlayerResult] {
        self.parsed().map(|m| m.results.as_slice()).unwrap_or(&[])
    }
}
