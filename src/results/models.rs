use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

use crate::announcement::{PlayerResult, FAIL_SCORE};

/// One result ready to be written, identity already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResult {
    pub date: String,
    pub player_name: String,
    pub player_id: Option<String>,
    pub score: i32,
    pub is_winner: bool,
    pub streak_day: i32,
    pub puzzle_number: Option<i32>,
}

impl NewResult {
    pub fn from_parsed(
        result: &PlayerResult,
        date: &str,
        player_name: String,
        player_id: Option<String>,
        streak: Option<u64>,
        puzzle_number: Option<u64>,
    ) -> Self {
        Self {
            date: date.to_string(),
            player_name,
            player_id,
            score: i32::from(result.score.value()),
            is_winner: result.is_winner,
            streak_day: streak.map(clamp_to_column).unwrap_or(0),
            puzzle_number: puzzle_number.map(clamp_to_column),
        }
    }
}

/// Store columns are `INTEGER`; larger counts are pinned to `i32::MAX`.
fn clamp_to_column(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Database model for the results table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub date: String,             // YYYY-MM-DD, the day the puzzle was played
    pub puzzle_number: Option<i32>,
    pub player_name: String,
    pub player_id: Option<String>, // platform id when the mention was numeric
    pub score: i32,               // 1-6, or 7 for X/6
    pub is_winner: bool,
    pub streak_day: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub wins: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PlayerAverage {
    pub player_name: String,
    /// Mean of solved games; `None` when every game was a fail.
    pub avg_score: Option<f64>,
    pub game_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PlayerGames {
    pub player_name: String,
    pub games: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct LuckyPlayer {
    pub player_name: String,
    pub lucky_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayWinner {
    pub weekday: String,
    pub player_name: String,
    pub wins: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current_streak: i32,
    pub best_streak: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub total_results: i64,
    pub unique_players: i64,
    pub days_tracked: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_name: String,
    pub total_games: i64,
    pub total_wins: i64,
    pub win_rate: f64,
    pub avg_score: Option<f64>,
    pub fail_count: i64,
    pub fail_rate: f64,
    pub score_distribution: BTreeMap<i32, i64>,
    /// Best solved score; `None` if the player never solved.
    pub best_score: Option<i32>,
}

impl PlayerStats {
    /// Builds stats from `(score, is_winner)` pairs. Returns `None` for a
    /// player with no games.
    pub fn from_games(player_name: &str, games: &[(i32, bool)]) -> Option<Self> {
        if games.is_empty() {
            return None;
        }

        let total_games = games.len() as i64;
        let total_wins = games.iter().filter(|(_, won)| *won).count() as i64;
        let fail_count = games
            .iter()
            .filter(|(score, _)| *score == i32::from(FAIL_SCORE))
            .count() as i64;

        let solved: Vec<i32> = games
            .iter()
            .map(|(score, _)| *score)
            .filter(|score| *score < i32::from(FAIL_SCORE))
            .collect();
        let avg_score = (!solved.is_empty()).then(|| {
            round2(solved.iter().map(|s| f64::from(*s)).sum::<f64>() / solved.len() as f64)
        });

        let mut score_distribution = BTreeMap::new();
        for (score, _) in games {
            *score_distribution.entry(*score).or_insert(0) += 1;
        }

        Some(Self {
            player_name: player_name.to_string(),
            total_games,
            total_wins,
            win_rate: percentage(total_wins, total_games),
            avg_score,
            fail_count,
            fail_rate: percentage(fail_count, total_games),
            score_distribution,
            best_score: solved.iter().min().copied(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub player1: String,
    pub player2: String,
    pub p1_stats: PlayerStats,
    pub p2_stats: PlayerStats,
    pub matchups: i64,
    pub p1_wins: i64,
    pub p2_wins: i64,
    pub ties: i64,
}

impl HeadToHead {
    /// Tallies days both played; the lower score takes the day.
    pub fn tally(
        p1_stats: PlayerStats,
        p2_stats: PlayerStats,
        shared_days: &[(i32, i32)],
    ) -> Self {
        let p1_wins = shared_days.iter().filter(|(a, b)| a < b).count() as i64;
        let p2_wins = shared_days.iter().filter(|(a, b)| b < a).count() as i64;
        let ties = shared_days.iter().filter(|(a, b)| a == b).count() as i64;

        Self {
            player1: p1_stats.player_name.clone(),
            player2: p2_stats.player_name.clone(),
            p1_stats,
            p2_stats,
            matchups: shared_days.len() as i64,
            p1_wins,
            p2_wins,
            ties,
        }
    }
}

/// A message handed in for backfill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub content: String,
    pub received_at: DateTime<Utc>,
}

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::Score;

    #[test]
    fn test_player_stats_from_games() {
        let games = vec![(3, true), (4, false), (7, false), (3, false)];
        let stats = PlayerStats::from_games("alice", &games).unwrap();

        assert_eq!(stats.total_games, 4);
        assert_eq!(stats.total_wins, 1);
        assert_eq!(stats.win_rate, 25.0);
        assert_eq!(stats.avg_score, Some(3.33));
        assert_eq!(stats.fail_count, 1);
        assert_eq!(stats.fail_rate, 25.0);
        assert_eq!(stats.best_score, Some(3));
        assert_eq!(stats.score_distribution.get(&3), Some(&2));
        assert_eq!(stats.score_distribution.get(&7), Some(&1));
    }

    #[test]
    fn test_player_stats_only_fails() {
        let stats = PlayerStats::from_games("bob", &[(7, false), (7, false)]).unwrap();
        assert_eq!(stats.avg_score, None);
        assert_eq!(stats.best_score, None);
        assert_eq!(stats.fail_rate, 100.0);
    }

    #[test]
    fn test_player_stats_no_games() {
        assert!(PlayerStats::from_games("nobody", &[]).is_none());
    }

    #[test]
    fn test_head_to_head_tally() {
        let a = PlayerStats::from_games("a", &[(3, true)]).unwrap();
        let b = PlayerStats::from_games("b", &[(4, false)]).unwrap();

        let h2h = HeadToHead::tally(a, b, &[(3, 4), (5, 2), (4, 4), (2, 7)]);
        assert_eq!(h2h.player1, "a");
        assert_eq!(h2h.player2, "b");
        assert_eq!(h2h.matchups, 4);
        assert_eq!(h2h.p1_wins, 2);
        assert_eq!(h2h.p2_wins, 1);
        assert_eq!(h2h.ties, 1);
    }

    #[test]
    fn test_new_result_defaults_streak_to_zero() {
        let parsed = PlayerResult::new("alice", Score::FAIL, false);
        let row = NewResult::from_parsed(&parsed, "2024-03-14", "alice".into(), None, None, None);

        assert_eq!(row.score, 7);
        assert_eq!(row.streak_day, 0);
        assert_eq!(row.puzzle_number, None);
    }

    #[test]
    fn test_new_result_clamps_large_counters() {
        let parsed = PlayerResult::new("alice", Score::new(3), true);
        let row = NewResult::from_parsed(
            &parsed,
            "2024-03-14",
            "alice".into(),
            None,
            Some(5_000_000_000),
            Some(1234),
        );

        assert_eq!(row.streak_day, i32::MAX);
        assert_eq!(row.puzzle_number, Some(1234));
    }
}
