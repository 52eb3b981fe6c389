use tracing::debug;

use super::metadata::{extract_puzzle_number, extract_streak};
use super::models::{EmptyReason, Extraction, ParsedMessage, PlayerResult, SCORE_SUFFIX};
use super::score_line::parse_score_line;
use super::tokenizer::{split_inline, split_lines};

/// Words one of which every results announcement contains.
const ANNOUNCEMENT_KEYWORDS: [&str; 2] = ["streak", "results"];

pub fn is_announcement(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ANNOUNCEMENT_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

fn parse_segments(segments: Vec<&str>) -> Vec<PlayerResult> {
    segments.into_iter().flat_map(parse_score_line).collect()
}

/// Line strategy first, single-line strategy if that produced nothing.
fn extract_results(message: &str) -> Vec<PlayerResult> {
    let results = parse_segments(split_lines(message));
    if !results.is_empty() || !message.contains(SCORE_SUFFIX) {
        return results;
    }

    debug!("Line strategy found no results, retrying as single line");
    parse_segments(split_inline(message))
}

/// Parses a full announcement. Never fails; an unusable message comes back
/// as [`Extraction::Empty`] with the reason.
pub fn parse(message: &str) -> Extraction {
    if !is_announcement(message) {
        return Extraction::Empty(EmptyReason::NotAnAnnouncement);
    }

    let streak = extract_streak(message);
    let puzzle_number = extract_puzzle_number(message);
    let results = extract_results(message);

    if results.is_empty() {
        debug!(?streak, ?puzzle_number, "Announcement contained no parsable segments");
        return Extraction::Empty(EmptyReason::NoParsableSegments);
    }

    debug!(
        result_count = results.len(),
        ?streak,
        ?puzzle_number,
        "Parsed announcement"
    );

    Extraction::Parsed(ParsedMessage {
        results,
        streak,
        puzzle_number,
    })
}
