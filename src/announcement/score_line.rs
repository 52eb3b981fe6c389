use std::sync::LazyLock;

use super::models::{PlayerResult, Score, WINNER_MARKER};
use super::tokenizer::SCORE_TOKEN_RE;

/// `@` followed by word characters and dots.
static MENTION_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"@([\w.]+)").expect("valid mention regex"));

/// Strips whitespace and the leading mention marker.
pub fn clean_player_name(name: &str) -> &str {
    name.trim().trim_start_matches('@')
}

/// Turns one segment into results.
///
/// Every mention in the segment shares the segment's score and winner flag,
/// which is how tied players on one line are represented. A segment without
/// a score token yields nothing.
pub fn parse_score_line(segment: &str) -> Vec<PlayerResult> {
    let is_winner = segment.contains(WINNER_MARKER);

    let Some(score) = SCORE_TOKEN_RE
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .and_then(|token| token.as_str().chars().next())
        .and_then(Score::from_token)
    else {
        return Vec::new();
    };

    MENTION_RE
        .captures_iter(segment)
        .filter_map(|caps| caps.get(1))
        .map(|name| PlayerResult::new(clean_player_name(name.as_str()), score, is_winner))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1/6: @p", 1, false)]
    #[case("2/6: @p", 2, false)]
    #[case("3/6: @p", 3, false)]
    #[case("👑 4/6: @p", 4, true)]
    #[case("👑5/6: @p", 5, true)]
    #[case("👑 6/6: @p", 6, true)]
    #[case("X/6: @p", 7, false)]
    fn test_single_mention(#[case] segment: &str, #[case] score: u8, #[case] winner: bool) {
        let results = parse_score_line(segment);
        assert_eq!(results, vec![PlayerResult::new("p", Score::new(score), winner)]);
    }

    #[test]
    fn test_tied_mentions_share_score_and_flag() {
        let results = parse_score_line("👑 3/6: @Soham_c.7 @kashyapwho");
        assert_eq!(
            results,
            vec![
                PlayerResult::new("Soham_c.7", Score::new(3), true),
                PlayerResult::new("kashyapwho", Score::new(3), true),
            ]
        );
    }

    #[test]
    fn test_mentions_before_score_are_captured() {
        let results = parse_score_line("@early 4/6: @late");
        let names: Vec<&str> = results.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, vec!["early", "late"]);
        assert!(results.iter().all(|r| r.score == Score::new(4)));
    }

    #[test]
    fn test_out_of_range_digit_passes_through() {
        let results = parse_score_line("0/6: @p");
        assert_eq!(results[0].score, Score::new(0));
    }

    #[test]
    fn test_segment_without_score_or_mentions() {
        assert!(parse_score_line("@p did not play").is_empty());
        assert!(parse_score_line("x/6: @p").is_empty()); // lowercase x is not a fail
        assert!(parse_score_line("4/6:").is_empty());
    }

    #[test]
    fn test_clean_player_name() {
        assert_eq!(clean_player_name("  @username "), "username");
        assert_eq!(clean_player_name("plain"), "plain");
    }
}
