use std::sync::LazyLock;

use super::models::SCORE_SUFFIX;

/// A score token: one digit or `X` directly followed by `/6`.
pub(super) static SCORE_TOKEN_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"([X0-9])/6").expect("valid score token regex"));

/// Where a single-line segment starts: optional crown, whitespace, score and colon.
static SEGMENT_START_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"👑?\s*[X0-9]/6:").expect("valid segment start regex"));

/// Line strategy for multi-line announcements.
///
/// Keeps every line mentioning `/6`. A line carrying several score tokens is
/// itself a single-line layout and is cut at each marker after the first,
/// so mentions ahead of the first marker stay with its segment.
pub fn split_lines(message: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for line in message.split('\n').filter(|line| line.contains(SCORE_SUFFIX)) {
        let inline = if SCORE_TOKEN_RE.find_iter(line).nth(1).is_some() {
            let mut cuts = segment_starts(line);
            if let Some(first) = cuts.first_mut() {
                *first = 0;
            }
            cut_at(line, cuts)
        } else {
            Vec::new()
        };

        if inline.is_empty() {
            segments.push(line);
        } else {
            segments.extend(inline);
        }
    }
    segments
}

/// Single-line strategy: cut in front of every score marker so that
/// `"4/6: @a 5/6: @b"` becomes `["4/6: @a", " 5/6: @b"]`.
///
/// A crown directly in front of a marker stays with that marker's segment.
pub fn split_inline(message: &str) -> Vec<&str> {
    cut_at(message, segment_starts(message))
}

fn segment_starts(text: &str) -> Vec<usize> {
    SEGMENT_START_RE.find_iter(text).map(|m| m.start()).collect()
}

/// Slices `text` at `cuts` (ascending) and keeps the pieces holding a score.
fn cut_at(text: &str, mut cuts: Vec<usize>) -> Vec<&str> {
    cuts.push(text.len());

    let mut segments = Vec::with_capacity(cuts.len());
    let mut start = 0;
    for cut in cuts {
        if cut > start {
            segments.push(&text[start..cut]);
        }
        start = cut;
    }

    segments
        .into_iter()
        .filter(|segment| segment.contains(SCORE_SUFFIX))
        .collect()
}
