use std::sync::LazyLock;

static STREAK_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)([0-9]+)\s+day\s+streak").expect("valid streak regex")
});

/// Tried in order; the first pattern matching anywhere wins.
static PUZZLE_NUMBER_RES: LazyLock<[regex::Regex; 3]> = LazyLock::new(|| {
    [
        regex::Regex::new(r"(?i)Wordle\s+([0-9]+)").expect("valid labelled puzzle regex"),
        regex::Regex::new(r"#([0-9]+)").expect("valid hash puzzle regex"),
        regex::Regex::new(r"(?i)puzzle\s+([0-9]+)").expect("valid puzzle word regex"),
    ]
});

fn first_number(re: &regex::Regex, message: &str) -> Option<u64> {
    re.captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// `"95 day streak"` → `95`. Only the first occurrence counts.
pub fn extract_streak(message: &str) -> Option<u64> {
    first_number(&STREAK_RE, message)
}

pub fn extract_puzzle_number(message: &str) -> Option<u64> {
    PUZZLE_NUMBER_RES
        .iter()
        .find(|re| re.is_match(message))
        .and_then(|re| first_number(re, message))
}
