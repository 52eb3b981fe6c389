// Public API
pub use date::{date_for, result_date, DATE_FORMAT};
pub use extractor::{is_announcement, parse};
pub use metadata::{extract_puzzle_number, extract_streak};
pub use models::{
    EmptyReason, Extraction, ParsedMessage, PlayerResult, Score, FAIL_SCORE, SCORE_SUFFIX,
    WINNER_MARKER,
};
pub use score_line::{clean_player_name, parse_score_line};
pub use tokenizer::{split_inline, split_lines};
pub use validator::{validate, ValidationError};

// Internal modules
mod date;
mod extractor;
mod metadata;
mod models;
mod score_line;
mod tokenizer;
mod validator;
