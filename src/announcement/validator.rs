use thiserror::Error;

use super::models::PlayerResult;
use super::score_line::clean_player_name;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("announcement produced no results")]
    EmptyBatch,

    #[error("no result carries a score between 1 and 7")]
    NoPlausibleScore,

    #[error("result {index} has an empty player name")]
    EmptyPlayerName { index: usize },
}

/// Accepts or rejects a whole batch. Nothing is repaired and no subset is
/// ever accepted on its own.
pub fn validate(results: &[PlayerResult]) -> Result<(), ValidationError> {
    if results.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }

    if !results.iter().any(|r| r.score.is_plausible()) {
        return Err(ValidationError::NoPlausibleScore);
    }

    if let Some(index) = results
        .iter()
        .position(|r| clean_player_name(&r.player_name).is_empty())
    {
        return Err(ValidationError::EmptyPlayerName { index });
    }

    Ok(())
}
