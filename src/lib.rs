// Library crate for the Wordle results tracker
// This file exposes the public API for integration tests

pub mod announcement;
pub mod app;
pub mod config;
pub mod results;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use announcement::{parse, validate, Extraction, ParsedMessage, PlayerResult, Score};
pub use app::build_router;
pub use config::Config;
pub use results::{
    identity::{HandleResolver, PlayerIdentityResolver},
    repository::{InMemoryResultRepository, PostgresResultRepository, ResultRepository},
    IngestService,
};
pub use shared::{AppError, AppState};
