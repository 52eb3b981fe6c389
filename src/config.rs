use thiserror::Error;

/// User id of the public Wordle bot that posts the daily summary.
pub const DEFAULT_WORDLE_BOT_ID: u64 = 903698786472009758;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidId { name: &'static str, value: String },
}

/// Process configuration, read once from the environment at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Postgres connection string; without it results are kept in memory.
    pub database_url: Option<String>,
    pub wordle_channel_id: u64,
    pub wordle_bot_id: u64,
    pub bind_addr: String,
    /// Bearer token guarding the backfill route. Unset leaves it open.
    pub admin_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let wordle_channel_id = match non_empty("WORDLE_CHANNEL_ID") {
            Some(value) => parse_id("WORDLE_CHANNEL_ID", value)?,
            None => return Err(ConfigError::Missing("WORDLE_CHANNEL_ID")),
        };

        let wordle_bot_id = match non_empty("WORDLE_BOT_ID") {
            Some(value) => parse_id("WORDLE_BOT_ID", value)?,
            None => DEFAULT_WORDLE_BOT_ID,
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            wordle_channel_id,
            wordle_bot_id,
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            admin_token: non_empty("ADMIN_TOKEN"),
        })
    }

    /// Only the Wordle bot posting in the watched channel is ingested.
    pub fn is_announcement_source(&self, author_id: u64, channel_id: u64) -> bool {
        author_id == self.wordle_bot_id && channel_id == self.wordle_channel_id
    }
}

fn parse_id(name: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ConfigError::InvalidId { name, value }),
    }
}
