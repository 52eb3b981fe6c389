use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::InboundMessage;
use super::service::IngestOutcome;
use crate::announcement::EmptyReason;

/// A chat message forwarded by the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnouncementRequest {
    pub author_id: u64,
    pub channel_id: u64,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    /// Platform id to display name for members mentioned in `content`.
    #[serde(default)]
    pub members: HashMap<String, String>,
}

impl From<AnnouncementRequest> for InboundMessage {
    fn from(request: AnnouncementRequest) -> Self {
        Self {
            content: request.content,
            received_at: request.sent_at,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BackfillRequest {
    pub messages: Vec<AnnouncementRequest>,
    /// Member directory applied before any message is replayed.
    #[serde(default)]
    pub members: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestResponse {
    /// Not from the watched bot and channel.
    Ignored,
    Skipped {
        reason: EmptyReason,
    },
    Rejected {
        reason: String,
    },
    Stored {
        date: String,
        saved: usize,
        duplicates: usize,
        streak: Option<u64>,
        puzzle_number: Option<u64>,
    },
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        match outcome {
            IngestOutcome::Skipped(reason) => IngestResponse::Skipped { reason },
            IngestOutcome::Rejected(err) => IngestResponse::Rejected {
                reason: err.to_string(),
            },
            IngestOutcome::Stored {
                date,
                saved,
                duplicates,
                streak,
                puzzle_number,
            } => IngestResponse::Stored {
                date,
                saved,
                duplicates,
                streak,
                puzzle_number,
            },
        }
    }
}

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;
pub const DEFAULT_RECENT_DAYS: u32 = 7;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HeadToHeadQuery {
    pub player1: String,
    pub player2: String,
}
