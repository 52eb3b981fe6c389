use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    identity::PlayerIdentityResolver,
    models::{InboundMessage, NewResult},
    repository::ResultRepository,
};
use crate::announcement::{self, EmptyReason, Extraction, ValidationError, SCORE_SUFFIX};
use crate::shared::AppError;

/// What happened to one announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Nothing to store.
    Skipped(EmptyReason),
    /// Parsed, but the batch failed validation; nothing was written.
    Rejected(ValidationError),
    Stored {
        date: String,
        saved: usize,
        duplicates: usize,
        streak: Option<u64>,
        puzzle_number: Option<u64>,
    },
}

impl IngestOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, IngestOutcome::Stored { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackfillReport {
    pub processed: usize,
    pub saved: usize,
    pub duplicates: usize,
    pub parse_errors: usize,
}

/// Runs announcements through extraction, validation, identity resolution
/// and the store.
pub struct IngestService {
    repository: Arc<dyn ResultRepository>,
    resolver: Arc<dyn PlayerIdentityResolver>,
}

impl IngestService {
    pub fn new(
        repository: Arc<dyn ResultRepository>,
        resolver: Arc<dyn PlayerIdentityResolver>,
    ) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// Ingests one announcement received at `received_at`. Results are dated
    /// the day before.
    ///
    /// The whole message is parsed and validated before the first write.
    #[instrument(skip(self, content), fields(content_length = content.len()))]
    pub async fn ingest(
        &self,
        content: &str,
        received_at: DateTime<Utc>,
    ) -> Result<IngestOutcome, AppError> {
        let parsed = match announcement::parse(content) {
            Extraction::Parsed(parsed) => parsed,
            Extraction::Empty(reason) => {
                debug!(%reason, "Nothing to ingest");
                return Ok(IngestOutcome::Skipped(reason));
            }
        };

        if let Err(err) = announcement::validate(&parsed.results) {
            warn!(error = %err, "Rejected parsed announcement");
            return Ok(IngestOutcome::Rejected(err));
        }

        let date = announcement::result_date(received_at);
        info!(
            %date,
            result_count = parsed.results.len(),
            streak = ?parsed.streak,
            puzzle_number = ?parsed.puzzle_number,
            "Parsed announcement"
        );

        let mut saved = 0;
        let mut duplicates = 0;
        for result in &parsed.results {
            let player = self.resolver.resolve(&result.player_name).await;
            let row = NewResult::from_parsed(
                result,
                &date,
                player.display_name,
                player.player_id,
                parsed.streak,
                parsed.puzzle_number,
            );

            if self.repository.save_result(&row).await? {
                saved += 1;
                debug!(player_name = %row.player_name, player_id = ?row.player_id, "Saved result");
            } else {
                duplicates += 1;
                debug!(player_name = %row.player_name, "Duplicate result");
            }
        }

        info!(%date, saved, duplicates, "Announcement stored");

        Ok(IngestOutcome::Stored {
            date,
            saved,
            duplicates,
            streak: parsed.streak,
            puzzle_number: parsed.puzzle_number,
        })
    }

    /// Ingests historical announcements in order. A message that was not
    /// stored counts as a parse error only if it looks like a result.
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    pub async fn backfill(&self, messages: &[InboundMessage]) -> Result<BackfillReport, AppError> {
        let mut report = BackfillReport::default();

        for message in messages {
            report.processed += 1;

            match self.ingest(&message.content, message.received_at).await? {
                IngestOutcome::Stored {
                    saved, duplicates, ..
                } => {
                    report.saved += saved;
                    report.duplicates += duplicates;
                }
                _ if message.content.contains(SCORE_SUFFIX) => report.parse_errors += 1,
                _ => {}
            }
        }

        info!(
            processed = report.processed,
            saved = report.saved,
            duplicates = report.duplicates,
            parse_errors = report.parse_errors,
            "Backfill complete"
        );

        Ok(report)
    }
}
