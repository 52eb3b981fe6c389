// Public API - what other modules can use
pub use handlers::{
    backfill_announcements, head_to_head, ingest_announcement, leaderboard, list_players,
    lucky_players, player_averages, player_stats, recent_results, store_summary, streak_info,
    weekday_winners,
};
pub use service::{BackfillReport, IngestOutcome, IngestService};
pub use types::{AnnouncementRequest, BackfillRequest, IngestResponse};

// Internal modules
mod handlers;
pub mod identity;
pub mod models;
pub mod repository;
pub mod service;
mod types;
