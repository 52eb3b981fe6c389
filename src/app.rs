use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::results;
use crate::shared::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the HTTP surface over the shared state.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/announcements", post(results::ingest_announcement))
        .route(
            "/announcements/backfill",
            post(results::backfill_announcements),
        )
        .route("/leaderboard", get(results::leaderboard))
        .route("/players", get(results::list_players))
        .route("/players/:name/stats", get(results::player_stats))
        .route("/averages", get(results::player_averages))
        .route("/recent", get(results::recent_results))
        .route("/head-to-head", get(results::head_to_head))
        .route("/streak", get(results::streak_info))
        .route("/lucky", get(results::lucky_players))
        .route("/weekdays", get(results::weekday_winners))
        .route("/summary", get(results::store_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
