use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use super::{
    models::{
        HeadToHead, InboundMessage, LeaderboardEntry, LuckyPlayer, PlayerAverage, PlayerGames,
        PlayerStats, ResultRecord, StoreSummary, StreakInfo, WeekdayWinner,
    },
    service::{BackfillReport, IngestService},
    types::{
        AnnouncementRequest, BackfillRequest, HeadToHeadQuery, IngestResponse, LeaderboardQuery,
        RecentQuery, DEFAULT_LEADERBOARD_LIMIT, DEFAULT_RECENT_DAYS,
    },
};
use crate::announcement::clean_player_name;
use crate::shared::{AppError, AppState};

fn ingest_service(state: &AppState) -> IngestService {
    IngestService::new(
        state.result_repository.clone(),
        state.identity_resolver.clone(),
    )
}

/// Accepts `@name` as well as `name`.
fn player_param(raw: &str) -> Result<String, AppError> {
    let name = clean_player_name(raw);
    if name.is_empty() {
        return Err(AppError::BadRequest("player name is required".to_string()));
    }
    Ok(name.to_string())
}

async fn register_members(state: &AppState, members: &HashMap<String, String>) {
    for (player_id, display_name) in members {
        state
            .identity_resolver
            .register(player_id, display_name)
            .await;
    }
    if !members.is_empty() {
        debug!(member_count = members.len(), "Registered member names");
    }
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = state.config.admin_token.as_deref() else {
        return Ok(());
    };

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if provided == Some(expected) {
        Ok(())
    } else {
        warn!("Backfill attempted without a valid admin token");
        Err(AppError::Unauthorized("admin token required".to_string()))
    }
}

/// HTTP handler for an incoming chat message
///
/// POST /announcements
/// Messages not posted by the Wordle bot in the watched channel are ignored.
#[instrument(name = "ingest_announcement", skip(state, request), fields(author_id = request.author_id, channel_id = request.channel_id))]
pub async fn ingest_announcement(
    State(state): State<AppState>,
    Json(request): Json<AnnouncementRequest>,
) -> Result<Json<IngestResponse>, AppError> {
    if !state
        .config
        .is_announcement_source(request.author_id, request.channel_id)
    {
        debug!("Ignoring message from another author or channel");
        return Ok(Json(IngestResponse::Ignored));
    }

    register_members(&state, &request.members).await;
    let outcome = ingest_service(&state)
        .ingest(&request.content, request.sent_at)
        .await?;

    info!(stored = outcome.is_stored(), "Announcement handled");
    Ok(Json(outcome.into()))
}

/// HTTP handler for replaying channel history
///
/// POST /announcements/backfill
/// Requires `Authorization: Bearer <ADMIN_TOKEN>` when a token is configured.
#[instrument(name = "backfill_announcements", skip(state, headers, request))]
pub async fn backfill_announcements(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BackfillRequest>,
) -> Result<Json<BackfillReport>, AppError> {
    require_admin(&state, &headers)?;
    register_members(&state, &request.members).await;

    let mut messages: Vec<InboundMessage> = Vec::with_capacity(request.messages.len());
    for message in request.messages {
        if !state
            .config
            .is_announcement_source(message.author_id, message.channel_id)
        {
            continue;
        }
        register_members(&state, &message.members).await;
        messages.push(message.into());
    }

    info!(message_count = messages.len(), "Starting backfill");
    let report = ingest_service(&state).backfill(&messages).await?;

    Ok(Json(report))
}

/// GET /leaderboard?limit=N
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    let entries = state.result_repository.leaderboard(limit).await?;
    Ok(Json(entries))
}

/// GET /players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerGames>>, AppError> {
    Ok(Json(state.result_repository.players().await?))
}

/// GET /players/:name/stats
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerStats>, AppError> {
    let name = player_param(&name)?;
    state
        .result_repository
        .player_stats(&name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No stats found for {}", name)))
}

/// GET /averages
#[instrument(name = "player_averages", skip(state))]
pub async fn player_averages(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerAverage>>, AppError> {
    Ok(Json(state.result_repository.player_averages().await?))
}

/// GET /recent?days=N
#[instrument(name = "recent_results", skip(state))]
pub async fn recent_results(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<ResultRecord>>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_RECENT_DAYS);
    Ok(Json(state.result_repository.recent_results(days).await?))
}

/// GET /head-to-head?player1=a&player2=b
#[instrument(name = "head_to_head", skip(state))]
pub async fn head_to_head(
    State(state): State<AppState>,
    Query(query): Query<HeadToHeadQuery>,
) -> Result<Json<HeadToHead>, AppError> {
    let player1 = player_param(&query.player1)?;
    let player2 = player_param(&query.player2)?;

    state
        .result_repository
        .head_to_head(&player1, &player2)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Need results for both {} and {}",
                player1, player2
            ))
        })
}

/// GET /streak
#[instrument(name = "streak_info", skip(state))]
pub async fn streak_info(State(state): State<AppState>) -> Result<Json<StreakInfo>, AppError> {
    Ok(Json(state.result_repository.streak_info().await?))
}

/// GET /lucky
#[instrument(name = "lucky_players", skip(state))]
pub async fn lucky_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<LuckyPlayer>>, AppError> {
    Ok(Json(state.result_repository.lucky_players().await?))
}

/// GET /weekdays
#[instrument(name = "weekday_winners", skip(state))]
pub async fn weekday_winners(
    State(state): State<AppState>,
) -> Result<Json<Vec<WeekdayWinner>>, AppError> {
    Ok(Json(state.result_repository.weekday_winners().await?))
}

/// GET /summary
#[instrument(name = "store_summary", skip(state))]
pub async fn store_summary(
    State(state): State<AppState>,
) -> Result<Json<StoreSummary>, AppError> {
    Ok(Json(state.result_repository.summary().await?))
}
