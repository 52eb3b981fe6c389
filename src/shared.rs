use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::results::{identity::PlayerIdentityResolver, repository::ResultRepository};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub result_repository: Arc<dyn ResultRepository>,
    pub identity_resolver: Arc<dyn PlayerIdentityResolver>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        result_repository: Arc<dyn ResultRepository>,
        identity_resolver: Arc<dyn PlayerIdentityResolver>,
        config: Config,
    ) -> Self {
        Self {
            result_repository,
            identity_resolver,
            config: Arc::new(config),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
