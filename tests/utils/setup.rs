use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use wordle_tally::{
    build_router, AppState, Config, HandleResolver, InMemoryResultRepository,
    PlayerIdentityResolver, ResultRepository,
};

pub const CHANNEL_ID: u64 = 1001;
pub const BOT_ID: u64 = 2002;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub repository: Arc<InMemoryResultRepository>,
    pub admin_token: Option<String>,
}

pub struct TestSetupBuilder {
    admin_token: Option<String>,
    known_ids: Vec<(String, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            admin_token: None,
            known_ids: vec![],
        }
    }

    pub fn with_admin_token(mut self, token: &str) -> Self {
        self.admin_token = Some(token.to_string());
        self
    }

    pub fn with_known_id(mut self, player_id: &str, display_name: &str) -> Self {
        self.known_ids
            .push((player_id.to_string(), display_name.to_string()));
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryResultRepository::new());
        repository.init().await.unwrap();

        let resolver = Arc::new(HandleResolver::new());
        for (player_id, display_name) in &self.known_ids {
            resolver.register(player_id.as_str(), display_name.as_str()).await;
        }

        let config = Config {
            database_url: None,
            wordle_channel_id: CHANNEL_ID,
            wordle_bot_id: BOT_ID,
            bind_addr: "127.0.0.1:0".to_string(),
            admin_token: self.admin_token.clone(),
        };

        let app_state = AppState::new(repository.clone(), resolver, config);

        TestSetup {
            app: build_router(app_state),
            repository,
            admin_token: self.admin_token,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn bot_message(content: &str, sent_at: &str) -> Value {
    json!({
        "author_id": BOT_ID,
        "channel_id": CHANNEL_ID,
        "content": content,
        "sent_at": sent_at,
    })
}

impl TestSetup {
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = &self.admin_token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = request.body(Body::from(body.to_string())).unwrap();

        self.send(request).await
    }

    pub async fn get<T: DeserializeOwned>(&self, uri: &str) -> (StatusCode, T) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn announce(&self, content: &str, sent_at: &str) -> Value {
        let (status, body) = self
            .post("/announcements", bot_message(content, sent_at))
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
        body
    }

    async fn send<T: DeserializeOwned>(&self, request: Request<Body>) -> (StatusCode, T) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }
}
