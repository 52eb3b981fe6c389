use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordle_tally::{
    build_router, AppState, Config, HandleResolver, InMemoryResultRepository,
    PostgresResultRepository, ResultRepository,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordle_tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Wordle results tracker");

    let config = Config::from_env()?;

    let result_repository: Arc<dyn ResultRepository> = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = sqlx::PgPool::connect(database_url).await?;
            Arc::new(PostgresResultRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, results are kept in memory only");
            Arc::new(InMemoryResultRepository::new())
        }
    };
    result_repository.init().await?;

    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(result_repository, Arc::new(HandleResolver::new()), config);
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
