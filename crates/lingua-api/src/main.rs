//! Lingua API server entry point.

use std::sync::Arc;

use lingua_api::config::AppConfig;
use lingua_api::error::AppError;
use lingua_api::state::AppState;
use lingua_content::ScenarioCatalog;
use lingua_core::clock::SystemClock;
use lingua_core::repository::EventRepository;
use lingua_event_store::{InMemoryEventRepository, MIGRATOR, PgEventRepository};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Lingua API server");

    let config = AppConfig::from_env()?;
    let options = config.validation_options();

    let (catalog, report) = match &config.scenario_dir {
        Some(dir) => ScenarioCatalog::load_dir(dir, &options)
            .map_err(|e| AppError::Config(format!("SCENARIO_DIR unusable: {e}")))?,
        None => ScenarioCatalog::bundled(&options),
    };
    tracing::info!(
        loaded = report.loaded.len(),
        rejected = report.rejected.len(),
        "scenario catalog ready"
    );

    let event_repository: Arc<dyn EventRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;
            MIGRATOR.run(&pool).await?;
            Arc::new(PgEventRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; progress records are kept in memory");
            Arc::new(InMemoryEventRepository::new())
        }
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        event_repository,
        Arc::new(catalog),
        config.xp_policy(),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = lingua_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
