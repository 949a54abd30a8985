//! BandVote server
//!
//! Main application entry point

use std::net::SocketAddr;
use std::time::Duration;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, error};

use bandvote::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    router::{create_router, AppState},
    services::ServiceFactory,
    utils::logging,
};

const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load and validate configuration once, before anything else runs
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", bandvote::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&db_pool).await.context("Failed to run database migrations")?;

    let database_service = DatabaseService::new(db_pool);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(
        &settings,
        database_service.event_store(),
        database_service.vote_store(),
        database_service.photo_store(),
    );

    let state = AppState::new(&settings, services);

    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter.cleanup_old_entries();
        }
    });

    let app = create_router(state);

    let addr = settings.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {}", addr))?;
    info!("API server listening on {}", addr);

    // Peer addresses identify voters when proxy headers are not trusted
    let service = app.into_make_service_with_connect_info::<SocketAddr>();
    if let Err(e) = axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Axum server failed");
        return Err(e.into());
    }

    info!("BandVote has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
