//! Postgres pool setup, migrations and liveness

use std::time::Instant;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;
use crate::config::DatabaseConfig;
use crate::utils::errors::Result;

pub type DatabasePool = Pool<Postgres>;

/// Pool options derived from the `database` settings section
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
}

/// Connect and verify the pool answers a query
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool> {
    let started = Instant::now();
    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!(
        max_connections = config.max_connections,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Database pool ready"
    );
    Ok(pool)
}

/// Apply pending migrations from `migrations/`
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
