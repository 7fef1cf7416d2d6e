//! Database pool and migrations

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const MIN_CONNECTIONS: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Create the PostgreSQL pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("invalid database URL")?
        .application_name("fitness-tracker");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(MIN_CONNECTIONS.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .context("failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool created");
    Ok(pool)
}

/// Apply embedded migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Round-trip a trivial query
pub async fn ping(pool: &PgPool) -> bool {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    }
}
