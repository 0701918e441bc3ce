//! PostgreSQL pool, embedded migrations and the readiness query

use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

const APPLICATION_NAME: &str = "nutrition-planner";
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connect to `database_url` with at most `max_connections` connections
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(database_url)?.application_name(APPLICATION_NAME);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;

    info!(max_connections, "Database pool created");
    Ok(pool)
}

/// Apply the migrations embedded from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrator = sqlx::migrate!("./migrations");
    migrator.run(pool).await?;
    info!(
        applied = migrator.iter().count(),
        "Database migrations completed"
    );
    Ok(())
}

/// Round-trip a trivial query; used by the readiness probe
pub async fn health_check(pool: &PgPool) -> Result<()> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %e, "Database health check failed");
        return Err(e.into());
    }
    Ok(())
}
