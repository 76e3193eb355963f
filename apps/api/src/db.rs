use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

const JOBS_SCHEMA: &str = include_str!("../migrations/0001_create_jobs.sql");

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `jobs` table if it does not exist yet. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    pool.execute(JOBS_SCHEMA).await?;
    info!("Job catalog schema ready");
    Ok(())
}
