mod analysis;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod recommend;
mod routes;
mod scoring;
mod state;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::LlmClient;
use crate::recommend::catalog::{InMemoryJobCatalog, JobCatalog, PgJobCatalog};
use crate::routes::build_router;
use crate::scoring::rubric::{FallbackRubricScorer, LlmRubricScorer, RubricScorer};
use crate::scoring::settings::ScoringConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Scoring tables: a bad file stops the process here
    let scoring = ScoringConfig::load(config.scoring_config_path.as_deref())?;
    info!(
        "Scoring config ready: {} industries, {} ladder rungs",
        scoring.policy.industries.len(),
        scoring.degree_ladder.rungs.len()
    );

    let catalog = build_catalog(&config).await?;
    let rubric = build_rubric_scorer(&config)?;

    let state = AppState {
        catalog,
        rubric,
        scoring: Arc::new(scoring),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL when DATABASE_URL is set; otherwise in-memory, optionally seeded from JOBS_PATH.
async fn build_catalog(config: &Config) -> Result<Arc<dyn JobCatalog>> {
    if let Some(database_url) = &config.database_url {
        let pool = create_pool(database_url).await?;
        ensure_schema(&pool).await?;
        return Ok(Arc::new(PgJobCatalog::new(pool)));
    }

    let catalog = match &config.jobs_path {
        Some(path) => InMemoryJobCatalog::from_file(path)?,
        None => InMemoryJobCatalog::default(),
    };
    info!("Using in-memory job catalog");
    Ok(Arc::new(catalog))
}

fn build_rubric_scorer(config: &Config) -> Result<Arc<dyn RubricScorer>> {
    let Some(api_key) = &config.anthropic_api_key else {
        warn!("ANTHROPIC_API_KEY not set; every score uses the fallback rubric");
        return Ok(Arc::new(FallbackRubricScorer));
    };

    let timeout = Duration::from_secs(config.rubric_timeout_secs);
    let llm = match &config.anthropic_api_url {
        Some(url) => LlmClient::with_api_url(api_key.clone(), timeout, url.as_str())?,
        None => LlmClient::new(api_key.clone(), timeout)?,
    };
    info!(
        "LLM rubric scorer initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        timeout
    );
    Ok(Arc::new(LlmRubricScorer::new(llm, timeout)))
}
