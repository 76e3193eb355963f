use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything is optional; unset values fall back to local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Absent ⇒ the fallback rubric backend is used for every request.
    pub anthropic_api_key: Option<String>,
    /// Messages endpoint override, e.g. a corporate proxy.
    pub anthropic_api_url: Option<String>,
    pub rubric_timeout_secs: u64,
    /// Present ⇒ the job catalog lives in PostgreSQL.
    pub database_url: Option<String>,
    /// JSON array seeding the in-memory catalog.
    pub jobs_path: Option<PathBuf>,
    pub scoring_config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: optional_env("ANTHROPIC_API_URL"),
            rubric_timeout_secs: parse_env("RUBRIC_TIMEOUT_SECS", 30)?,
            database_url: optional_env("DATABASE_URL"),
            jobs_path: optional_env("JOBS_PATH").map(PathBuf::from),
            scoring_config_path: optional_env("SCORING_CONFIG_PATH").map(PathBuf::from),
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
