use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// "llm" or "fallback"; tells operators whether an API key was picked up.
    pub scorer_backend: &'static str,
    pub policy_industries: usize,
}

/// GET /health
/// Liveness plus the scoring setup this process started with. Never touches the catalog.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        service: "ats-api",
        scorer_backend: state.rubric.backend(),
        policy_industries: state.scoring.policy.industries.len(),
    })
}
