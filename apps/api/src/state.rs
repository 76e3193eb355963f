use std::sync::Arc;

use crate::recommend::catalog::JobCatalog;
use crate::scoring::rubric::RubricScorer;
use crate::scoring::settings::ScoringConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Job postings. PostgreSQL when DATABASE_URL is set, in-memory otherwise.
    pub catalog: Arc<dyn JobCatalog>,
    /// Pluggable rubric scorer. LlmRubricScorer when an API key is configured.
    pub rubric: Arc<dyn RubricScorer>,
    /// Policy table, degree ladder and blend weights; validated at startup.
    pub scoring: Arc<ScoringConfig>,
}
