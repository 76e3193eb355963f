//! Rubric scoring: pluggable, trait-based evaluator of holistic résumé quality.
//!
//! `LlmRubricScorer` asks the remote model for four integer subscores.
//! `FallbackRubricScorer` computes a deterministic substitute locally.
//!
//! The composer makes exactly one remote attempt and converts any failure into
//! the fallback. Nothing in here retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::{parse_json_text, LlmClient, LlmError};
use crate::models::jd::ParsedJD;
use crate::models::resume::ParsedResume;
use crate::scoring::coverage::skills_coverage;
use crate::scoring::prompts::{build_rubric_prompt, rubric_system};
use crate::scoring::rounding::round_half_even;

pub const FALLBACK_WARNING: &str = "Fallback due to LLM/validation error";
pub const FALLBACK_OVERALL: u32 = 70;
pub const FALLBACK_FORMATTING: u32 = 80;
pub const FALLBACK_GRAMMAR: u32 = 78;

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("rubric call timed out after {0:?}")]
    Timeout(Duration),

    #[error("rubric response violates schema: {0}")]
    Schema(String),
}

/// Validated rubric subscores, each in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricScore {
    pub overall: u32,
    pub keywords: u32,
    pub formatting: u32,
    pub grammar: u32,
    pub job_role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Wire shape of the model's answer, before range checks.
#[derive(Debug, Deserialize)]
struct RubricPayload {
    overall: i64,
    keywords: i64,
    formatting: i64,
    grammar: i64,
    job_role: String,
}

impl TryFrom<RubricPayload> for RubricScore {
    type Error = RubricError;

    fn try_from(payload: RubricPayload) -> Result<Self, Self::Error> {
        Ok(RubricScore {
            overall: check_range("overall", payload.overall)?,
            keywords: check_range("keywords", payload.keywords)?,
            formatting: check_range("formatting", payload.formatting)?,
            grammar: check_range("grammar", payload.grammar)?,
            job_role: payload.job_role,
            warning: None,
        })
    }
}

fn check_range(field: &str, value: i64) -> Result<u32, RubricError> {
    if (0..=100).contains(&value) {
        Ok(value as u32)
    } else {
        Err(RubricError::Schema(format!(
            "{field} = {value} is outside [0, 100]"
        )))
    }
}

/// Parses and validates raw model output against the rubric schema.
pub fn parse_rubric_response(text: &str) -> Result<RubricScore, RubricError> {
    let payload: RubricPayload = parse_json_text(text).map_err(|e| match e {
        LlmError::Parse(err) => RubricError::Schema(err.to_string()),
        other => RubricError::Llm(other),
    })?;
    RubricScore::try_from(payload)
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The rubric scorer trait. Carried in `AppState` as `Arc<dyn RubricScorer>`.
#[async_trait]
pub trait RubricScorer: Send + Sync {
    async fn evaluate(
        &self,
        resume: &ParsedResume,
        job_role: &str,
        jd: Option<&ParsedJD>,
    ) -> Result<RubricScore, RubricError>;

    /// "llm" or "fallback"; surfaced as `scorer_backend`.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmRubricScorer: remote evaluation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmRubricScorer {
    llm: LlmClient,
    timeout: Duration,
}

impl LlmRubricScorer {
    pub fn new(llm: LlmClient, timeout: Duration) -> Self {
        Self { llm, timeout }
    }
}

#[async_trait]
impl RubricScorer for LlmRubricScorer {
    async fn evaluate(
        &self,
        resume: &ParsedResume,
        job_role: &str,
        jd: Option<&ParsedJD>,
    ) -> Result<RubricScore, RubricError> {
        let resume_json = serde_json::to_string(resume).unwrap_or_default();
        let jd_json = jd
            .and_then(|j| serde_json::to_string(j).ok())
            .unwrap_or_else(|| "{}".to_string());
        let prompt = build_rubric_prompt(&resume_json, job_role, &jd_json);
        let system = rubric_system();

        let response = tokio::time::timeout(self.timeout, self.llm.call(&prompt, &system))
            .await
            .map_err(|_| RubricError::Timeout(self.timeout))??;

        let text = response.text().ok_or(LlmError::EmptyContent)?;
        parse_rubric_response(text)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackRubricScorer: local, deterministic substitute
// ────────────────────────────────────────────────────────────────────────────

/// Cheap local scorer: fixed overall/formatting/grammar, keywords from skill coverage.
pub struct FallbackRubricScorer;

impl FallbackRubricScorer {
    pub fn score(&self, resume: &ParsedResume, job_role: &str, jd: Option<&ParsedJD>) -> RubricScore {
        let jd_skills: &[String] = jd.map(|j| j.must_have_skills.as_slice()).unwrap_or(&[]);
        let coverage = skills_coverage(&resume.skill_set(), jd_skills).coverage;
        RubricScore {
            overall: FALLBACK_OVERALL,
            keywords: round_half_even(coverage * 100.0),
            formatting: FALLBACK_FORMATTING,
            grammar: FALLBACK_GRAMMAR,
            job_role: job_role.to_string(),
            warning: Some(FALLBACK_WARNING.to_string()),
        }
    }
}

#[async_trait]
impl RubricScorer for FallbackRubricScorer {
    async fn evaluate(
        &self,
        resume: &ParsedResume,
        job_role: &str,
        jd: Option<&ParsedJD>,
    ) -> Result<RubricScore, RubricError> {
        Ok(self.score(resume, job_role, jd))
    }

    fn backend(&self) -> &'static str {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_response_parses() {
        let score = parse_rubric_response(
            r#"{"overall": 82, "keywords": 75, "formatting": 90, "grammar": 88, "job_role": "SWE"}"#,
        )
        .unwrap();
        assert_eq!(score.overall, 82);
        assert_eq!(score.job_role, "SWE");
        assert!(score.warning.is_none());
    }

    #[test]
    fn test_fenced_response_parses() {
        let text = "```json\n{\"overall\": 1, \"keywords\": 2, \"formatting\": 3, \"grammar\": 4, \"job_role\": \"x\"}\n```";
        assert_eq!(parse_rubric_response(text).unwrap().grammar, 4);
    }

    #[test]
    fn test_out_of_range_is_schema_error() {
        let result = parse_rubric_response(
            r#"{"overall": 120, "keywords": 75, "formatting": 90, "grammar": 88, "job_role": "SWE"}"#,
        );
        assert!(matches!(result, Err(RubricError::Schema(_))));

        let result = parse_rubric_response(
            r#"{"overall": 80, "keywords": -1, "formatting": 90, "grammar": 88, "job_role": "SWE"}"#,
        );
        assert!(matches!(result, Err(RubricError::Schema(_))));
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let result = parse_rubric_response(r#"{"overall": 80, "keywords": 70, "formatting": 90}"#);
        assert!(matches!(result, Err(RubricError::Schema(_))));
    }

    #[test]
    fn test_non_json_is_schema_error() {
        let result = parse_rubric_response("I think this resume is great!");
        assert!(matches!(result, Err(RubricError::Schema(_))));
    }

    #[test]
    fn test_fallback_uses_skill_coverage_for_keywords() {
        let resume = ParsedResume {
            skills: vec!["Python".into(), "SQL".into()],
            ..Default::default()
        };
        let jd = ParsedJD {
            must_have_skills: vec!["python".into(), "sql".into(), "docker".into()],
            ..Default::default()
        };
        let score = FallbackRubricScorer.score(&resume, "Data Analyst", Some(&jd));
        assert_eq!(score.overall, 70);
        assert_eq!(score.keywords, 67);
        assert_eq!(score.formatting, 80);
        assert_eq!(score.grammar, 78);
        assert_eq!(score.job_role, "Data Analyst");
        assert_eq!(score.warning.as_deref(), Some(FALLBACK_WARNING));
    }

    #[test]
    fn test_fallback_without_jd_uses_neutral_coverage() {
        let score = FallbackRubricScorer.score(&ParsedResume::default(), "SWE", None);
        assert_eq!(score.keywords, 60);
    }

    /// Accepts connections and holds them open without ever replying.
    async fn silent_endpoint() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}/v1/messages")
    }

    async fn stalled_scorer() -> LlmRubricScorer {
        let url = silent_endpoint().await;
        let llm = LlmClient::with_api_url("test-key".to_string(), Duration::from_secs(10), url).unwrap();
        LlmRubricScorer::new(llm, Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_unresponsive_endpoint_times_out() {
        let scorer = stalled_scorer().await;
        let result = scorer.evaluate(&ParsedResume::default(), "SWE", None).await;
        assert!(matches!(result, Err(RubricError::Timeout(d)) if d == Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_fallback_score() {
        use crate::scoring::composer::score;
        use crate::scoring::settings::ScoringConfig;

        let scorer = stalled_scorer().await;
        let result = score(&ScoringConfig::default(), &scorer, &ParsedResume::default(), "SWE", None).await;
        assert_eq!(result.scorer_backend, "fallback");
        assert_eq!(result.warning.as_deref(), Some(FALLBACK_WARNING));
        assert_eq!(result.rubric_overall, FALLBACK_OVERALL);
    }

    #[tokio::test]
    async fn test_fallback_trait_never_fails() {
        let scorer: &dyn RubricScorer = &FallbackRubricScorer;
        let score = scorer.evaluate(&ParsedResume::default(), "SWE", None).await;
        assert!(score.is_ok());
        assert_eq!(scorer.backend(), "fallback");
    }
}
