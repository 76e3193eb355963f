//! Axum route handlers for the Scoring API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::handlers::{resolve_jd, resolve_resume};
use crate::analysis::resume_parser::parse_resume_file;
use crate::errors::AppError;
use crate::models::jd::ParsedJD;
use crate::models::resume::ParsedResume;
use crate::models::score::ScoreResult;
use crate::scoring::composer;
use crate::state::AppState;

/// Upload cap for résumé files.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub job_role: String,
    pub resume_text: Option<String>,
    pub resume: Option<ParsedResume>,
    pub jd_text: Option<String>,
    pub jd: Option<ParsedJD>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub parsed_resume: ParsedResume,
    pub parsed_jd: Option<ParsedJD>,
    pub score: ScoreResult,
    pub using_jd: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/score
///
/// Scores résumé text (or a pre-parsed résumé) for a role, optionally against a JD.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let job_role = require_job_role(&request.job_role)?;
    let resume = resolve_resume(request.resume, request.resume_text.as_deref())?;
    let jd = resolve_jd(request.jd, request.jd_text.as_deref());

    Ok(Json(score_response(&state, resume, job_role, jd).await))
}

/// POST /api/v1/score/upload
///
/// Multipart form: `resume` (pdf or txt file), `job_role`, optional `jd_text`.
pub async fn handle_score_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut job_role = String::new();
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some((file_name, data.to_vec()));
            }
            "job_role" => job_role = field.text().await.map_err(multipart_error)?,
            "jd_text" => jd_text = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if file_name.trim().is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(
            "File too large (max 5MB)".to_string(),
        ));
    }
    let job_role = require_job_role(&job_role)?.to_string();

    // pdf parsing is CPU-bound and may panic on malformed input
    let resume = tokio::task::spawn_blocking(move || parse_resume_file(&file_name, &data))
        .await
        .map_err(|e| AppError::UnprocessableEntity(format!("Failed to read resume: {e}")))??;
    let jd = resolve_jd(None, jd_text.as_deref());

    Ok(Json(score_response(&state, resume, &job_role, jd).await))
}

fn require_job_role(job_role: &str) -> Result<&str, AppError> {
    let job_role = job_role.trim();
    if job_role.is_empty() {
        return Err(AppError::Validation("Job role is required".to_string()));
    }
    Ok(job_role)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large (max 5MB)".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

async fn score_response(
    state: &AppState,
    resume: ParsedResume,
    job_role: &str,
    jd: Option<ParsedJD>,
) -> ScoreResponse {
    let score = composer::score(
        &state.scoring,
        state.rubric.as_ref(),
        &resume,
        job_role,
        jd.as_ref(),
    )
    .await;

    info!(
        "Scored resume for '{job_role}': overall {} via {} (jd: {})",
        score.overall,
        score.scorer_backend,
        jd.is_some()
    );

    ScoreResponse {
        using_jd: jd.is_some(),
        parsed_resume: resume,
        parsed_jd: jd,
        score,
    }
}
