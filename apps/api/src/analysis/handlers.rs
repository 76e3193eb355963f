//! Axum route handlers for JD parsing and improvement suggestions.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::improve::{suggest_improvements, ImprovementReport};
use crate::analysis::jd_parser::parse_jd;
use crate::analysis::resume_parser::parse_resume_text;
use crate::errors::AppError;
use crate::models::jd::ParsedJD;
use crate::models::resume::ParsedResume;

/// Uses the caller's parsed résumé when given, otherwise extracts one from text.
pub(crate) fn resolve_resume(
    resume: Option<ParsedResume>,
    resume_text: Option<&str>,
) -> Result<ParsedResume, AppError> {
    if let Some(resume) = resume {
        return Ok(resume);
    }
    match resume_text.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(parse_resume_text(text, None)),
        _ => Err(AppError::Validation(
            "resume_text or resume is required".to_string(),
        )),
    }
}

/// A parsed JD wins over raw text; blank text means no JD.
pub(crate) fn resolve_jd(jd: Option<ParsedJD>, jd_text: Option<&str>) -> Option<ParsedJD> {
    jd.or_else(|| {
        jd_text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(parse_jd)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJdResponse {
    pub parsed_jd: ParsedJD,
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    pub resume_text: Option<String>,
    pub resume: Option<ParsedResume>,
    pub jd_text: Option<String>,
    pub jd: Option<ParsedJD>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jd/parse
pub async fn handle_parse_jd(
    Json(request): Json<ParseJdRequest>,
) -> Result<Json<ParseJdResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    Ok(Json(ParseJdResponse {
        parsed_jd: parse_jd(&request.jd_text),
    }))
}

/// POST /api/v1/improve
///
/// Suggestions for a résumé, targeted at a JD when one is supplied and
/// against a common keyword list otherwise.
pub async fn handle_improve(
    Json(request): Json<ImproveRequest>,
) -> Result<Json<ImprovementReport>, AppError> {
    let resume = resolve_resume(request.resume, request.resume_text.as_deref())?;
    let jd = resolve_jd(request.jd, request.jd_text.as_deref());

    Ok(Json(suggest_improvements(
        &resume,
        jd.as_ref(),
        request.jd_text.as_deref(),
    )))
}
