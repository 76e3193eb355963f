//! Axum route handlers for job recommendations and the job catalog.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::resume_parser::parse_resume_text;
use crate::errors::AppError;
use crate::models::job::{JobPosting, NewJobPosting, RecommendedJob, SkillList};
use crate::recommend::recommender::{recommend, RecommendFilters, RecommendWeights};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Résumé signals for ranking. Explicit fields win over values extracted
/// from `resume_text`.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub skills: Option<SkillList>,
    pub degree: Option<String>,
    pub experience_years: Option<u32>,
    pub resume_text: Option<String>,
    #[serde(default)]
    pub weights: RecommendWeights,
    #[serde(default)]
    pub filters: RecommendFilters,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub total_recommended: usize,
    pub recommendations: Vec<RecommendedJob>,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DeleteJobResponse {
    pub deleted: Uuid,
}

struct ResumeSignals {
    skills: Vec<String>,
    degree: Option<String>,
    experience_years: Option<u32>,
}

impl RecommendRequest {
    fn into_signals(self) -> ResumeSignals {
        let extracted = self
            .resume_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| parse_resume_text(t, None));

        let skills = match self.skills.map(SkillList::into_vec) {
            Some(skills) if !skills.is_empty() => skills,
            _ => extracted.as_ref().map(|r| r.skills.clone()).unwrap_or_default(),
        };
        let degree = self
            .degree
            .filter(|d| !d.trim().is_empty())
            .or_else(|| {
                extracted
                    .as_ref()
                    .filter(|r| r.has_education())
                    .map(|r| r.education.clone())
            });
        let experience_years = self
            .experience_years
            .or_else(|| extracted.as_ref().and_then(|r| r.experience_years));

        ResumeSignals {
            skills,
            degree,
            experience_years,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/recommend
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let weights = request.weights.clone();
    let filters = request.filters.clone();
    let signals = request.into_signals();

    if signals.skills.is_empty() {
        return Err(AppError::Validation("No skills found in resume".to_string()));
    }

    let catalog = state.catalog.open_jobs().await?;
    let recommendations = recommend(
        &state.scoring.degree_ladder,
        signals.skills.as_slice(),
        signals.degree.as_deref(),
        signals.experience_years,
        &catalog,
        &weights,
        &filters,
    );

    info!(
        "Recommended {} of {} open jobs",
        recommendations.len(),
        catalog.len()
    );

    Ok(Json(RecommendResponse {
        total_recommended: recommendations.len(),
        recommendations,
    }))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs = state.catalog.list_jobs().await?;
    Ok(Json(JobListResponse { jobs }))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<NewJobPosting>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    let missing = request.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let job_id = state.catalog.insert_job(request.into_posting()).await?;
    Ok((StatusCode::CREATED, Json(CreateJobResponse { job_id })))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<DeleteJobResponse>, AppError> {
    if !state.catalog.delete_job(job_id).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("Deleted job {job_id}");
    Ok(Json(DeleteJobResponse { deleted: job_id }))
}
