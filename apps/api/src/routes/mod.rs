pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::recommend::handlers as jobs;
use crate::scoring::handlers::{self as scoring, MAX_UPLOAD_BYTES};
use crate::state::AppState;

/// Room for multipart framing and the text fields around the file.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/score", post(scoring::handle_score))
        .route(
            "/api/v1/score/upload",
            post(scoring::handle_score_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Analysis API
        .route("/api/v1/jd/parse", post(analysis::handle_parse_jd))
        .route("/api/v1/improve", post(analysis::handle_improve))
        // Jobs API
        .route("/api/v1/jobs/recommend", post(jobs::handle_recommend))
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id", delete(jobs::handle_delete_job))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::models::job::{NewJobPosting, SkillList};
    use crate::recommend::catalog::InMemoryJobCatalog;
    use crate::scoring::rubric::{FallbackRubricScorer, FALLBACK_WARNING};
    use crate::scoring::settings::ScoringConfig;

    fn test_state(jobs: Vec<crate::models::job::JobPosting>) -> AppState {
        AppState {
            catalog: Arc::new(InMemoryJobCatalog::new(jobs)),
            rubric: Arc::new(FallbackRubricScorer),
            scoring: Arc::new(ScoringConfig::default()),
        }
    }

    fn posting(title: &str, skills: &str) -> crate::models::job::JobPosting {
        NewJobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: "Build data products".to_string(),
            skills: Some(SkillList::Csv(skills.to_string())),
            degree_required: Some("Bachelor".to_string()),
            min_experience: Some(2.0),
            status: None,
        }
        .into_posting()
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(build_router(test_state(vec![])), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-api");
        assert_eq!(body["scorer_backend"], "fallback");
        assert_eq!(body["policy_industries"], 5);
    }

    #[tokio::test]
    async fn test_score_with_jd_text() {
        let app = build_router(test_state(vec![]));
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/score",
            Some(json!({
                "job_role": "Data Analyst",
                "resume_text": "Summary. Python and SQL analyst with 4 years of experience. Bachelor of Science.",
                "jd_text": "Data Analyst: 5+ years with Python, SQL and Tableau. Bachelor required."
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["using_jd"], true);
        assert_eq!(body["parsed_jd"]["industry"], "Data Science");
        let score = &body["score"];
        assert_eq!(score["scorer_backend"], "fallback");
        assert_eq!(score["warning"], FALLBACK_WARNING);
        assert_eq!(score["job_role"], "Data Analyst");
        assert_eq!(score["jd_match_details"]["skills_matched"], 2);
        assert_eq!(score["jd_match_details"]["skills_required"], 3);
        let overall = score["overall"].as_u64().unwrap();
        let interval = score["confidence_interval"].as_array().unwrap();
        assert!(interval[0].as_u64().unwrap() <= overall);
        assert!(interval[1].as_u64().unwrap() >= overall);
    }

    #[tokio::test]
    async fn test_score_requires_job_role_and_resume() {
        let app = build_router(test_state(vec![]));
        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/v1/score",
            Some(json!({"job_role": "  ", "resume_text": "Python"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/score",
            Some(json!({"job_role": "SWE"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_score_upload_text_file() {
        let boundary = "X-ATS-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"job_role\"\r\n\r\n\
             Backend Engineer\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Java and SQL developer, 6 years of experience.\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/score/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = build_router(test_state(vec![])).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["parsed_resume"]["file_name"], "cv.txt");
        assert_eq!(body["parsed_resume"]["experience_years"], 6);
        assert_eq!(body["using_jd"], false);
        assert_eq!(body["score"]["job_role"], "Backend Engineer");
    }

    #[tokio::test]
    async fn test_score_upload_rejects_unsupported_file() {
        let boundary = "X-ATS-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"job_role\"\r\n\r\n\
             SWE\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"resume\"; filename=\"cv.docx\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             PK\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/score/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = build_router(test_state(vec![])).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_parse_jd_and_improve() {
        let app = build_router(test_state(vec![]));
        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/v1/jd/parse",
            Some(json!({"jd_text": "Frontend Developer: React, HTML, CSS. 2 years."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["parsed_jd"]["industry"], "Frontend Development");
        assert_eq!(body["parsed_jd"]["experience_required"], 2);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/improve",
            Some(json!({
                "resume_text": "Built React apps with HTML.",
                "jd_text": "Frontend Developer: React, HTML, CSS. 2 years."
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["missing_jd_skills"], json!(["css"]));
        assert_eq!(body["experience_gap"], "Required: 2 years, Found: 0 years");
    }

    #[tokio::test]
    async fn test_parse_jd_rejects_empty_text() {
        let app = build_router(test_state(vec![]));
        let (status, _) = send(app, Method::POST, "/api/v1/jd/parse", Some(json!({"jd_text": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommend_ranks_open_jobs() {
        let app = build_router(test_state(vec![
            posting("Data Engineer", "python, sql, spark"),
            posting("Frontend", "react, css"),
        ]));
        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/v1/jobs/recommend",
            Some(json!({"skills": ["Python", "SQL"], "degree": "Master", "experience_years": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_recommended"], 1);
        let top = &body["recommendations"][0];
        assert_eq!(top["title"], "Data Engineer");
        assert_eq!(top["composite_score"], 3 * 2 + 1 + 1);

        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/jobs/recommend",
            Some(json!({"skills": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No skills found in resume");
    }

    #[tokio::test]
    async fn test_job_crud() {
        let app = build_router(test_state(vec![]));

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/v1/jobs",
            Some(json!({"title": "SWE", "company": "Acme"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Missing required fields: location, skills, description"
        );

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/v1/jobs",
            Some(json!({
                "title": "SWE", "company": "Acme", "location": "Remote",
                "skills": "rust, sql", "description": "Systems work"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let job_id = body["job_id"].as_str().unwrap().to_string();

        let (_, body) = send(app.clone(), Method::GET, "/api/v1/jobs", None).await;
        assert_eq!(body["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(body["jobs"][0]["status"], "open");

        let uri = format!("/api/v1/jobs/{job_id}");
        let (status, _) = send(app.clone(), Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
