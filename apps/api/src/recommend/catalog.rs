//! Job catalog: the store the recommender reads postings from.
//!
//! `PgJobCatalog` is used when `DATABASE_URL` is set; otherwise the service
//! runs on `InMemoryJobCatalog`, optionally seeded from a JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPosting, STATUS_OPEN};

#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Postings with status "open", in storage order.
    async fn open_jobs(&self) -> Result<Vec<JobPosting>, AppError>;

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError>;

    async fn insert_job(&self, job: JobPosting) -> Result<Uuid, AppError>;

    /// Returns `false` when no posting had that id.
    async fn delete_job(&self, id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory catalog
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryJobCatalog {
    jobs: RwLock<Vec<JobPosting>>,
}

impl InMemoryJobCatalog {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
        }
    }

    /// Seeds the catalog from a JSON array of postings.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jobs file '{}'", path.display()))?;
        let jobs: Vec<JobPosting> = serde_json::from_str(&raw)
            .with_context(|| format!("Jobs file '{}' is not a JSON array of postings", path.display()))?;
        info!("Loaded {} job postings from {}", jobs.len(), path.display());
        Ok(Self::new(jobs))
    }
}

#[async_trait]
impl JobCatalog for InMemoryJobCatalog {
    async fn open_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        Ok(self
            .jobs
            .read()
            .await
            .iter()
            .filter(|j| j.is_open())
            .cloned()
            .collect())
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        Ok(self.jobs.read().await.clone())
    }

    async fn insert_job(&self, job: JobPosting) -> Result<Uuid, AppError> {
        let id = job.id;
        self.jobs.write().await.push(job);
        Ok(id)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, AppError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| j.id != id);
        Ok(jobs.len() != before)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL catalog
// ────────────────────────────────────────────────────────────────────────────

const JOB_COLUMNS: &str = "id, title, company, location, description, skills, \
    degree_required, min_experience, status, created_at";

pub struct PgJobCatalog {
    pool: PgPool,
}

impl PgJobCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobCatalog for PgJobCatalog {
    async fn open_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let jobs = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE status = $1 ORDER BY created_at"
        ))
        .bind(STATUS_OPEN)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn list_jobs(&self) -> Result<Vec<JobPosting>, AppError> {
        let jobs = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn insert_job(&self, job: JobPosting) -> Result<Uuid, AppError> {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, title, company, location, description, skills,
                 degree_required, min_experience, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, NOW()))
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.skills)
        .bind(&job.degree_required)
        .bind(job.min_experience)
        .bind(&job.status)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;

        info!("Inserted job {} ({})", job.id, job.title);
        Ok(job.id)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::job::{NewJobPosting, SkillList};

    fn new_job(title: &str, status: Option<&str>) -> JobPosting {
        NewJobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: "Work".to_string(),
            skills: Some(SkillList::Csv("python, sql".to_string())),
            degree_required: None,
            min_experience: None,
            status: status.map(str::to_string),
        }
        .into_posting()
    }

    #[tokio::test]
    async fn test_in_memory_filters_open_jobs() {
        let catalog = InMemoryJobCatalog::new(vec![
            new_job("Open", None),
            new_job("Closed", Some("closed")),
        ]);
        let open = catalog.open_jobs().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Open");
        assert_eq!(catalog.list_jobs().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_in_memory_insert_and_delete() {
        let catalog = InMemoryJobCatalog::default();
        let id = catalog.insert_job(new_job("New", None)).await.unwrap();
        assert_eq!(catalog.list_jobs().await.unwrap().len(), 1);
        assert!(catalog.delete_job(id).await.unwrap());
        assert!(!catalog.delete_job(id).await.unwrap());
        assert!(catalog.open_jobs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let jobs = vec![new_job("Seeded", None)];
        write!(file, "{}", serde_json::to_string(&jobs).unwrap()).unwrap();

        let catalog = InMemoryJobCatalog::from_file(file.path()).unwrap();
        let open = catalog.open_jobs().await.unwrap();
        assert_eq!(open[0].title, "Seeded");
    }

    #[test]
    fn test_seed_from_bad_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"a list\"}}").unwrap();
        assert!(InMemoryJobCatalog::from_file(file.path()).is_err());
    }
}
