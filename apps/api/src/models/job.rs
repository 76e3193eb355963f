use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_OPEN: &str = "open";

/// A job posting as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub degree_required: Option<String>,
    #[serde(default)]
    pub min_experience: Option<f64>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    STATUS_OPEN.to_string()
}

impl JobPosting {
    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }
}

/// Skills accepted either as a JSON list or a comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillList {
    List(Vec<String>),
    Csv(String),
}

impl SkillList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SkillList::List(skills) => skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            SkillList::Csv(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Request body for creating a posting.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJobPosting {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub skills: Option<SkillList>,
    pub degree_required: Option<String>,
    pub min_experience: Option<f64>,
    pub status: Option<String>,
}

impl NewJobPosting {
    /// Names of required fields that are missing or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        let has_skills = self
            .skills
            .clone()
            .map(|s| !s.into_vec().is_empty())
            .unwrap_or(false);
        if !has_skills {
            missing.push("skills");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }

    /// Builds the stored posting. Call only after `missing_fields` is empty.
    pub fn into_posting(self) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            title: self.title,
            company: self.company,
            location: self.location,
            description: self.description,
            skills: self.skills.map(SkillList::into_vec).unwrap_or_default(),
            degree_required: self.degree_required.filter(|d| !d.trim().is_empty()),
            min_experience: self.min_experience,
            status: self.status.unwrap_or_else(default_status),
            created_at: Some(Utc::now()),
        }
    }
}

/// A posting annotated with the recommender's derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedJob {
    #[serde(flatten)]
    pub job: JobPosting,
    pub matched_skills: Vec<String>,
    pub match_count: u32,
    pub degree_bonus: u32,
    pub exp_bonus: u32,
    pub composite_score: u32,
}
