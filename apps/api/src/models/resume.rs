use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Structured facts extracted from a résumé.
///
/// Produced once by the extractor (or supplied by the caller) and consumed
/// read-only by every scoring component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// `None` when the extractor could not tell; `Some(0)` when it looked and found nothing.
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub raw_text: String,
}

impl ParsedResume {
    /// Skills as a trimmed, lowercase set with blank entries dropped.
    pub fn skill_set(&self) -> BTreeSet<String> {
        normalize_skills(&self.skills)
    }

    pub fn has_education(&self) -> bool {
        !self.education.trim().is_empty()
    }

    /// Number of populated sections among skills, education and experience.
    pub fn sections_present(&self) -> u32 {
        let mut sections = 0;
        if !self.skills.is_empty() {
            sections += 1;
        }
        if self.has_education() {
            sections += 1;
        }
        if self.experience_years.is_some() {
            sections += 1;
        }
        sections
    }
}

/// Trims and lowercases every entry, dropping blanks and duplicates.
pub fn normalize_skills<S: AsRef<str>>(skills: &[S]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_set_normalizes_case_and_whitespace() {
        let resume = ParsedResume {
            skills: vec![" Python".into(), "SQL ".into(), "python".into(), "  ".into()],
            ..Default::default()
        };
        let set = resume.skill_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("python"));
        assert!(set.contains("sql"));
    }

    #[test]
    fn test_sections_present_counts_populated_fields() {
        let resume = ParsedResume {
            skills: vec!["rust".into()],
            education: "Bachelor".into(),
            experience_years: Some(0),
            ..Default::default()
        };
        assert_eq!(resume.sections_present(), 3);
        assert_eq!(ParsedResume::default().sections_present(), 0);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let resume: ParsedResume = serde_json::from_str(r#"{"skills": ["Rust"]}"#).unwrap();
        assert_eq!(resume.skills, vec!["Rust".to_string()]);
        assert!(resume.experience_years.is_none());
        assert!(!resume.has_education());
    }
}
