//! Scoring configuration: policy table, degree ladder and blend weights.
//!
//! Built once at startup, validated, then shared read-only behind an `Arc`.
//! A malformed table fails the process at boot instead of per request.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::scoring::degree::DegreeLadder;
use crate::scoring::policy::Policy;

/// Largest flat boost any single policy entry may carry.
pub const MAX_SINGLE_BOOST: u32 = 10;
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scoring config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("invalid degree ladder: {0}")]
    InvalidLadder(String),

    #[error("invalid weight: {0}")]
    InvalidWeight(String),
}

/// Weights of the deterministic JD-match score and of the final blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub skills: f64,
    pub experience: f64,
    pub degree: f64,
    pub rubric: f64,
    pub jd_match: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            skills: 0.60,
            experience: 0.25,
            degree: 0.15,
            rubric: 0.60,
            jd_match: 0.40,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub degree_ladder: DegreeLadder,
    #[serde(default)]
    pub weights: BlendWeights,
}

impl ScoringConfig {
    /// Defaults, or the JSON file at `path` when given. Always validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                info!("Loading scoring config from {}", path.display());
                serde_json::from_str::<ScoringConfig>(&raw)?
            }
            None => ScoringConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_policy()?;
        self.validate_ladder()?;
        self.validate_weights()
    }

    fn validate_policy(&self) -> Result<(), ConfigError> {
        for (name, industry) in &self.policy.industries {
            if name.trim().is_empty() || *name != name.trim().to_lowercase() {
                return Err(ConfigError::InvalidPolicy(format!(
                    "industry name '{name}' must be non-blank lowercase"
                )));
            }
            if industry.keywords.is_empty() {
                return Err(ConfigError::InvalidPolicy(format!(
                    "industry '{name}' has no keywords"
                )));
            }
            if industry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConfigError::InvalidPolicy(format!(
                    "industry '{name}' has a blank keyword"
                )));
            }
            check_boost(&format!("industries.{name}.boost"), industry.boost)?;
        }

        let jd = &self.policy.jd_specific;
        check_boost("jd_specific.must_have_skills_match", jd.must_have_skills_match)?;
        check_boost("jd_specific.degree_required_match", jd.degree_required_match)?;
        check_boost("jd_specific.exp_meets_or_exceeds", jd.exp_meets_or_exceeds)
    }

    fn validate_ladder(&self) -> Result<(), ConfigError> {
        if self.degree_ladder.rungs.is_empty() {
            return Err(ConfigError::InvalidLadder("ladder has no rungs".to_string()));
        }
        for rung in &self.degree_ladder.rungs {
            if rung.keyword.trim().is_empty() || rung.keyword != rung.keyword.to_lowercase() {
                return Err(ConfigError::InvalidLadder(format!(
                    "keyword '{}' must be non-blank lowercase",
                    rung.keyword
                )));
            }
        }
        Ok(())
    }

    fn validate_weights(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("skills", w.skills),
            ("experience", w.experience),
            ("degree", w.degree),
            ("rubric", w.rubric),
            ("jd_match", w.jd_match),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidWeight(format!(
                    "{name} = {value} is outside [0, 1]"
                )));
            }
        }
        let coverage_sum = w.skills + w.experience + w.degree;
        if (coverage_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeight(format!(
                "skills + experience + degree = {coverage_sum}, expected 1"
            )));
        }
        let blend_sum = w.rubric + w.jd_match;
        if (blend_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeight(format!(
                "rubric + jd_match = {blend_sum}, expected 1"
            )));
        }
        Ok(())
    }
}

fn check_boost(name: &str, boost: u32) -> Result<(), ConfigError> {
    if boost > MAX_SINGLE_BOOST {
        return Err(ConfigError::InvalidPolicy(format!(
            "{name} = {boost} exceeds {MAX_SINGLE_BOOST}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::scoring::degree::DegreeLevel;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
        assert!(ScoringConfig::load(None).is_ok());
    }

    #[test]
    fn test_rejects_oversized_boost() {
        let mut config = ScoringConfig::default();
        config.policy.jd_specific.must_have_skills_match = 50;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPolicy(_))));
    }

    #[test]
    fn test_rejects_uppercase_industry() {
        let mut config = ScoringConfig::default();
        let cloud = config.policy.industries.remove("cloud").unwrap();
        config.policy.industries.insert("Cloud".to_string(), cloud);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPolicy(_))));
    }

    #[test]
    fn test_rejects_weights_not_summing_to_one() {
        let mut config = ScoringConfig::default();
        config.weights.skills = 0.9;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWeight(_))));

        let mut config = ScoringConfig::default();
        config.weights.rubric = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWeight(_))));
    }

    #[test]
    fn test_rejects_empty_ladder() {
        let mut config = ScoringConfig::default();
        config.degree_ladder.rungs.clear();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLadder(_))));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"degree_ladder": [{{"keyword": "doctor", "level": "doctorate"}}]}}"#
        )
        .unwrap();

        let config = ScoringConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.degree_ladder.rungs.len(), 1);
        assert_eq!(config.degree_ladder.rungs[0].level, DegreeLevel::Doctorate);
        assert_eq!(config.policy, Policy::default());
        assert_eq!(config.weights, BlendWeights::default());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            ScoringConfig::load(Some(file.path())),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ScoringConfig::load(Some(Path::new("/nonexistent/scoring.json")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
