//! Policy engine: flat, capped score boosts driven by a static table.
//!
//! Boosts are binary triggers: an industry boost fires when any résumé skill
//! appears in the industry's keyword set, regardless of how many do.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::jd::ParsedJD;
use crate::models::resume::ParsedResume;

/// Must-have coverage ratio at which the must-have boost fires.
pub const MUST_HAVE_BOOST_THRESHOLD: f64 = 0.70;
/// Industry label reported when no JD (or no industry) is available.
pub const UNKNOWN_INDUSTRY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryPolicy {
    pub keywords: BTreeSet<String>,
    pub boost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdSpecificBoosts {
    pub must_have_skills_match: u32,
    pub degree_required_match: u32,
    pub exp_meets_or_exceeds: u32,
}

impl Default for JdSpecificBoosts {
    fn default() -> Self {
        Self {
            must_have_skills_match: 4,
            degree_required_match: 2,
            exp_meets_or_exceeds: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Keyed by lowercase industry label.
    pub industries: BTreeMap<String, IndustryPolicy>,
    #[serde(default)]
    pub jd_specific: JdSpecificBoosts,
}

const DEFAULT_INDUSTRIES: &[(&str, &[&str])] = &[
    ("software engineering", &["python", "java", "git", "docker", "apis"]),
    ("data science", &["python", "pandas", "sql", "ml", "scikit"]),
    ("cloud", &["aws", "azure", "gcp", "kubernetes", "terraform"]),
    ("frontend", &["javascript", "react", "html", "css", "typescript"]),
    ("backend", &["python", "node", "java", "sql", "microservices"]),
];
const DEFAULT_INDUSTRY_BOOST: u32 = 2;

impl Default for Policy {
    fn default() -> Self {
        let industries = DEFAULT_INDUSTRIES
            .iter()
            .map(|(name, keywords)| {
                (
                    name.to_string(),
                    IndustryPolicy {
                        keywords: keywords.iter().map(|k| k.to_string()).collect(),
                        boost: DEFAULT_INDUSTRY_BOOST,
                    },
                )
            })
            .collect();
        Self {
            industries,
            jd_specific: JdSpecificBoosts::default(),
        }
    }
}

/// Boost amounts produced by one policy evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyBoosts {
    /// Lowercase detected industry, or "unknown".
    pub industry: String,
    pub industry_boost: u32,
    pub jd_specific_boost: u32,
}

impl PolicyBoosts {
    pub fn total(&self) -> u32 {
        self.industry_boost + self.jd_specific_boost
    }
}

/// Lowercased JD industry label, or "unknown".
pub fn detect_industry(jd: Option<&ParsedJD>) -> String {
    jd.map(|j| j.industry.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string())
}

/// Share of required entries present in the résumé. The denominator counts
/// the required list as given, duplicates included.
pub fn must_have_ratio<S: AsRef<str>>(required: &[S], resume_skills: &BTreeSet<String>) -> f64 {
    let required_set: BTreeSet<String> = required
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect();
    let hits = required_set.intersection(resume_skills).count();
    hits as f64 / required.len().max(1) as f64
}

impl Policy {
    pub fn evaluate(&self, resume: &ParsedResume, jd: Option<&ParsedJD>) -> PolicyBoosts {
        let industry = detect_industry(jd);
        let resume_skills = resume.skill_set();

        let industry_boost = self
            .industries
            .get(&industry)
            .filter(|policy| {
                policy
                    .keywords
                    .iter()
                    .any(|k| resume_skills.contains(&k.to_lowercase()))
            })
            .map(|policy| policy.boost)
            .unwrap_or(0);

        let mut jd_specific_boost = 0;
        if let Some(jd) = jd {
            if must_have_ratio(&jd.must_have_skills, &resume_skills) >= MUST_HAVE_BOOST_THRESHOLD {
                jd_specific_boost += self.jd_specific.must_have_skills_match;
            }

            let education = resume.education.to_lowercase();
            let degree_hit = jd
                .degrees_required
                .iter()
                .map(|d| d.trim().to_lowercase())
                .any(|d| !d.is_empty() && education.contains(&d));
            if degree_hit {
                jd_specific_boost += self.jd_specific.degree_required_match;
            }

            if let (Some(required), Some(have)) = (jd.experience_required, resume.experience_years) {
                if have >= required {
                    jd_specific_boost += self.jd_specific.exp_meets_or_exceeds;
                }
            }
        }

        PolicyBoosts {
            industry,
            industry_boost,
            jd_specific_boost,
        }
    }
}
