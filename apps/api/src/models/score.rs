use serde::{Deserialize, Serialize};

/// Deterministic JD-alignment breakdown. Alignments are integer percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdMatchDetails {
    pub jd_match_score: u32,
    pub skills_matched: u32,
    pub skills_required: u32,
    pub skills_coverage: u32,
    pub exp_alignment: u32,
    pub degree_alignment: u32,
    pub degree_requirement_met: bool,
    pub experience_shortfall_years: u32,
}

/// Policy boosts and gaps surfaced alongside the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdIntegration {
    pub industry_detected: String,
    pub jd_specific_boost_applied: u32,
    pub industry_boost_applied: u32,
    pub degree_requirement_met: bool,
    pub experience_shortfall_years: u32,
    pub missing_skills: Vec<String>,
}

/// Final output of one scoring invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall: u32,
    pub keywords: u32,
    pub formatting: u32,
    pub grammar: u32,
    pub job_role: String,
    /// Rubric overall before blending and boosts.
    pub rubric_overall: u32,
    pub scorer_backend: String, // "llm" | "fallback"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub jd_match_details: JdMatchDetails,
    pub confidence_interval: [u32; 2],
    pub jd_integration: JdIntegration,
    pub improvement_notes: Vec<String>,
}
