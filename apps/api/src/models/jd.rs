use serde::{Deserialize, Serialize};

/// Industry label used when the analyzer cannot infer one.
pub const DEFAULT_INDUSTRY: &str = "Default";

/// Structured requirements extracted from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedJD {
    #[serde(default)]
    pub must_have_skills: Vec<String>,
    #[serde(default)]
    pub degrees_required: Vec<String>,
    /// Minimum years of experience. `None` or `Some(0)` means the JD is silent.
    #[serde(default)]
    pub experience_required: Option<u32>,
    #[serde(default = "default_industry")]
    pub industry: String,
}

fn default_industry() -> String {
    DEFAULT_INDUSTRY.to_string()
}

impl Default for ParsedJD {
    fn default() -> Self {
        Self {
            must_have_skills: Vec::new(),
            degrees_required: Vec::new(),
            experience_required: None,
            industry: default_industry(),
        }
    }
}
