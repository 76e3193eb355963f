// Prompt constants for the rubric scorer.

/// Keeps the model's answer parseable by `parse_rubric_response`.
const JSON_ONLY_SYSTEM: &str = "Respond with a single JSON object and nothing else. \
    No markdown code fences, no commentary before or after the object.";

/// System prompt for rubric scoring.
pub fn rubric_system() -> String {
    format!(
        "You are an ATS resume scoring expert that ONLY returns valid JSON matching the schema. \
         {JSON_ONLY_SYSTEM}"
    )
}

/// Rubric prompt template. Replace `{resume_json}`, `{job_role}` and `{jd_json}` before sending.
pub const RUBRIC_PROMPT_TEMPLATE: &str = r#"Score the resume by rubric:
- Overall match (0-100)
- Keywords match (0-100)
- Formatting (0-100)
- Grammar (0-100)
Return ONLY a JSON object with fields exactly as in the schema.

Schema:
{
  "overall": "integer, 0-100",
  "keywords": "integer, 0-100",
  "formatting": "integer, 0-100",
  "grammar": "integer, 0-100",
  "job_role": "string, echo the target job role"
}

Resume JSON:
{resume_json}

Target Job Role: {job_role}
Parsed JD (if present): {jd_json}
Prioritize JD alignment when present."#;

pub fn build_rubric_prompt(resume_json: &str, job_role: &str, jd_json: &str) -> String {
    RUBRIC_PROMPT_TEMPLATE
        .replace("{resume_json}", resume_json)
        .replace("{job_role}", job_role)
        .replace("{jd_json}", jd_json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_placeholders_replaced() {
        let prompt = build_rubric_prompt(r#"{"skills":[]}"#, "Data Analyst", "{}");
        assert!(!prompt.contains("{resume_json}"));
        assert!(!prompt.contains("{job_role}"));
        assert!(!prompt.contains("{jd_json}"));
        assert!(prompt.contains("Target Job Role: Data Analyst"));
    }

    #[test]
    fn test_system_prompt_demands_json() {
        assert!(rubric_system().contains("valid JSON"));
        assert!(rubric_system().contains("single JSON object"));
    }
}
