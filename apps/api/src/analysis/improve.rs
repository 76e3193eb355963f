//! Improvement advisor: turns a résumé (and optionally a JD) into concrete
//! suggestions: missing skills and keywords, requirement gaps, formatting,
//! writing tips and heuristic grammar issues.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::analysis::grammar::grammar_issues;
use crate::analysis::keywords::{tokenize, top_keywords};
use crate::models::jd::ParsedJD;
use crate::models::resume::{normalize_skills, ParsedResume};

pub const JD_TOP_KEYWORDS: usize = 30;
pub const MAX_KEYWORD_SUGGESTIONS: usize = 15;
pub const MIN_SKILLS_LISTED: usize = 8;

const NOISE_WORDS: &[&str] = &[
    "responsibilities",
    "requirements",
    "role",
    "team",
    "work",
    "good",
    "strong",
    "using",
    "skills",
];

/// Checked when no JD is available.
const COMMON_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "c++",
    "javascript",
    "sql",
    "git",
    "apis",
    "machine learning",
    "data analysis",
    "cloud",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "linux",
    "agile",
    "scrum",
    "debugging",
    "problem solving",
];

static IMPACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:achiev|impact|improv|reduc|increas|optimi|led|delivered|launched)\b")
        .expect("valid regex")
});
static ACTION_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:built|developed|designed|implemented|automated|deployed|analyzed|visualized|optimized)\b",
    )
    .expect("valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImprovementReport {
    pub missing_jd_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub missing_keywords_from_jd_text: Vec<String>,
    pub jd_extra_keywords: Vec<String>,
    pub experience_gap: Option<String>,
    pub degree_gap: Option<String>,
    pub format_suggestions: Vec<String>,
    pub resume_enhancement_tips: Vec<String>,
    pub grammar_issues: Vec<String>,
}

/// Builds the report. `jd_text` feeds the keyword statistics and is only
/// consulted when `jd` is present.
pub fn suggest_improvements(
    resume: &ParsedResume,
    jd: Option<&ParsedJD>,
    jd_text: Option<&str>,
) -> ImprovementReport {
    let mut report = ImprovementReport::default();
    let resume_skills = resume.skill_set();
    let resume_tokens: BTreeSet<String> = tokenize(&resume.raw_text).into_iter().collect();

    match jd {
        Some(jd) => {
            let jd_skills = normalize_skills(&jd.must_have_skills);
            report.missing_jd_skills = jd_skills.difference(&resume_skills).cloned().collect();
            report.degree_gap = degree_gap(resume, jd);
            report.experience_gap = experience_gap(resume, jd);

            let jd_top = top_keywords(jd_text.unwrap_or_default(), JD_TOP_KEYWORDS);
            report.jd_extra_keywords = jd_top
                .iter()
                .filter(|k| !jd_skills.contains(*k))
                .take(MAX_KEYWORD_SUGGESTIONS)
                .cloned()
                .collect();
            report.missing_keywords_from_jd_text = jd_top
                .into_iter()
                .filter(|k| !resume_tokens.contains(k) && !resume_skills.contains(k))
                .filter(|k| !NOISE_WORDS.contains(&k.as_str()))
                .take(MAX_KEYWORD_SUGGESTIONS)
                .collect();
            report.missing_keywords = report.missing_keywords_from_jd_text.clone();
        }
        None => {
            report.missing_keywords = COMMON_KEYWORDS
                .iter()
                .filter(|k| !resume_tokens.contains(**k) && !resume_skills.contains(**k))
                .take(MAX_KEYWORD_SUGGESTIONS)
                .map(|k| k.to_string())
                .collect();
        }
    }

    let raw_lower = resume.raw_text.to_lowercase();
    report.format_suggestions = format_suggestions(resume, &raw_lower);
    report.resume_enhancement_tips =
        enhancement_tips(&raw_lower, jd.is_some() && !report.missing_jd_skills.is_empty());
    report.grammar_issues = grammar_issues(&resume.raw_text);
    report
}

fn degree_gap(resume: &ParsedResume, jd: &ParsedJD) -> Option<String> {
    if jd.degrees_required.is_empty() {
        return None;
    }
    let education = resume.education.trim();
    let education_lower = education.to_lowercase();
    let met = jd
        .degrees_required
        .iter()
        .any(|d| education_lower.contains(&d.to_lowercase()));
    if met {
        return None;
    }
    let found = if education.is_empty() { "Unknown" } else { education };
    Some(format!(
        "Required: {}, Found: {found}",
        jd.degrees_required.join(", ")
    ))
}

fn experience_gap(resume: &ParsedResume, jd: &ParsedJD) -> Option<String> {
    let required = jd.experience_required?;
    let have = resume.experience_years.unwrap_or(0);
    (have < required).then(|| format!("Required: {required} years, Found: {have} years"))
}

fn format_suggestions(resume: &ParsedResume, raw_lower: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    if !raw_lower.contains("summary") {
        suggestions.push(
            "Add a Professional Summary showcasing your core skills and achievements at the top."
                .to_string(),
        );
    }
    if !raw_lower.contains("experience") {
        suggestions.push("Add a Work Experience section with relevant details.".to_string());
    }
    if !raw_lower.contains("education") {
        suggestions.push("Ensure an Education section is present.".to_string());
    }
    if resume.skills.len() < MIN_SKILLS_LISTED {
        suggestions.push("Expand the Skills section with more targeted keywords.".to_string());
    }
    suggestions
}

fn enhancement_tips(raw_lower: &str, has_missing_jd_skills: bool) -> Vec<String> {
    let mut tips = Vec::new();
    if !IMPACT_RE.is_match(raw_lower) {
        tips.push("Add measurable impact using numbers or percentages.".to_string());
    }
    if !ACTION_VERB_RE.is_match(raw_lower) {
        tips.push("Start bullets with strong action verbs.".to_string());
    }
    if !raw_lower.contains("project") {
        tips.push("Include 1–2 project highlights to demonstrate applied skills.".to_string());
    }
    if has_missing_jd_skills {
        tips.push("Weave missing JD skills into relevant bullets.".to_string());
    }
    tips.push("Mirror JD terminology in your resume wording.".to_string());
    tips
}
