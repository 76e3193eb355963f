//! JD analyzer: extracts required skills, degrees, experience and industry
//! from raw job-description text.

use std::collections::BTreeSet;

use tracing::debug;

use crate::analysis::resume_parser::YEARS_RE;
use crate::models::jd::{ParsedJD, DEFAULT_INDUSTRY};
use crate::text::title_case;

const KNOWN_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "javascript",
    "html",
    "css",
    "react",
    "node.js",
    "machine learning",
    "deep learning",
    "nlp",
    "sql",
    "power bi",
    "tableau",
    "aws",
    "azure",
    "docker",
];

const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "b.tech", "m.tech", "b.sc", "m.sc"];

/// Job-title fragments, checked in order against the whole JD text.
const TITLE_TO_INDUSTRY: &[(&str, &str)] = &[
    ("data scientist", "Data Science"),
    ("machine learning engineer", "Machine Learning"),
    ("ml engineer", "Machine Learning"),
    ("ai engineer", "Machine Learning"),
    ("data analyst", "Data Science"),
    ("business intelligence", "Data Science"),
    ("bi developer", "Data Science"),
    ("software engineer", "Software Engineering"),
    ("backend developer", "Backend Development"),
    ("backend engineer", "Backend Development"),
    ("frontend developer", "Frontend Development"),
    ("frontend engineer", "Frontend Development"),
    ("web developer", "Web Development"),
    ("full stack", "Web Development"),
    ("ui/ux", "UI/UX"),
    ("ux designer", "UI/UX"),
    ("ui designer", "UI/UX"),
];

const SKILL_TO_INDUSTRY: &[(&str, &str)] = &[
    ("python", "Data Science"),
    ("machine learning", "Data Science"),
    ("deep learning", "Machine Learning"),
    ("sql", "Data Science"),
    ("pandas", "Data Science"),
    ("numpy", "Data Science"),
    ("scikit-learn", "Data Science"),
    ("mlops", "Machine Learning"),
    ("javascript", "Web Development"),
    ("react", "Frontend Development"),
    ("html", "Web Development"),
    ("css", "Web Development"),
    ("next.js", "Frontend Development"),
    ("java", "Software Engineering"),
    ("c++", "Software Engineering"),
    ("spring", "Backend Development"),
    ("node", "Backend Development"),
    ("sql server", "Backend Development"),
    ("figma", "UI/UX"),
    ("adobe xd", "UI/UX"),
    ("wireframing", "UI/UX"),
];

fn matched_keywords(lower: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| title_case(k))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn infer_industry_from_title(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    TITLE_TO_INDUSTRY
        .iter()
        .find(|(title, _)| lower.contains(title))
        .map(|(_, industry)| *industry)
}

/// Majority vote of the skills' industries. On a tie, the industry that
/// received its first vote earliest wins.
pub fn infer_industry_from_skills<S: AsRef<str>>(skills: &[S]) -> Option<&'static str> {
    let mut votes: Vec<(&'static str, usize)> = Vec::new();
    for skill in skills {
        let key = skill.as_ref().trim().to_lowercase();
        let Some(&(_, industry)) = SKILL_TO_INDUSTRY.iter().find(|(s, _)| *s == key) else {
            continue;
        };
        match votes.iter_mut().find(|(i, _)| *i == industry) {
            Some((_, count)) => *count += 1,
            None => votes.push((industry, 1)),
        }
    }

    let mut best: Option<(&'static str, usize)> = None;
    for (industry, count) in votes {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((industry, count));
        }
    }
    best.map(|(industry, _)| industry)
}

/// Parses a job description. Deterministic; never fails.
pub fn parse_jd(jd_text: &str) -> ParsedJD {
    let lower = jd_text.to_lowercase();

    let must_have_skills = matched_keywords(&lower, KNOWN_SKILLS);
    let degrees_required = matched_keywords(&lower, DEGREE_KEYWORDS);
    let experience_required = YEARS_RE
        .captures(&lower)
        .and_then(|caps| caps[1].parse::<u32>().ok());

    let industry = infer_industry_from_title(jd_text)
        .or_else(|| infer_industry_from_skills(&must_have_skills))
        .unwrap_or(DEFAULT_INDUSTRY)
        .to_string();

    debug!(
        "Parsed JD: {} skills, {} degrees, industry {industry}",
        must_have_skills.len(),
        degrees_required.len()
    );

    ParsedJD {
        must_have_skills,
        degrees_required,
        experience_required,
        industry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jd_extracts_requirements() {
        let jd = parse_jd(
            "We are hiring a Data Analyst. Requirements: 3+ years with SQL, Python and Tableau. \
             Bachelor or Master degree preferred. 5 years in retail is a plus.",
        );
        assert_eq!(jd.must_have_skills, vec!["Python", "Sql", "Tableau"]);
        assert_eq!(jd.degrees_required, vec!["Bachelor", "Master"]);
        assert_eq!(jd.experience_required, Some(3));
        assert_eq!(jd.industry, "Data Science");
    }

    #[test]
    fn test_title_match_takes_priority_over_skills() {
        let jd = parse_jd("Frontend Engineer wanted: Python, SQL, machine learning.");
        assert_eq!(jd.industry, "Frontend Development");
    }

    #[test]
    fn test_industry_from_skill_votes() {
        let jd = parse_jd("Must know HTML, CSS and React.");
        // html + css vote Web Development, react votes Frontend Development
        assert_eq!(jd.industry, "Web Development");
    }

    #[test]
    fn test_skill_vote_tie_goes_to_first_voted() {
        assert_eq!(infer_industry_from_skills(&["Java", "Python"]), Some("Software Engineering"));
        assert_eq!(infer_industry_from_skills(&["Python", "Java"]), Some("Data Science"));
        assert_eq!(infer_industry_from_skills::<&str>(&[]), None);
    }

    #[test]
    fn test_defaults_when_nothing_matches() {
        let jd = parse_jd("Friendly team, flexible hours.");
        assert!(jd.must_have_skills.is_empty());
        assert!(jd.degrees_required.is_empty());
        assert_eq!(jd.experience_required, None);
        assert_eq!(jd.industry, DEFAULT_INDUSTRY);
    }
}
