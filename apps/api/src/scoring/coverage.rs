//! Coverage calculators: normalized [0, 1] match ratios between a résumé and a JD.

use std::collections::BTreeSet;

use crate::models::resume::normalize_skills;
use crate::scoring::degree::DegreeLadder;

/// Coverage reported when the JD is silent on an axis.
pub const NEUTRAL_COVERAGE: f64 = 0.6;
/// Credit for a degree exactly one level below the requirement.
pub const ONE_LEVEL_BELOW_CREDIT: f64 = 0.6;
/// Floor of the partial-credit curve for experience shortfalls.
pub const EXPERIENCE_FLOOR: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillsCoverage {
    pub coverage: f64,
    pub matched: u32,
    pub required: u32,
    /// Required skills the résumé lacks, sorted.
    pub missing: Vec<String>,
}

/// |R ∩ J| / |J| over normalized sets; neutral when the JD lists no skills.
pub fn skills_coverage<S: AsRef<str>>(resume_skills: &BTreeSet<String>, jd_skills: &[S]) -> SkillsCoverage {
    let required = normalize_skills(jd_skills);
    if required.is_empty() {
        return SkillsCoverage {
            coverage: NEUTRAL_COVERAGE,
            matched: 0,
            required: 0,
            missing: Vec::new(),
        };
    }

    let matched = required.intersection(resume_skills).count() as u32;
    let missing = required.difference(resume_skills).cloned().collect();
    let total = required.len() as u32;

    SkillsCoverage {
        coverage: f64::from(matched) / f64::from(total),
        matched,
        required: total,
        missing,
    }
}

/// Degree coverage on the coarse ladder: 1.0 at or above, 0.6 one level below, else 0.0.
///
/// Returns 0.0 when either side cannot be placed above the diploma rung.
pub fn degree_coverage<S: AsRef<str>>(ladder: &DegreeLadder, education: &str, jd_degrees: &[S]) -> f64 {
    if education.trim().is_empty() || jd_degrees.is_empty() {
        return 0.0;
    }

    let have = ladder.rank(Some(education)).max(0);
    let required = jd_degrees
        .iter()
        .map(|d| ladder.rank(Some(d.as_ref())).max(0))
        .max()
        .unwrap_or(0);

    if have == 0 || required == 0 {
        return 0.0;
    }
    if have >= required {
        1.0
    } else if have == required - 1 {
        ONE_LEVEL_BELOW_CREDIT
    } else {
        0.0
    }
}

/// Experience coverage with a 0.4 floor for shortfalls and no credit above 1.0.
pub fn experience_coverage(resume_years: Option<u32>, required_years: Option<u32>) -> f64 {
    let required = match required_years {
        Some(r) if r > 0 => r,
        _ => return NEUTRAL_COVERAGE,
    };
    let have = match resume_years {
        Some(y) => y,
        None => return 0.0,
    };
    if have >= required {
        return 1.0;
    }
    let ratio = (f64::from(have) / f64::from(required)).clamp(0.0, 1.0);
    EXPERIENCE_FLOOR + (1.0 - EXPERIENCE_FLOOR) * ratio
}
