//! Score composer: blends the deterministic JD match with the rubric overall,
//! then applies policy boosts.
//!
//! Order matters: boosts are added after blending and the sum is clamped
//! once, at the top.

use tracing::{debug, warn};

use crate::models::jd::ParsedJD;
use crate::models::resume::ParsedResume;
use crate::models::score::{JdIntegration, JdMatchDetails, ScoreResult};
use crate::scoring::confidence::confidence_interval;
use crate::scoring::coverage::{degree_coverage, experience_coverage, skills_coverage};
use crate::scoring::policy::PolicyBoosts;
use crate::scoring::rounding::round_half_even;
use crate::scoring::rubric::{FallbackRubricScorer, RubricScore, RubricScorer};
use crate::scoring::settings::ScoringConfig;
use crate::text::title_case;

pub const NOTE_ADD_EXPERIENCE: &str = "Add relevant work or project experience to strengthen your resume and improve your score against industry benchmarks.";
pub const NOTE_ADD_EDUCATION: &str = "Include your education details to improve benchmark comparisons.";

/// Deterministic résumé/JD alignment, before any rubric input.
#[derive(Debug, Clone, PartialEq)]
pub struct JdAlignment {
    pub skills_coverage: f64,
    pub skills_matched: u32,
    pub skills_required: u32,
    pub missing_skills: Vec<String>,
    pub degree_coverage: f64,
    pub experience_coverage: f64,
    pub jd_match_score: u32,
    pub degree_requirement_met: bool,
    pub experience_shortfall_years: u32,
}

pub fn compute_alignment(
    config: &ScoringConfig,
    resume: &ParsedResume,
    jd: Option<&ParsedJD>,
) -> JdAlignment {
    let (jd_skills, jd_degrees, jd_experience): (&[String], &[String], Option<u32>) = match jd {
        Some(jd) => (
            jd.must_have_skills.as_slice(),
            jd.degrees_required.as_slice(),
            jd.experience_required,
        ),
        None => (&[], &[], None),
    };

    let skills = skills_coverage(&resume.skill_set(), jd_skills);
    let degree = degree_coverage(&config.degree_ladder, &resume.education, jd_degrees);
    let experience = experience_coverage(resume.experience_years, jd_experience);

    let w = &config.weights;
    let jd_match_score = round_half_even(
        (skills.coverage * w.skills + experience * w.experience + degree * w.degree) * 100.0,
    );

    let experience_shortfall_years = jd_experience
        .map(|required| required.saturating_sub(resume.experience_years.unwrap_or(0)))
        .unwrap_or(0);

    JdAlignment {
        skills_coverage: skills.coverage,
        skills_matched: skills.matched,
        skills_required: skills.required,
        missing_skills: skills.missing,
        degree_coverage: degree,
        experience_coverage: experience,
        jd_match_score,
        degree_requirement_met: !jd_degrees.is_empty() && degree >= 1.0,
        experience_shortfall_years,
    }
}

/// `round(rubric_weight × rubric + jd_weight × jd_match)`, before boosts.
pub fn blend(config: &ScoringConfig, rubric_overall: u32, jd_match_score: u32) -> u32 {
    let w = &config.weights;
    round_half_even(w.rubric * f64::from(rubric_overall) + w.jd_match * f64::from(jd_match_score))
}

/// Adds the boosts to a blended score and clamps to [0, 100].
pub fn apply_boosts(blended: u32, boosts: &PolicyBoosts) -> u32 {
    (blended + boosts.total()).min(100)
}

fn improvement_notes(resume: &ParsedResume) -> Vec<String> {
    let mut notes = Vec::new();
    if resume.experience_years.unwrap_or(0) == 0 {
        notes.push(NOTE_ADD_EXPERIENCE.to_string());
    }
    if !resume.has_education() {
        notes.push(NOTE_ADD_EDUCATION.to_string());
    }
    notes
}

/// Assembles the final result from the deterministic parts and a rubric score.
pub fn compose(
    config: &ScoringConfig,
    resume: &ParsedResume,
    job_role: &str,
    jd: Option<&ParsedJD>,
    rubric: RubricScore,
    backend: &str,
) -> ScoreResult {
    let alignment = compute_alignment(config, resume, jd);
    let boosts = config.policy.evaluate(resume, jd);

    let blended = blend(config, rubric.overall, alignment.jd_match_score);
    let overall = apply_boosts(blended, &boosts);

    let data_points = alignment.skills_matched + resume.sections_present();
    let interval = confidence_interval(overall, data_points);

    debug!(
        "Composed score: rubric={} jd_match={} blended={} industry_boost={} jd_boost={} overall={}",
        rubric.overall,
        alignment.jd_match_score,
        blended,
        boosts.industry_boost,
        boosts.jd_specific_boost,
        overall
    );

    ScoreResult {
        overall,
        keywords: rubric.keywords,
        formatting: rubric.formatting,
        grammar: rubric.grammar,
        job_role: job_role.to_string(),
        rubric_overall: rubric.overall,
        scorer_backend: backend.to_string(),
        warning: rubric.warning,
        jd_match_details: JdMatchDetails {
            jd_match_score: alignment.jd_match_score,
            skills_matched: alignment.skills_matched,
            skills_required: alignment.skills_required,
            skills_coverage: round_half_even(alignment.skills_coverage * 100.0),
            exp_alignment: round_half_even(alignment.experience_coverage * 100.0),
            degree_alignment: round_half_even(alignment.degree_coverage * 100.0),
            degree_requirement_met: alignment.degree_requirement_met,
            experience_shortfall_years: alignment.experience_shortfall_years,
        },
        confidence_interval: interval,
        jd_integration: JdIntegration {
            industry_detected: title_case(&boosts.industry),
            jd_specific_boost_applied: boosts.jd_specific_boost,
            industry_boost_applied: boosts.industry_boost,
            degree_requirement_met: alignment.degree_requirement_met,
            experience_shortfall_years: alignment.experience_shortfall_years,
            missing_skills: alignment.missing_skills,
        },
        improvement_notes: improvement_notes(resume),
    }
}

/// Scores a résumé, optionally against a JD. Never fails: a rubric error
/// becomes the local fallback and a warning in the result.
pub async fn score(
    config: &ScoringConfig,
    rubric: &dyn RubricScorer,
    resume: &ParsedResume,
    job_role: &str,
    jd: Option<&ParsedJD>,
) -> ScoreResult {
    let (rubric_score, backend) = match rubric.evaluate(resume, job_role, jd).await {
        Ok(score) => (score, rubric.backend()),
        Err(e) => {
            warn!("Rubric scorer ({}) failed, using fallback: {e}", rubric.backend());
            let fallback = FallbackRubricScorer.score(resume, job_role, jd);
            (fallback, FallbackRubricScorer.backend())
        }
    };

    compose(config, resume, job_role, jd, rubric_score, backend)
}
