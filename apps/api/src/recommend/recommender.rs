//! Job recommender: filters open postings and ranks them by a weighted
//! composite of skill overlap, degree bonus and experience bonus.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::models::job::{JobPosting, RecommendedJob};
use crate::models::resume::normalize_skills;
use crate::scoring::degree::DegreeLadder;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendWeights {
    #[serde(default = "default_weight_skills")]
    pub skills: u32,
    #[serde(default = "default_weight_bonus")]
    pub degree: u32,
    #[serde(default = "default_weight_bonus")]
    pub experience: u32,
}

fn default_weight_skills() -> u32 {
    3
}

fn default_weight_bonus() -> u32 {
    1
}

impl Default for RecommendWeights {
    fn default() -> Self {
        Self {
            skills: default_weight_skills(),
            degree: default_weight_bonus(),
            experience: default_weight_bonus(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendFilters {
    #[serde(default = "default_min_overlap")]
    pub min_overlap: u32,
    /// Every listed skill must appear in the posting.
    #[serde(default)]
    pub must_have_skills: Vec<String>,
    /// Reject postings that earn no degree bonus.
    #[serde(default)]
    pub require_degree: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_min_overlap() -> u32 {
    2
}

fn default_limit() -> usize {
    5
}

impl Default for RecommendFilters {
    fn default() -> Self {
        Self {
            min_overlap: default_min_overlap(),
            must_have_skills: Vec::new(),
            require_degree: false,
            limit: default_limit(),
        }
    }
}

/// Ranks `catalog` for a résumé. Only postings with status "open" are considered.
///
/// Survivors are sorted descending by (composite_score, match_count, created_at)
/// and truncated to `filters.limit`. An empty result is not an error.
pub fn recommend<S: AsRef<str>>(
    ladder: &DegreeLadder,
    resume_skills: &[S],
    resume_degree: Option<&str>,
    resume_experience: Option<u32>,
    catalog: &[JobPosting],
    weights: &RecommendWeights,
    filters: &RecommendFilters,
) -> Vec<RecommendedJob> {
    let resume_skills = normalize_skills(resume_skills);
    let must_have = normalize_skills(&filters.must_have_skills);
    let resume_rank = ladder.rank(resume_degree);

    let mut ranked: Vec<RecommendedJob> = catalog
        .iter()
        .filter(|job| job.is_open())
        .filter_map(|job| {
            score_posting(
                ladder,
                &resume_skills,
                resume_rank,
                resume_experience,
                &must_have,
                job,
                weights,
                filters,
            )
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite_score
            .cmp(&a.composite_score)
            .then_with(|| b.match_count.cmp(&a.match_count))
            .then_with(|| b.job.created_at.cmp(&a.job.created_at))
    });
    ranked.truncate(filters.limit);
    ranked
}

#[allow(clippy::too_many_arguments)]
fn score_posting(
    ladder: &DegreeLadder,
    resume_skills: &BTreeSet<String>,
    resume_rank: i32,
    resume_experience: Option<u32>,
    must_have: &BTreeSet<String>,
    job: &JobPosting,
    weights: &RecommendWeights,
    filters: &RecommendFilters,
) -> Option<RecommendedJob> {
    let job_skills = normalize_skills(&job.skills);
    let matched_skills: Vec<String> = job_skills.intersection(resume_skills).cloned().collect();
    let match_count = matched_skills.len() as u32;

    if match_count < filters.min_overlap {
        return None;
    }
    if !must_have.is_subset(&job_skills) {
        return None;
    }

    let job_rank = ladder.rank(job.degree_required.as_deref());
    let degree_bonus = if resume_rank >= 0 && job_rank >= 0 && resume_rank >= job_rank {
        weights.degree
    } else {
        0
    };
    if filters.require_degree && degree_bonus == 0 {
        return None;
    }

    let exp_bonus = match (resume_experience, job.min_experience) {
        (Some(have), Some(min)) if f64::from(have) >= min => weights.experience,
        _ => 0,
    };

    // Weights arrive unbounded from request bodies; saturate instead of wrapping.
    let composite_score = weights
        .skills
        .saturating_mul(match_count)
        .saturating_add(degree_bonus)
        .saturating_add(exp_bonus);

    let mut job = job.clone();
    job.skills = job_skills.into_iter().collect();

    Some(RecommendedJob {
        job,
        matched_skills,
        match_count,
        degree_bonus,
        exp_bonus,
        composite_score,
    })
}
