// Scoring engine: coverage calculators, policy boosts, rubric integration,
// score composition and confidence intervals.
// All remote rubric calls go through rubric::LlmRubricScorer.

pub mod composer;
pub mod confidence;
pub mod coverage;
pub mod degree;
pub mod handlers;
pub mod policy;
pub mod prompts;
pub mod rounding;
pub mod rubric;
pub mod settings;
