// Deterministic text analysis: résumé extraction, JD analysis, keyword
// statistics, grammar heuristics and the improvement advisor built on them.
// Nothing in here calls the LLM.

pub mod grammar;
pub mod handlers;
pub mod improve;
pub mod jd_parser;
pub mod keywords;
pub mod resume_parser;
