//! Résumé extractor: turns an uploaded document into a `ParsedResume`.
//!
//! Extraction is keyword-driven and deterministic: the same bytes always
//! produce the same record, so scores stay reproducible across runs.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::models::resume::ParsedResume;
use crate::text::title_case;

const KNOWN_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "c++",
    "c#",
    "sql",
    "html",
    "css",
    "machine learning",
    "deep learning",
    "nlp",
    "flask",
    "django",
    "react",
    "excel",
    "power bi",
    "tableau",
];

static CRLF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n").expect("valid regex"));
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));
static INLINE_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});
pub(crate) static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\+?\s+year").expect("valid regex"));

/// Education patterns, tried in order: bachelor-level, master-level, doctorate-level.
static EDUCATION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:bachelor|b\.?tech|b\.?sc|b\.e\b)",
        r"\b(?:master|m\.?tech|m\.?sc|m\.e\b)",
        r"\b(?:ph\.?d|doctorate)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    Pdf(String),
}

/// Supported upload formats, decided by extension and then by content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    pub fn detect(file_name: &str, bytes: &[u8]) -> Result<Self, ExtractError> {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" => Ok(DocumentKind::Text),
            _ if bytes.starts_with(b"%PDF") => Ok(DocumentKind::Pdf),
            "" => Err(ExtractError::UnsupportedFormat(
                "file has no extension (pdf, txt allowed)".to_string(),
            )),
            other => Err(ExtractError::UnsupportedFormat(format!(
                ".{other} (pdf, txt allowed)"
            ))),
        }
    }
}

/// Normalizes line breaks and whitespace: CRLF → LF, runs of blank lines
/// collapse to one, runs of spaces/tabs collapse to a single space.
pub fn clean_text(text: &str) -> String {
    let text = CRLF_RE.replace_all(text, "\n");
    let text = BLANK_LINES_RE.replace_all(&text, "\n\n");
    let text = INLINE_SPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Raw document text, cleaned. PDF parsing is CPU-bound; call from a blocking task.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractError> {
    let raw = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Pdf(e.to_string()))?,
        DocumentKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(clean_text(&raw))
}

pub fn detect_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| lower.contains(*skill))
        .map(|skill| title_case(skill))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Most frequently mentioned "N years" value; earliest mention wins a tie.
/// Returns 0 when the text never mentions years.
pub fn estimate_experience(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let mut counts: Vec<(u32, usize)> = Vec::new();
    for caps in YEARS_RE.captures_iter(&lower) {
        let Ok(years) = caps[1].parse::<u32>() else {
            continue;
        };
        match counts.iter_mut().find(|(value, _)| *value == years) {
            Some((_, count)) => *count += 1,
            None => counts.push((years, 1)),
        }
    }

    let mut best: Option<(u32, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value).unwrap_or(0)
}

pub fn extract_education(text: &str) -> String {
    let lower = text.to_lowercase();
    EDUCATION_RES
        .iter()
        .find_map(|re| re.find(&lower))
        .map(|m| title_case(m.as_str()))
        .unwrap_or_default()
}

/// Builds a `ParsedResume` from already-extracted text.
pub fn parse_resume_text(text: &str, file_name: Option<String>) -> ParsedResume {
    let raw_text = clean_text(text);
    ParsedResume {
        file_name,
        email: extract_email(&raw_text),
        skills: detect_skills(&raw_text),
        experience_years: Some(estimate_experience(&raw_text)),
        education: extract_education(&raw_text),
        raw_text,
    }
}

/// Full pipeline for an uploaded file: detect format, extract, parse.
pub fn parse_resume_file(file_name: &str, bytes: &[u8]) -> Result<ParsedResume, ExtractError> {
    let kind = DocumentKind::detect(file_name, bytes)?;
    let text = extract_text(kind, bytes)?;
    let parsed = parse_resume_text(&text, Some(file_name.to_string()));
    info!(
        "Processed resume: {} ({} chars, {} skills found)",
        file_name,
        parsed.raw_text.chars().count(),
        parsed.skills.len()
    );
    Ok(parsed)
}
