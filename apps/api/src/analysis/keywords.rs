//! Keyword statistics over free text.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "while", "with", "without", "within", "into",
    "onto", "from", "to", "of", "for", "in", "on", "at", "by", "as", "is", "are", "was", "were",
    "be", "been", "being", "this", "that", "those", "these", "it", "its", "your", "you", "we",
    "they", "them", "our", "their", "there", "here",
];

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z][a-z0-9.\-+#]*").expect("valid regex"));

/// Lowercased tokens longer than two characters, stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() > 2 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// The `k` most frequent tokens, most frequent first. Equal counts keep
/// first-occurrence order.
pub fn top_keywords(text: &str, k: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(text) {
        let count = counts.entry(token.clone()).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // stable sort keeps first-occurrence order among ties
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(k);
    order
}
