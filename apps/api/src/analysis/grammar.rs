//! Heuristic grammar and structure checks.
//!
//! Pattern-based only: these flag likely problems for a human to review and
//! make no claim of grammatical correctness.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::truncate_chars;

pub const MAX_GRAMMAR_ISSUES: usize = 25;
pub const MAX_WORDS: usize = 30;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));
static PROSE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z\-']+").expect("valid regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-|\x{2022}|\*|\d+\.)\s+").expect("valid regex"));
static PASSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:was|were|is|are|been|being)\s+\w+(?:ed|en)\b").expect("valid regex")
});

/// Splits after `.`, `!` or `?` followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            let sentence = text[start..idx].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
            prev = Some(' ');
            continue;
        }
        prev = Some(c);
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn word_count(text: &str) -> usize {
    PROSE_WORD_RE.find_iter(text).count()
}

fn extract_bullets(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| BULLET_RE.is_match(line))
        .collect()
}

pub fn repeated_words(text: &str) -> Vec<String> {
    let words: Vec<_> = WORD_RE.find_iter(text).collect();
    let mut issues = Vec::new();
    let mut i = 0;
    while i + 1 < words.len() {
        let (first, second) = (words[i], words[i + 1]);
        let gap = &text[first.end()..second.start()];
        let adjacent = !gap.is_empty() && gap.chars().all(char::is_whitespace);
        if adjacent && first.as_str().to_lowercase() == second.as_str().to_lowercase() {
            let w = first.as_str();
            issues.push(format!("Repeated word detected: “{w} {w}”."));
            i += 2;
        } else {
            i += 1;
        }
    }
    issues
}

pub fn long_sentences(text: &str) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .filter_map(|s| {
            let wc = word_count(s);
            (wc > MAX_WORDS).then(|| {
                format!(
                    "Long sentence ({wc} words), consider splitting: “{}...”",
                    truncate_chars(s, 120)
                )
            })
        })
        .collect()
}

pub fn lowercase_sentence_starts(text: &str) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().next().is_some_and(char::is_lowercase))
        .map(|s| {
            format!(
                "Sentence should start with a capital letter: “{}...”",
                truncate_chars(s, 80)
            )
        })
        .collect()
}

pub fn long_bullets(text: &str) -> Vec<String> {
    extract_bullets(text)
        .into_iter()
        .filter_map(|b| {
            let wc = word_count(b);
            (wc > MAX_WORDS).then(|| {
                format!(
                    "Bullet too long ({wc} words), try splitting or tightening: “{}...”",
                    truncate_chars(b, 120)
                )
            })
        })
        .collect()
}

pub fn passive_voice_hints(text: &str) -> Vec<String> {
    PASSIVE_RE
        .find_iter(text)
        .map(|m| {
            let span = m.as_str().chars().count() + 40;
            let fragment: String = text[m.start()..].chars().take(span).collect();
            format!(
                "Possible passive voice, consider active phrasing: “{}...”",
                truncate_chars(fragment.trim(), 120)
            )
        })
        .collect()
}

/// Bullets of more than four words should agree on a trailing period.
pub fn inconsistent_bullet_punctuation(text: &str) -> Vec<String> {
    let endings: Vec<bool> = extract_bullets(text)
        .into_iter()
        .filter(|b| word_count(b) > 4)
        .map(|b| b.ends_with('.'))
        .collect();

    let any = endings.iter().any(|&e| e);
    let all = endings.iter().all(|&e| e);
    if any && !all {
        vec![
            "Inconsistent punctuation at bullet ends: standardize (either all end with '.' or none)."
                .to_string(),
        ]
    } else {
        Vec::new()
    }
}

/// All checks in a fixed order, capped at `MAX_GRAMMAR_ISSUES`.
pub fn grammar_issues(text: &str) -> Vec<String> {
    let mut issues = repeated_words(text);
    issues.extend(long_sentences(text));
    issues.extend(lowercase_sentence_starts(text));
    issues.extend(long_bullets(text));
    issues.extend(passive_voice_hints(text));
    issues.extend(inconsistent_bullet_punctuation(text));
    issues.truncate(MAX_GRAMMAR_ISSUES);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one.  Second one!\nThird? last");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third?", "last"]);
    }

    #[test]
    fn test_split_keeps_decimals_together() {
        assert_eq!(split_sentences("Grew revenue 2.5x in Q1."), vec!["Grew revenue 2.5x in Q1."]);
    }

    #[test]
    fn test_repeated_words_case_insensitive_and_non_overlapping() {
        let issues = repeated_words("Led the The team. Go go go now.");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0], "Repeated word detected: “the the”.");
        assert!(repeated_words("the theory").is_empty());
        assert!(repeated_words("data, data").is_empty());
    }

    #[test]
    fn test_long_sentence_flagged() {
        let long = format!("{}.", vec!["word"; 31].join(" "));
        let issues = long_sentences(&long);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Long sentence (31 words)"));
        assert!(long_sentences("Short and sweet.").is_empty());
    }

    #[test]
    fn test_lowercase_sentence_start_flagged() {
        let issues = lowercase_sentence_starts("Built APIs. shipped features. SQL EXPERT.");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("shipped features."));
    }

    #[test]
    fn test_long_bullets_flagged() {
        let text = format!("- {}\n- short bullet", vec!["task"; 32].join(" "));
        let issues = long_bullets(&text);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Bullet too long (32 words)"));
    }

    #[test]
    fn test_passive_voice_hint() {
        let issues = passive_voice_hints("The pipeline was designed by the team to scale.");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("was designed"));
    }

    #[test]
    fn test_inconsistent_bullet_punctuation() {
        let mixed = "- Built a data pipeline for sales.\n- Automated the weekly reporting job for finance";
        assert_eq!(inconsistent_bullet_punctuation(mixed).len(), 1);

        let consistent = "- Built a data pipeline for sales\n- Automated the weekly reporting job for finance";
        assert!(inconsistent_bullet_punctuation(consistent).is_empty());

        // bullets of four words or fewer are ignored
        let short = "- Python.\n- SQL and Excel work";
        assert!(inconsistent_bullet_punctuation(short).is_empty());
    }

    #[test]
    fn test_issues_capped() {
        let text = "go go. ".repeat(40);
        assert_eq!(grammar_issues(&text).len(), MAX_GRAMMAR_ISSUES);
    }
}
