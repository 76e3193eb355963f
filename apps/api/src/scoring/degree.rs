//! Degree ladder: maps free-text education strings to an ordinal level.
//!
//! Classification is a substring scan over a priority-ordered keyword table.
//! The first keyword found wins, so "Bachelor's, pursuing Master's" resolves
//! to whichever keyword sits earlier in the table. Short abbreviations such
//! as "ms" and "be" only match as whole words, so "systems" or "cyber" do not
//! resolve to a degree.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Diploma,
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    /// 0 = diploma, 1 = bachelor, 2 = master, 3 = doctorate.
    pub fn rank(self) -> i32 {
        match self {
            DegreeLevel::Diploma => 0,
            DegreeLevel::Bachelor => 1,
            DegreeLevel::Master => 2,
            DegreeLevel::Doctorate => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderRung {
    pub keyword: String,
    pub level: DegreeLevel,
    /// Match only when not embedded in a longer alphanumeric run.
    #[serde(default)]
    pub whole_word: bool,
}

impl LadderRung {
    fn matches(&self, text: &str) -> bool {
        let keyword = self.keyword.as_str();
        if !self.whole_word {
            return text.contains(keyword);
        }
        text.match_indices(keyword).any(|(start, _)| {
            let before = text[..start].chars().next_back();
            let after = text[start + keyword.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
    }
}

/// Priority-ordered keyword table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DegreeLadder {
    pub rungs: Vec<LadderRung>,
}

const DEFAULT_RUNGS: &[(&str, DegreeLevel)] = &[
    ("phd", DegreeLevel::Doctorate),
    ("ph.d", DegreeLevel::Doctorate),
    ("doctorate", DegreeLevel::Doctorate),
    ("doctor", DegreeLevel::Doctorate),
    ("master", DegreeLevel::Master),
    ("m.sc", DegreeLevel::Master),
    ("msc", DegreeLevel::Master),
    ("mtech", DegreeLevel::Master),
    ("m.tech", DegreeLevel::Master),
    ("m.e", DegreeLevel::Master),
    ("ms", DegreeLevel::Master),
    ("bachelor", DegreeLevel::Bachelor),
    ("b.sc", DegreeLevel::Bachelor),
    ("bsc", DegreeLevel::Bachelor),
    ("btech", DegreeLevel::Bachelor),
    ("b.tech", DegreeLevel::Bachelor),
    ("b.e", DegreeLevel::Bachelor),
    ("be", DegreeLevel::Bachelor),
    ("diploma", DegreeLevel::Diploma),
];

const WHOLE_WORD_RUNGS: &[&str] = &["ms", "be"];

impl Default for DegreeLadder {
    fn default() -> Self {
        Self {
            rungs: DEFAULT_RUNGS
                .iter()
                .map(|(keyword, level)| LadderRung {
                    keyword: keyword.to_string(),
                    level: *level,
                    whole_word: WHOLE_WORD_RUNGS.contains(keyword),
                })
                .collect(),
        }
    }
}

impl DegreeLadder {
    /// First rung whose keyword occurs in `text` (case-insensitive).
    pub fn classify(&self, text: &str) -> Option<DegreeLevel> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }
        self.rungs
            .iter()
            .find(|rung| rung.matches(&text))
            .map(|rung| rung.level)
    }

    /// Rank on the −1..3 scale; −1 when nothing on the ladder matches.
    pub fn rank(&self, text: Option<&str>) -> i32 {
        text.and_then(|t| self.classify(t))
            .map(DegreeLevel::rank)
            .unwrap_or(-1)
    }
}
