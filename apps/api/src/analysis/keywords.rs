//! Keyword Extractor — turns a raw job description into a ranked keyword list.
//!
//! Language-naive frequency count over Unicode letters and digits. Tokens such as
//! `c++`, `c#` and `node.js` survive the cleanup. Ties keep first-seen order.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MAX_KEYWORDS: usize = 35;
pub const MIN_TOKEN_CHARS: usize = 3;

/// Everything that is not a letter, digit, whitespace or one of `+ # . -`.
static NON_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s+#.\-]+").expect("keyword cleanup pattern is valid")
});

/// English and Arabic function words that never rank as keywords.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "you", "your", "are", "our", "from", "that", "this", "will",
    "have", "can", "skills", "work", "team", "join", "year", "years", "من", "في", "عن", "على",
    "الى", "إلى", "مع", "هذا", "ان", "أن", "لا", "ما", "هو", "هي", "هم",
];

/// A keyword and how often it occurs in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub frequency: u32,
}

/// Ranks the keywords of `text` by descending frequency, at most `MAX_KEYWORDS`.
pub fn rank_keywords(text: &str) -> Vec<KeywordCount> {
    let lowered = text.to_lowercase();
    let cleaned = NON_TOKEN.replace_all(&lowered, " ");

    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_TOKEN_CHARS || is_stop_word(token) || is_numeric(token) {
            continue;
        }
        match position.get(token) {
            Some(&i) => counts[i].frequency += 1,
            None => {
                position.insert(token, counts.len());
                counts.push(KeywordCount {
                    keyword: token.to_string(),
                    frequency: 1,
                });
            }
        }
    }

    // Stable: equal frequencies stay in first-seen order.
    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts.truncate(MAX_KEYWORDS);
    counts
}

/// The ranked keyword strings of `text`, most frequent first.
pub fn extract_keywords(text: &str) -> Vec<String> {
    rank_keywords(text)
        .into_iter()
        .map(|entry| entry.keyword)
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}
