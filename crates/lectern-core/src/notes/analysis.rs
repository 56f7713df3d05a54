//! Shared sentence-level heuristics used by all five note renderers.
//!
//! The thresholds and weights here define the behavior; there is no deeper
//! semantic model behind them.

use std::sync::LazyLock;

use regex::Regex;

pub const MAX_TOPICS: usize = 8;
pub const MAX_KEY_POINTS: usize = 10;

const SUMMARY_MAX_SENTENCES: usize = 3;
const SUMMARY_MAX_CHARS: usize = 200;
const SUMMARY_MIN_SENTENCE_CHARS: usize = 20;
const SUMMARY_FALLBACK_CHARS: usize = 150;

const TOPIC_MIN_CHARS: usize = 20;
const TOPIC_SHORT_WORD_LIMIT: usize = 20;

const KEY_POINT_MIN_CHARS: usize = 15;
const KEY_POINT_KEEP_SCORE: i32 = 2;
const KEY_POINT_BACKFILL_TARGET: usize = 5;

static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Sentences that introduce a new subject tend to open with ordinal or
/// transition cues, or name the subject outright.
static TOPIC_INDICATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(first|firstly|second|secondly|third|thirdly|next|then|finally|lastly)\b",
        r"(?i)\b(begin|begins|beginning|start|starts|starting|introduce|introduces|introducing)\b",
        r"(?i)\b(however|moreover|furthermore|additionally|consequently|therefore|thus)\b",
        r"(?i)\b(important|importantly|significant|essential|crucial|critical|key|main|primary)\b",
        r"(?i)\b(topic|subject|concept|principle|theory|idea|theme)\b",
        r"(?i)\b(method|approach|technique|process|system|model|framework)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Words that mark a sentence as explicitly important (+2 each).
static IMPORTANCE_WORDS: &[&str] = &[
    "important",
    "significant",
    "key",
    "main",
    "primary",
    "essential",
    "crucial",
    "critical",
    "fundamental",
    "remember",
    "note",
];

pub static DEFINITION_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(is|are|was|were|means|refers to|defined as|consists of|known as|represents)\b")
        .unwrap()
});

pub static CAUSAL_CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(because|therefore|as a result|leads to|leading to|causes|caused by|due to|consequently|results in)\b",
    )
    .unwrap()
});

/// Split text on sentence-terminal punctuation, dropping empty fragments.
pub fn sentences(content: &str) -> Vec<String> {
    SENTENCE_BOUNDARY
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Short extractive summary: sentences in order until 3 are used or the
/// accumulated length would pass ~200 characters. Falls back to the first
/// 150 raw characters plus an ellipsis when nothing qualifies.
pub fn extractive_summary(content: &str) -> String {
    let mut picked: Vec<String> = Vec::new();
    let mut total_chars = 0usize;

    for sentence in sentences(content) {
        let chars = sentence.chars().count();
        if chars < SUMMARY_MIN_SENTENCE_CHARS {
            continue;
        }
        if picked.len() == SUMMARY_MAX_SENTENCES {
            break;
        }
        if !picked.is_empty() && total_chars + chars > SUMMARY_MAX_CHARS {
            break;
        }
        total_chars += chars;
        picked.push(sentence);
    }

    if picked.is_empty() {
        let prefix: String = content.trim().chars().take(SUMMARY_FALLBACK_CHARS).collect();
        return format!("{prefix}...");
    }

    format!("{}.", picked.join(". "))
}

/// Sentences that introduce a new subject: longer than 20 characters and
/// either matching a topic-indicator pattern or short enough (under 20
/// words) to read as a heading. Capped at 8, in document order.
pub fn main_topics(content: &str) -> Vec<String> {
    let mut topics = Vec::new();
    for sentence in sentences(content) {
        if sentence.chars().count() <= TOPIC_MIN_CHARS {
            continue;
        }
        let word_count = sentence.split_whitespace().count();
        let indicated = TOPIC_INDICATORS.iter().any(|re| re.is_match(&sentence));
        if indicated || word_count < TOPIC_SHORT_WORD_LIMIT {
            topics.push(sentence);
            if topics.len() == MAX_TOPICS {
                break;
            }
        }
    }
    topics
}

/// Heuristically important sentences.
///
/// Scoring per sentence (>15 chars): +2 per importance keyword present,
/// +1 for a digit, +1 for a copula/definition verb, +1 for a length in
/// [30, 200). Sentences scoring >= 2 are kept; if fewer than 5 survive,
/// medium-length (40-150 char) sentences backfill the list. Capped at 10,
/// in document order.
pub fn key_points(content: &str) -> Vec<String> {
    let all = sentences(content);
    let mut kept_indices: Vec<usize> = Vec::new();

    for (index, sentence) in all.iter().enumerate() {
        let chars = sentence.chars().count();
        if chars <= KEY_POINT_MIN_CHARS {
            continue;
        }
        if score_sentence(sentence, chars) >= KEY_POINT_KEEP_SCORE {
            kept_indices.push(index);
        }
    }

    if kept_indices.len() < KEY_POINT_BACKFILL_TARGET {
        for (index, sentence) in all.iter().enumerate() {
            if kept_indices.len() >= KEY_POINT_BACKFILL_TARGET {
                break;
            }
            if kept_indices.contains(&index) {
                continue;
            }
            let chars = sentence.chars().count();
            if (40..=150).contains(&chars) {
                kept_indices.push(index);
            }
        }
        kept_indices.sort_unstable();
    }

    kept_indices
        .into_iter()
        .take(MAX_KEY_POINTS)
        .map(|index| all[index].clone())
        .collect()
}

fn score_sentence(sentence: &str, chars: usize) -> i32 {
    let lower = sentence.to_lowercase();
    let mut score = 0i32;
    score += 2 * IMPORTANCE_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .count() as i32;
    if sentence.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if DEFINITION_VERB.is_match(sentence) {
        score += 1;
    }
    if (30..200).contains(&chars) {
        score += 1;
    }
    score
}
