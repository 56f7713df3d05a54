//! Frequency-ranked keyword extraction.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

pub const MAX_KEYWORDS: usize = 10;

/// Tokens this short carry no signal regardless of frequency.
const MIN_TOKEN_CHARS: usize = 4;

/// Common function words and high-frequency verbs excluded from keyword
/// ranking. Short words are already dropped by the length filter.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "that", "this", "with", "from", "have", "has", "had", "here", "there",
        "their", "they", "them", "then", "than", "these", "those", "what", "when", "where",
        "which", "while", "who", "whom", "whose", "will", "would", "could", "should", "shall",
        "might", "must", "been", "being", "were", "was", "are", "also", "very", "just", "like",
        "into", "onto", "over", "under", "about", "above", "after", "before", "between",
        "during", "through", "because", "some", "such", "each", "other", "only", "more", "most",
        "much", "many", "your", "yours", "does", "doing", "done", "make", "makes", "made",
        "take", "takes", "took", "gets", "goes", "went", "come", "came", "said", "says", "going",
        "want", "wants", "know", "knows", "look", "looks", "think", "thinks", "really", "thing",
        "things",
    ]
    .into_iter()
    .collect()
});

/// Extract up to 10 capitalized keywords, ranked by descending frequency.
///
/// Ties keep the order in which tokens were first encountered. Keys are
/// unique words, so duplicates are impossible.
pub fn extract_keywords(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    let mut encounter_order: Vec<&str> = Vec::new();
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_TOKEN_CHARS || STOP_WORDS.contains(token) {
            continue;
        }
        frequency
            .entry(token)
            .and_modify(|n| *n += 1)
            .or_insert_with(|| {
                encounter_order.push(token);
                1
            });
    }

    let mut ranked: Vec<(&str, usize)> = encounter_order
        .iter()
        .map(|&token| (token, frequency[token]))
        .collect();
    // sort_by is stable: equal frequencies keep encounter order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _)| capitalize(token))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
