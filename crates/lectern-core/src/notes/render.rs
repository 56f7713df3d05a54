//! The five note-format renderers.
//!
//! Each consumes the same (content, title) pair, calls the shared extractors
//! from `analysis` and `keywords`, and deterministically assembles a
//! markup-formatted string (`#`/`##`/`###` headers, `•` and `  -` bullets,
//! `N.`/`A.` ordered markers, `**bold**` spans).

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::NoteFormat;
use crate::notes::analysis::{
    extractive_summary, key_points, main_topics, sentences, CAUSAL_CONNECTIVE, DEFINITION_VERB,
};
use crate::notes::keywords::extract_keywords;

const MAX_QA_PAIRS: usize = 8;
const MAX_CONCEPT_SUPPORT: usize = 8;
const EXEC_SUMMARY_MIN_SENTENCE_CHARS: usize = 10;
const CONCEPT_SENTENCE_MAX_CHARS: usize = 200;
const OUTLINE_SHARED_WORD_MIN_CHARS: usize = 4;

static INTERROGATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(what|why|how|when|where|which|who)\b").unwrap());
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+(.+)$").unwrap());

/// Render the note content for one format. Never empty for non-empty input.
pub fn render(format: NoteFormat, title: &str, content: &str) -> String {
    match format {
        NoteFormat::Summary => summary_notes(title, content),
        NoteFormat::Bullets => bullet_notes(title, content),
        NoteFormat::Concepts => concept_notes(title, content),
        NoteFormat::Qna => qa_notes(title, content),
        NoteFormat::Outline => outline_notes(title, content),
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

fn summary_notes(title: &str, content: &str) -> String {
    let mut out = format!("# {title}\n\n## Executive Summary\n\n");

    let qualifying: Vec<String> = sentences(content)
        .into_iter()
        .filter(|s| s.chars().count() > EXEC_SUMMARY_MIN_SENTENCE_CHARS)
        .collect();
    if qualifying.is_empty() {
        out.push_str(&extractive_summary(content));
    } else {
        let exec: Vec<&str> = qualifying.iter().take(3).map(String::as_str).collect();
        out.push_str(&format!("{}.", exec.join(". ")));
    }
    out.push_str("\n\n## Main Topics\n\n");

    let topics = main_topics(content);
    if topics.is_empty() {
        out.push_str("No distinct topics were identified in this material.\n");
    } else {
        for (i, topic) in topics.iter().enumerate() {
            out.push_str(&format!("{}. {topic}\n", i + 1));
        }
    }
    out.push_str("\n## Key Points\n\n");

    let points = key_points(content);
    if points.is_empty() {
        out.push_str("No standout points were identified; review the full transcript.\n");
    } else {
        for point in &points {
            out.push_str(&format!("• {point}\n"));
        }
    }
    out.push_str("\n## Conclusion\n\n");

    let all = sentences(content);
    if all.is_empty() {
        out.push_str("The material ends without a distinct conclusion.");
    } else {
        let tail: Vec<&str> = all
            .iter()
            .skip(all.len().saturating_sub(2))
            .map(String::as_str)
            .collect();
        out.push_str(&format!("{}.", tail.join(". ")));
    }

    out
}

// ---------------------------------------------------------------------------
// Bullets
// ---------------------------------------------------------------------------

fn bullet_notes(title: &str, content: &str) -> String {
    let mut out = format!("# {title}\n\n## Main Topics\n\n");

    let topics = main_topics(content);
    if topics.is_empty() {
        out.push_str("• **General discussion** (no distinct topics identified)\n");
    } else {
        for topic in &topics {
            out.push_str(&format!("• **{topic}**\n"));
        }
    }
    out.push_str("\n## Key Points\n\n");

    let points = key_points(content);
    if points.is_empty() {
        out.push_str("• No standout points were identified in this material.\n");
    } else {
        for point in &points {
            out.push_str(&format!("• {point}\n"));
        }
    }

    // Numbered lists already present in the source are kept verbatim,
    // re-bulleted.
    let listed: Vec<&str> = NUMBERED_ITEM
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim()))
        .collect();
    if !listed.is_empty() {
        out.push_str("\n## Listed Items\n\n");
        for item in listed {
            out.push_str(&format!("  - {item}\n"));
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Concepts
// ---------------------------------------------------------------------------

fn concept_notes(title: &str, content: &str) -> String {
    let mut out = format!("# {title}\n\n## Key Concepts\n\n");

    let keywords = extract_keywords(content);
    let all = sentences(content);
    if keywords.is_empty() {
        out.push_str("No recurring concepts were identified in this material.\n");
    }
    for keyword in &keywords {
        out.push_str(&format!("### {keyword}\n\n"));
        let lower_kw = keyword.to_lowercase();
        let supporting = all.iter().find(|s| {
            s.to_lowercase().contains(&lower_kw)
                && s.chars().count() < CONCEPT_SENTENCE_MAX_CHARS
        });
        match supporting {
            Some(sentence) => out.push_str(&format!("{sentence}.\n\n")),
            None => out.push_str(
                "This concept recurs throughout the material; see the full transcript for \
                 context.\n\n",
            ),
        }
    }

    out.push_str("## Definitions\n\n");
    let definitions: Vec<&String> = all
        .iter()
        .filter(|s| DEFINITION_VERB.is_match(s))
        .take(MAX_CONCEPT_SUPPORT)
        .collect();
    if definitions.is_empty() {
        out.push_str("No explicit definitions were found.\n");
    } else {
        for sentence in definitions {
            out.push_str(&format!("• {sentence}\n"));
        }
    }

    out.push_str("\n## Cause & Effect\n\n");
    let causal: Vec<&String> = all
        .iter()
        .filter(|s| CAUSAL_CONNECTIVE.is_match(s))
        .take(MAX_CONCEPT_SUPPORT)
        .collect();
    if causal.is_empty() {
        out.push_str("No cause-and-effect relationships were found.");
    } else {
        for sentence in causal {
            out.push_str(&format!("• {sentence}\n"));
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Q&A
// ---------------------------------------------------------------------------

fn qa_notes(title: &str, content: &str) -> String {
    let mut out = format!("# {title}\n\n## Questions & Answers\n\n");

    let points = key_points(content);
    let mut pairs: Vec<(String, String)> = Vec::new();

    for point in &points {
        if pairs.len() == MAX_QA_PAIRS.saturating_sub(2) {
            break;
        }
        pairs.push((synthesize_question(point), format!("{point}.")));
    }

    // Two fixed questions about the material as a whole.
    if pairs.len() < MAX_QA_PAIRS {
        pairs.push((
            "What is the overall topic of this material?".into(),
            extractive_summary(content),
        ));
    }
    if pairs.len() < MAX_QA_PAIRS {
        let takeaways = if points.is_empty() {
            extractive_summary(content)
        } else {
            format!("{}.", points.iter().take(3).cloned().collect::<Vec<_>>().join(". "))
        };
        pairs.push(("What are the key takeaways?".into(), takeaways));
    }

    for (i, (question, answer)) in pairs.iter().enumerate() {
        out.push_str(&format!("{}. **{question}**\nA. {answer}\n\n", i + 1));
    }

    out.trim_end().to_string()
}

/// Turn a key point into a question.
///
/// The string-slicing around verb positions can produce clumsy grammar for
/// some inputs; that is accepted, there is no correctness criterion for
/// question phrasing.
fn synthesize_question(point: &str) -> String {
    if INTERROGATIVE.is_match(point) {
        let trimmed = point.trim_end();
        return if trimmed.ends_with('?') {
            trimmed.to_string()
        } else {
            format!("{trimmed}?")
        };
    }

    if let Some(found) = DEFINITION_VERB.find(point) {
        let subject = point[..found.start()].trim();
        if !subject.is_empty() {
            return format!(
                "What {} {}?",
                found.as_str().to_lowercase(),
                lowercase_first(subject)
            );
        }
    }

    if let Some(found) = CAUSAL_CONNECTIVE.find(point) {
        let effect = point[..found.start()].trim().trim_end_matches(',');
        if !effect.is_empty() {
            return format!("What explains the fact that {}?", lowercase_first(effect));
        }
    }

    let snippet: Vec<&str> = point.split_whitespace().take(8).collect();
    format!("What can you tell me about {}?", lowercase_first(&snippet.join(" ")))
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

fn outline_notes(title: &str, content: &str) -> String {
    let mut out = format!("# {title}\n\n");
    let all = sentences(content);
    let topics = main_topics(content);
    let points = key_points(content);
    let mut used_points: HashSet<usize> = HashSet::new();
    let mut section = 0usize;

    // I. Introduction from the first two sentences.
    section += 1;
    out.push_str(&format!("## {}. Introduction\n\n", roman(section)));
    if all.is_empty() {
        out.push_str("   A. (no introductory material)\n");
    } else {
        for (i, sentence) in all.iter().take(2).enumerate() {
            out.push_str(&format!("   {}. {sentence}.\n", letter(i)));
        }
    }
    out.push('\n');

    // One section per main topic, sub-points drawn from key points that
    // share a word of 4+ characters with the topic sentence.
    for topic in &topics {
        section += 1;
        out.push_str(&format!("## {}. {topic}\n\n", roman(section)));
        let topic_words = significant_words(topic);
        let mut sub = 0usize;
        for (index, point) in points.iter().enumerate() {
            if used_points.contains(&index) || point == topic {
                continue;
            }
            if significant_words(point).intersection(&topic_words).next().is_some() {
                out.push_str(&format!("   {}. {point}.\n", letter(sub)));
                used_points.insert(index);
                sub += 1;
            }
        }
        if sub == 0 {
            out.push_str("   A. (covered in the topic statement above)\n");
        }
        out.push('\n');
    }

    // Catch-all for key points no topic claimed.
    let unused: Vec<&String> = points
        .iter()
        .enumerate()
        .filter(|(index, _)| !used_points.contains(index))
        .map(|(_, p)| p)
        .collect();
    if !unused.is_empty() {
        section += 1;
        out.push_str(&format!("## {}. Additional Notes\n\n", roman(section)));
        for (i, point) in unused.iter().enumerate() {
            out.push_str(&format!("   {}. {point}.\n", letter(i)));
        }
        out.push('\n');
    }

    // Numbered conclusion from the last two sentences.
    section += 1;
    out.push_str(&format!("## {}. Conclusion\n\n", roman(section)));
    if all.is_empty() {
        out.push_str("   1. (no concluding material)");
    } else {
        let tail = all.iter().skip(all.len().saturating_sub(2));
        for (i, sentence) in tail.enumerate() {
            out.push_str(&format!("   {}. {sentence}.\n", i + 1));
        }
    }

    out.trim_end().to_string()
}

fn significant_words(sentence: &str) -> HashSet<String> {
    sentence
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.chars().count() >= OUTLINE_SHARED_WORD_MIN_CHARS)
        .collect()
}

fn roman(n: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut n = n;
    let mut out = String::new();
    for (value, symbol) in TABLE {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

fn letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
