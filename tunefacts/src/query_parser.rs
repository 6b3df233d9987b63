//! Query parser
//!
//! Turns free text into a [`QueryHypothesis`] (general lookups) or a
//! [`YesNoHypothesis`] (producer claims). Both grammars are ordered lists of
//! regex templates where the first match wins; there is no scoring across
//! patterns.

use crate::models::{QueryHypothesis, YesNoHypothesis};
use once_cell::sync::Lazy;
use regex::Regex;

/// General lookup templates, most specific first
static QUERY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#"(?i)what can you tell me about\s+['"]?(?P<title>.+?)['"]?\s+by\s+(?P<artist>.+)"#,
        r#"(?i)tell me about\s+['"]?(?P<title>.+?)['"]?\s+by\s+(?P<artist>.+)"#,
        r#"(?i)about\s+['"]?(?P<title>.+?)['"]?\s+by\s+(?P<artist>.+)"#,
        r#"(?i)(?P<title>.+?)\s+by\s+(?P<artist>.+)"#,
    ])
});

/// Producer claim templates; each binds `title` and `artist`
static YESNO_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r#"(?i)^\s*is\s+["']?(?P<title>.+?)["']?\s+produced\s+by\s+["']?(?P<artist>.+?)["']?\s*$"#,
        r#"(?i)^\s*was\s+["']?(?P<title>.+?)["']?\s+produced\s+by\s+["']?(?P<artist>.+?)["']?\s*$"#,
        r#"(?i)^\s*did\s+["']?(?P<artist>.+?)["']?\s+produce\s+["']?(?P<title>.+?)["']?\s*$"#,
        r#"(?i)^\s*is\s+["']?(?P<artist>.+?)["']?\s+(the\s+)?producer\s+of\s+["']?(?P<title>.+?)["']?\s*$"#,
    ])
});

static BY_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+by\s+").expect("separator pattern is valid"));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in query pattern is valid"))
        .collect()
}

/// Extract a (title, artist) hypothesis from user text
///
/// Never fails. When nothing better applies the whole trimmed input becomes
/// the title; empty or whitespace-only input yields an empty title, which the
/// caller reports as "could not extract a title".
pub fn parse_query(text: &str) -> QueryHypothesis {
    for pattern in QUERY_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let title = caps.name("title").map_or("", |m| m.as_str());
            let artist = caps.name("artist").map(|m| m.as_str().to_string());
            tracing::debug!(pattern = %pattern.as_str(), "Query matched template");
            return QueryHypothesis::new(title, artist);
        }
    }

    // ASCII lowering keeps byte offsets aligned with `text`
    let lowered = text.to_ascii_lowercase();
    if let Some(idx) = lowered.find(" by ") {
        let (title, rest) = text.split_at(idx);
        return QueryHypothesis::new(title, Some(rest[" by ".len()..].to_string()));
    }

    QueryHypothesis::new(text, None)
}

/// Recognize "was X produced by Y"-style claims
///
/// Returns `None` when the text is not a producer question; it then belongs
/// to the general pipeline.
pub fn parse_yesno_producer_question(text: &str) -> Option<YesNoHypothesis> {
    let stripped = text.trim().trim_end_matches('?').trim();

    YESNO_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(stripped)?;
        Some(YesNoHypothesis {
            song: caps.name("title")?.as_str().trim().to_string(),
            artist_claim: caps.name("artist")?.as_str().trim().to_string(),
        })
    })
}

/// Split "<title> by <performer>" into title and performer hint
pub fn split_title_and_performer(song: &str) -> (String, Option<String>) {
    let parts: Vec<&str> = BY_SEPARATOR.split(song).collect();
    if parts.len() >= 2 {
        let performer = parts[1].trim();
        let performer = (!performer.is_empty()).then(|| performer.to_string());
        return (parts[0].trim().to_string(), performer);
    }
    (song.trim().to_string(), None)
}
