//! Fact sheet, prompts and plain-text renderings of a normalized record
//!
//! The fact sheet is the only grounding passed to the generation backend.
//! It is built from [`NormalizedRecord`] fields alone and omits every field
//! that has no data.

use crate::fact_check::ProducerVerdict;
use crate::models::{CandidateRecording, CreditRole, NormalizedRecord};

/// Instruction shared by every prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful music assistant. Use ONLY the factual \
context provided below to answer the user. If the context does not include evidence for the \
user's claim, say you don't have evidence. Keep answers concise and friendly.";

/// Values in first-seen order without repeats or blanks
fn unique_non_empty(values: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn release_text(record: &NormalizedRecord) -> Option<String> {
    let title = record.release_title.as_deref().filter(|t| !t.is_empty());
    let date = record.release_date.as_deref().filter(|d| !d.trim().is_empty());
    match (title, date) {
        (Some(title), Some(date)) => Some(format!("{title} ({date})")),
        (Some(title), None) => Some(title.to_string()),
        (None, Some(date)) => Some(date.to_string()),
        (None, None) => None,
    }
}

/// Serialize a record into the line-per-field fact sheet
pub fn build_fact_sheet(record: &NormalizedRecord) -> String {
    let mut lines = Vec::new();

    if !record.title.is_empty() {
        lines.push(format!("Title: {}", record.title));
    }

    let artists = unique_non_empty(&record.artists);
    if !artists.is_empty() {
        lines.push(format!("Artist(s): {}", artists.join(", ")));
    }

    if let Some(release) = release_text(record) {
        lines.push(format!("Release: {release}"));
    }

    if let Some(secs) = record.duration_secs() {
        lines.push(format!("Duration_seconds: {secs}"));
    }

    for role in CreditRole::ALL {
        let names = unique_non_empty(record.credits.get(role));
        if !names.is_empty() {
            lines.push(format!("{}: {}", role.label(), names.join(", ")));
        }
    }

    if !record.source_id.is_empty() {
        lines.push(format!("MBID: {}", record.source_id));
    }

    lines.join("\n")
}

/// Prompt for an open question about the recording
pub fn compose_general_prompt(context: &str, question: &str) -> String {
    format!(
        "{SYSTEM_INSTRUCTION}\n\nFACTS:\n{context}\n\nUSER QUESTION: {question}\n\n\
         Answer in 1-3 concise sentences using only the facts."
    )
}

/// Prompt for a producer claim, worded by the deterministic verdict
pub fn compose_verdict_prompt(context: &str, question: &str, verdict: ProducerVerdict) -> String {
    let instruction = match verdict {
        ProducerVerdict::Yes => {
            "Confirm the claim politely and mention the producer(s) from the facts.\n\n\
             Answer in 1-2 concise, conversational sentences."
        }
        ProducerVerdict::No => {
            "Politely explain that the facts do not support the claim and list the producers \
             present in the facts.\n\nAnswer in 1-2 concise, conversational sentences."
        }
        ProducerVerdict::Unknown => {
            "The facts do not include producer information. Respond conversationally saying you \
             don't have evidence and avoid guessing."
        }
    };
    format!("{SYSTEM_INSTRUCTION}\n\nFACTS:\n{context}\n\nUSER QUESTION: {question}\n\n{instruction}")
}

/// Provenance line appended to generated general answers
pub fn source_footer(record: &NormalizedRecord) -> String {
    format!("(Facts sourced from MusicBrainz: MBID = {})", record.source_id)
}

/// Provenance line appended to producer answers
pub fn producer_footer(record: &NormalizedRecord) -> String {
    let producers = unique_non_empty(record.producers());
    if producers.is_empty() {
        "(Facts: producers not available)".to_string()
    } else {
        format!("(Facts: producers = {})", producers.join(", "))
    }
}

/// One shortlist entry: `N. "Title" - Artists | Release: ... | MBID: ...`
pub fn candidate_line(position: usize, candidate: &CandidateRecording) -> String {
    let title = if candidate.title.is_empty() {
        "Unknown"
    } else {
        candidate.title.as_str()
    };
    let artists = candidate.artist_names().collect::<Vec<_>>().join(", ");
    let artists = if artists.is_empty() { "Unknown".to_string() } else { artists };

    let mut line = format!("{position}. \"{title}\" - {artists}");
    if let Some(release) = candidate.releases.first() {
        let rel_title = release.title.as_deref().unwrap_or("");
        let rel = match release.date.as_deref().filter(|d| !d.is_empty()) {
            Some(date) => format!("{rel_title} ({date})"),
            None => rel_title.to_string(),
        };
        let rel = rel.trim();
        if !rel.is_empty() {
            line.push_str(&format!(" | Release: {rel}"));
        }
    }
    line.push_str(&format!(" | MBID: {}", candidate.id));
    line
}

/// Human-readable summary shown when no generated answer is wanted
pub fn render_summary(record: &NormalizedRecord) -> String {
    let mut parts = Vec::new();

    let title = if record.title.is_empty() {
        "Unknown title"
    } else {
        record.title.as_str()
    };
    parts.push(format!("**{title}**"));

    let artists = unique_non_empty(&record.artists);
    if !artists.is_empty() {
        parts.push(format!("by {}", artists.join(", ")));
    }

    if let Some(release) = release_text(record) {
        parts.push(format!("Released: {release}"));
    }

    let credit_lines: Vec<String> = [
        ("Written by", CreditRole::Composer),
        ("Produced by", CreditRole::Producer),
        ("Lyrics", CreditRole::Lyricist),
    ]
    .into_iter()
    .filter_map(|(label, role)| {
        let names = unique_non_empty(record.credits.get(role));
        (!names.is_empty()).then(|| format!("{label}: {}", names.join(", ")))
    })
    .collect();
    if !credit_lines.is_empty() {
        parts.push(credit_lines.join(" | "));
    }

    if let Some(secs) = record.duration_secs() {
        parts.push(format!("Duration: {}:{:02}", secs / 60, secs % 60));
    }

    parts.join("\n")
}
