//! Deterministic producer check
//!
//! Answers "did X produce this recording?" directly from the normalized
//! credits, with no text generation involved.

use crate::models::NormalizedRecord;
use std::fmt;

/// Outcome of a producer claim check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerVerdict {
    /// A listed producer matches the claim
    Yes,
    /// Producers are listed and none matches
    No,
    /// The record carries no producer credits at all
    Unknown,
}

impl ProducerVerdict {
    /// `Some(bool)` when the data settles the claim
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ProducerVerdict::Yes => Some(true),
            ProducerVerdict::No => Some(false),
            ProducerVerdict::Unknown => None,
        }
    }
}

impl fmt::Display for ProducerVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProducerVerdict::Yes => write!(f, "yes"),
            ProducerVerdict::No => write!(f, "no"),
            ProducerVerdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Check whether `claimed` is credited as a producer on `record`
///
/// Exact (trimmed, case-insensitive) match first, then substring containment
/// of the claim within a producer name.
pub fn check_producer(record: &NormalizedRecord, claimed: &str) -> ProducerVerdict {
    let producers = record.producers();
    if producers.is_empty() {
        return ProducerVerdict::Unknown;
    }

    let claim = claimed.trim().to_lowercase();
    let names: Vec<String> = producers
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.trim().to_lowercase())
        .collect();

    // Pass 1: exact
    if names.iter().any(|name| *name == claim) {
        return ProducerVerdict::Yes;
    }

    // Pass 2: substring
    if names.iter().any(|name| name.contains(&claim)) {
        return ProducerVerdict::Yes;
    }

    ProducerVerdict::No
}

/// Plain sentence stating the verdict, used when generation is unavailable
pub fn verdict_sentence(record: &NormalizedRecord, verdict: ProducerVerdict) -> String {
    let title = if record.title.is_empty() {
        "?"
    } else {
        record.title.as_str()
    };
    let producers = record.producers().join(", ");

    match verdict {
        ProducerVerdict::Yes => format!(
            "Yes: MusicBrainz lists these producers for \"{title}\": {producers}."
        ),
        ProducerVerdict::No => format!(
            "No: MusicBrainz lists these producers for \"{title}\": {producers}."
        ),
        ProducerVerdict::Unknown => {
            "MusicBrainz does not have producer credit information for that track.".to_string()
        }
    }
}
