//! Parsed interpretations of a user utterance

use serde::{Deserialize, Serialize};

/// (title, artist?) guess extracted from free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHypothesis {
    /// Trimmed title; empty when nothing usable was found
    pub title: String,
    /// Trimmed artist, if the text named one
    pub artist: Option<String>,
}

impl QueryHypothesis {
    pub fn new(title: impl Into<String>, artist: Option<String>) -> Self {
        let artist = artist
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Self {
            title: title.into().trim().to_string(),
            artist,
        }
    }

    /// False when the caller must report "could not extract a title"
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Claim that `artist_claim` produced `song`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YesNoHypothesis {
    /// Song reference as written, possibly "<title> by <performer>"
    pub song: String,
    /// Artist whose producer role is being asserted
    pub artist_claim: String,
}
