//! Normalized recording record

use serde::{Deserialize, Serialize};

/// Credit roles recognized on a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditRole {
    Composer,
    Lyricist,
    Producer,
    Performer,
}

impl CreditRole {
    /// Fixed presentation order
    pub const ALL: [CreditRole; 4] = [
        CreditRole::Composer,
        CreditRole::Lyricist,
        CreditRole::Producer,
        CreditRole::Performer,
    ];

    /// Capitalized label used in the fact sheet
    pub fn label(self) -> &'static str {
        match self {
            CreditRole::Composer => "Composer",
            CreditRole::Lyricist => "Lyricist",
            CreditRole::Producer => "Producer",
            CreditRole::Performer => "Performer",
        }
    }

    /// Lowercase substrings of a relation type that indicate this role
    fn markers(self) -> &'static [&'static str] {
        match self {
            CreditRole::Composer => &["compose", "composer", "written"],
            CreditRole::Lyricist => &["lyric"],
            CreditRole::Producer => &["produce", "producer"],
            CreditRole::Performer => &["performer", "perform"],
        }
    }

    /// Case-insensitive substring match against a relation type label
    pub fn matches(self, relation_type: &str) -> bool {
        let lowered = relation_type.to_lowercase();
        self.markers().iter().any(|m| lowered.contains(m))
    }
}

/// Role credits, each list de-duplicated in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    pub composer: Vec<String>,
    pub lyricist: Vec<String>,
    pub producer: Vec<String>,
    pub performer: Vec<String>,
}

impl Credits {
    pub fn get(&self, role: CreditRole) -> &[String] {
        match role {
            CreditRole::Composer => &self.composer,
            CreditRole::Lyricist => &self.lyricist,
            CreditRole::Producer => &self.producer,
            CreditRole::Performer => &self.performer,
        }
    }

    /// Append `name` to `role` unless already present
    pub fn add(&mut self, role: CreditRole, name: &str) {
        let list = match role {
            CreditRole::Composer => &mut self.composer,
            CreditRole::Lyricist => &mut self.lyricist,
            CreditRole::Producer => &mut self.producer,
            CreditRole::Performer => &mut self.performer,
        };
        if !list.iter().any(|existing| existing == name) {
            list.push(name.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        CreditRole::ALL.iter().all(|role| self.get(*role).is_empty())
    }
}

/// Canonical metadata for one resolved recording
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Empty when the catalog returned no title
    pub title: String,
    /// Credited artists in credit order, never containing empty names
    pub artists: Vec<String>,
    pub release_title: Option<String>,
    pub release_date: Option<String>,
    pub length_ms: Option<u64>,
    pub credits: Credits,
    /// Catalog identifier (MBID) the record was fetched by
    pub source_id: String,
}

impl NormalizedRecord {
    /// Whole seconds, or `None` when the length is unknown or zero
    pub fn duration_secs(&self) -> Option<u64> {
        self.length_ms.filter(|ms| *ms > 0).map(|ms| ms / 1000)
    }

    pub fn producers(&self) -> &[String] {
        &self.credits.producer
    }
}
