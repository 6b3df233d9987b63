//! MusicBrainz wire shapes
//!
//! Every field the pipeline does not strictly need is optional or defaulted,
//! and `null` list fields decode as empty lists. A sparse or slightly
//! off-schema entity must still deserialize.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Recording search response (`GET /recording/?query=...`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total hits reported by the service (not the page size)
    #[serde(default)]
    pub count: Option<u64>,
    /// Recordings on this page, in service rank order
    #[serde(default, deserialize_with = "null_as_default")]
    pub recordings: Vec<CandidateRecording>,
}

/// One recording returned by a search
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CandidateRecording {
    /// Recording MBID
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "artist-credit", default, deserialize_with = "null_as_default")]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: Vec<Release>,
}

impl CandidateRecording {
    /// Credited names in credit order, empty names skipped
    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artist_credit
            .iter()
            .map(|ac| ac.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// Artist credit entry (display name as credited)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArtistCredit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Release containing a recording
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Release {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`; precision varies by release
    #[serde(default)]
    pub date: Option<String>,
}

/// Full recording entity (`GET /recording/<mbid>?inc=...`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecordingEntity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Length in milliseconds
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(rename = "artist-credit", default, deserialize_with = "null_as_default")]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub relations: Option<Vec<Relation>>,
    /// Legacy field name used by older schema versions
    #[serde(rename = "relation-list", default)]
    pub relation_list: Option<Vec<Relation>>,
}

impl RecordingEntity {
    /// `relations`, or `relation-list` when the former is absent or empty
    pub fn relation_records(&self) -> &[Relation] {
        match (&self.relations, &self.relation_list) {
            (Some(rels), _) if !rels.is_empty() => rels.as_slice(),
            (_, Some(legacy)) => legacy.as_slice(),
            _ => &[],
        }
    }
}

/// Relationship between the recording and another entity
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Relation {
    /// Relation type label, e.g. "producer", "composer", "performance"
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub relation_type: String,
    #[serde(default)]
    pub artist: Option<RelationArtist>,
    #[serde(rename = "target-credit", default)]
    pub target_credit: Option<String>,
    /// Untyped; some sources put a name here, others an id or object
    #[serde(default)]
    pub target: Option<serde_json::Value>,
}

/// Artist nested inside a relation
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RelationArtist {
    #[serde(default)]
    pub name: Option<String>,
}
