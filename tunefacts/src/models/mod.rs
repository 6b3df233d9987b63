//! Data models for TuneFacts
//!
//! - Catalog wire shapes (search results and fetched recording entities)
//! - Query hypotheses produced by the parser
//! - The normalized record handed to the fact sheet and fact checker

pub mod catalog;
pub mod hypothesis;
pub mod record;

pub use catalog::{
    ArtistCredit, CandidateRecording, RecordingEntity, Relation, RelationArtist, Release,
    SearchResponse,
};
pub use hypothesis::{QueryHypothesis, YesNoHypothesis};
pub use record::{CreditRole, Credits, NormalizedRecord};
