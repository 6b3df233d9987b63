//! External collaborators
//!
//! - Catalog client (MusicBrainz search + lookup)
//! - Outbound rate gate shared by catalog calls
//! - Text generation backend

pub mod generation;
pub mod musicbrainz_client;
pub mod rate_gate;

pub use generation::{GenerationError, OllamaCli, TextGenerator};
pub use musicbrainz_client::{build_search_query, MBError, MusicBrainzClient, RecordingCatalog};
pub use rate_gate::{IntervalGate, NoopGate, RateGate};
