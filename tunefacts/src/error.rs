//! Turn-level error taxonomy
//!
//! Every variant ends the current turn only; the shell prints the message and
//! keeps reading input.

use crate::services::MBError;
use thiserror::Error;

/// Why a turn produced no record
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Parser found no usable title (expected outcome, shown as a hint)
    #[error("Couldn't extract a song title. Try: Tell me about Shape of You by Ed Sheeran")]
    NoTitle,

    /// Search returned nothing, or the chosen recording no longer exists
    #[error("No matching recording found on MusicBrainz.")]
    NotFound,

    /// Selection was cancelled or input closed
    #[error("No matching recording found on MusicBrainz.")]
    Cancelled,

    /// Catalog round-trip failed (network, non-2xx, undecodable body)
    #[error("MusicBrainz error: {0}")]
    Upstream(#[from] MBError),
}

impl ResolveError {
    /// Classify a catalog failure: a 404 is a no-match, anything else upstream
    pub fn from_catalog(err: MBError) -> Self {
        match err {
            MBError::RecordingNotFound(_) => ResolveError::NotFound,
            other => ResolveError::Upstream(other),
        }
    }
}
