//! MusicBrainz API client
//!
//! Recording search and recording lookup with relations. Every request goes
//! through the injected [`RateGate`] first (MusicBrainz allows 1 req/sec).
//!
//! API Documentation: https://musicbrainz.org/doc/MusicBrainz_API

use crate::models::{RecordingEntity, SearchResponse};
use crate::services::rate_gate::{IntervalGate, RateGate};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tunefacts_common::config::MusicBrainzConfig;

/// Relation categories requested on lookup
const LOOKUP_INC: &str = "artist-credits+releases+work-rels+recording-rels+artist-rels";

/// MusicBrainz client errors
#[derive(Debug, Error)]
pub enum MBError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Recording not found: {0}")]
    RecordingNotFound(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Catalog collaborator: recording search and lookup
#[async_trait]
pub trait RecordingCatalog: Send + Sync {
    /// Search recordings by title, optionally constrained by artist
    async fn search_recordings(
        &self,
        title: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<SearchResponse, MBError>;

    /// Fetch one recording with artist credits, releases and relations
    async fn fetch_recording(&self, mbid: &str) -> Result<RecordingEntity, MBError>;
}

/// Build the Lucene query `recording:"<title>"[ AND artist:"<artist>"]`
pub fn build_search_query(title: &str, artist: Option<&str>) -> String {
    let mut query = format!("recording:\"{}\"", escape_phrase(title));
    if let Some(artist) = artist.filter(|a| !a.trim().is_empty()) {
        query.push_str(&format!(" AND artist:\"{}\"", escape_phrase(artist)));
    }
    query
}

fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    gate: Arc<dyn RateGate>,
}

impl MusicBrainzClient {
    /// Create a client with its own interval gate from configuration
    pub fn new(config: &MusicBrainzConfig) -> Result<Self, MBError> {
        let gate = Arc::new(IntervalGate::from_millis(config.rate_limit_ms));
        Self::with_gate(config, gate)
    }

    /// Create a client sharing an existing gate
    pub fn with_gate(config: &MusicBrainzConfig, gate: Arc<dyn RateGate>) -> Result<Self, MBError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| MBError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            gate,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        not_found_label: &str,
    ) -> Result<T, MBError> {
        self.gate.acquire().await;

        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| MBError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            return Err(MBError::RecordingNotFound(not_found_label.to_string()));
        }

        if status == 503 {
            return Err(MBError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MBError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| MBError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl RecordingCatalog for MusicBrainzClient {
    async fn search_recordings(
        &self,
        title: &str,
        artist: Option<&str>,
        limit: u32,
    ) -> Result<SearchResponse, MBError> {
        let query = build_search_query(title, artist);
        let url = format!("{}/recording/", self.base_url);

        tracing::debug!(query = %query, limit, "Searching MusicBrainz recordings");

        let params = [
            ("query", query.clone()),
            ("fmt", "json".to_string()),
            ("limit", limit.to_string()),
        ];
        let results: SearchResponse = self.get_json(&url, &params, &query).await?;

        tracing::info!(
            query = %query,
            returned = results.recordings.len(),
            total = ?results.count,
            "MusicBrainz search complete"
        );

        Ok(results)
    }

    async fn fetch_recording(&self, mbid: &str) -> Result<RecordingEntity, MBError> {
        if mbid.trim().is_empty() {
            return Err(MBError::RecordingNotFound("(empty id)".to_string()));
        }

        let url = format!("{}/recording/{}", self.base_url, mbid);

        tracing::debug!(mbid = %mbid, url = %url, "Querying MusicBrainz API");

        let params = [("inc", LOOKUP_INC.to_string()), ("fmt", "json".to_string())];
        let recording: RecordingEntity = self.get_json(&url, &params, mbid).await?;

        tracing::info!(
            mbid = %mbid,
            title = %recording.title.as_deref().unwrap_or("Unknown"),
            relations = recording.relation_records().len(),
            "Retrieved recording from MusicBrainz"
        );

        Ok(recording)
    }
}
