//! Song resolution pipeline
//!
//! One turn: text -> hypothesis -> catalog search -> selection -> lookup ->
//! normalized record -> generated answer (or a deterministic fallback).
//!
//! Failures end the current turn only and are reported through
//! [`TurnReply::Failed`].

use crate::context::{
    build_fact_sheet, compose_general_prompt, compose_verdict_prompt, producer_footer,
    render_summary, source_footer,
};
use crate::disambiguator::{disambiguate, CandidatePrompt};
use crate::error::ResolveError;
use crate::fact_check::{check_producer, verdict_sentence};
use crate::models::{NormalizedRecord, YesNoHypothesis};
use crate::normalizer::normalize_recording;
use crate::query_parser::{parse_query, parse_yesno_producer_question, split_title_and_performer};
use crate::scoring::choose_best_recording;
use crate::services::{RecordingCatalog, TextGenerator};
use std::fmt;

/// How one recording is chosen from several candidates
pub enum Selection<'p> {
    /// Ranked shortlist resolved through an interaction point
    Ask(&'p mut dyn CandidatePrompt),
    /// Highest best-guess score, no interaction
    BestGuess,
}

/// Outcome of one turn, ready for display
#[derive(Debug)]
pub enum TurnReply {
    /// Backend answer plus its provenance line
    Generated { answer: String, footer: String },
    /// Text built from the record alone (no backend, or backend failed)
    Facts(String),
    Failed(ResolveError),
}

impl fmt::Display for TurnReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnReply::Generated { answer, footer } => write!(f, "{answer}\n\n{footer}"),
            TurnReply::Facts(text) => write!(f, "{text}"),
            TurnReply::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Pipeline over a catalog and an optional generation backend
pub struct SongResolver {
    catalog: Box<dyn RecordingCatalog>,
    generator: Option<Box<dyn TextGenerator>>,
    search_limit: u32,
}

impl SongResolver {
    /// Resolver that answers from the facts alone
    pub fn new(catalog: Box<dyn RecordingCatalog>, search_limit: u32) -> Self {
        Self {
            catalog,
            generator: None,
            search_limit,
        }
    }

    /// Route answers through a generation backend
    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn generates(&self) -> bool {
        self.generator.is_some()
    }

    /// Search, select one recording, fetch it and normalize it
    ///
    /// An empty result set is [`ResolveError::NotFound`]; a cancelled
    /// selection is [`ResolveError::Cancelled`].
    pub async fn resolve_with_choice(
        &self,
        title: &str,
        artist: Option<&str>,
        selection: &mut Selection<'_>,
    ) -> Result<NormalizedRecord, ResolveError> {
        let results = self
            .catalog
            .search_recordings(title, artist, self.search_limit)
            .await
            .map_err(ResolveError::from_catalog)?;
        let candidates = &results.recordings;

        if candidates.is_empty() {
            tracing::debug!(title = %title, artist = ?artist, "Search returned no candidates");
            return Err(ResolveError::NotFound);
        }

        let chosen = match selection {
            Selection::Ask(prompt) => {
                disambiguate(candidates, title, artist, &mut **prompt).ok_or(ResolveError::Cancelled)?
            }
            Selection::BestGuess => {
                choose_best_recording(candidates, title, artist)
                    .map(|scored| scored.candidate)
                    .ok_or(ResolveError::NotFound)?
            }
        };

        tracing::info!(
            mbid = %chosen.id,
            title = %chosen.title,
            pool = candidates.len(),
            "Recording selected"
        );

        let entity = self
            .catalog
            .fetch_recording(&chosen.id)
            .await
            .map_err(ResolveError::from_catalog)?;

        let mut record = normalize_recording(&entity);
        record.source_id = chosen.id.clone();
        Ok(record)
    }

    /// Resolve with the artist constraint, then title-only if that finds nothing
    ///
    /// Only a no-match triggers the retry; cancellation and upstream failures
    /// end the turn.
    pub async fn resolve_with_retry(
        &self,
        title: &str,
        artist: Option<&str>,
        selection: &mut Selection<'_>,
    ) -> Result<NormalizedRecord, ResolveError> {
        if let Some(artist) = artist {
            match self.resolve_with_choice(title, Some(artist), selection).await {
                Err(ResolveError::NotFound) => {
                    tracing::info!(
                        title = %title,
                        artist = %artist,
                        "No match with artist constraint, retrying title-only"
                    );
                }
                outcome => return outcome,
            }
        }
        self.resolve_with_choice(title, None, selection).await
    }

    /// Answer one line of user input
    ///
    /// Producer claims are recognized first; everything else is a general
    /// lookup.
    pub async fn answer_turn(&self, text: &str, selection: &mut Selection<'_>) -> TurnReply {
        let outcome = match parse_yesno_producer_question(text) {
            Some(claim) => self.answer_producer_claim(text, &claim, selection).await,
            None => self.answer_general(text, selection).await,
        };

        outcome.unwrap_or_else(|err| {
            match &err {
                ResolveError::Upstream(e) => tracing::warn!(error = %e, "Turn aborted by catalog failure"),
                other => tracing::debug!(reason = ?other, "Turn ended without a record"),
            }
            TurnReply::Failed(err)
        })
    }

    async fn answer_general(
        &self,
        text: &str,
        selection: &mut Selection<'_>,
    ) -> Result<TurnReply, ResolveError> {
        let hypothesis = parse_query(text);
        if !hypothesis.has_title() {
            return Err(ResolveError::NoTitle);
        }

        let record = self
            .resolve_with_retry(&hypothesis.title, hypothesis.artist.as_deref(), selection)
            .await?;

        let Some(generator) = &self.generator else {
            return Ok(TurnReply::Facts(render_summary(&record)));
        };

        let sheet = build_fact_sheet(&record);
        let prompt = compose_general_prompt(&sheet, text);
        match generator.generate(&prompt).await {
            Ok(answer) => Ok(TurnReply::Generated {
                answer: answer.trim().to_string(),
                footer: source_footer(&record),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed, falling back to fact sheet");
                Ok(TurnReply::Facts(format!(
                    "Generation failed: {e}\nFalling back to raw facts:\n\n{sheet}"
                )))
            }
        }
    }

    async fn answer_producer_claim(
        &self,
        text: &str,
        claim: &YesNoHypothesis,
        selection: &mut Selection<'_>,
    ) -> Result<TurnReply, ResolveError> {
        let (title, performer) = split_title_and_performer(&claim.song);
        if title.is_empty() {
            return Err(ResolveError::NoTitle);
        }

        let record = self
            .resolve_with_retry(&title, performer.as_deref(), selection)
            .await?;

        let verdict = check_producer(&record, &claim.artist_claim);
        tracing::info!(
            title = %record.title,
            claim = %claim.artist_claim,
            verdict = %verdict,
            "Producer claim checked"
        );

        let Some(generator) = &self.generator else {
            return Ok(TurnReply::Facts(verdict_sentence(&record, verdict)));
        };

        let prompt = compose_verdict_prompt(&build_fact_sheet(&record), text, verdict);
        match generator.generate(&prompt).await {
            Ok(answer) => Ok(TurnReply::Generated {
                answer: answer.trim().to_string(),
                footer: producer_footer(&record),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed, answering from verdict");
                Ok(TurnReply::Facts(verdict_sentence(&record, verdict)))
            }
        }
    }
}
