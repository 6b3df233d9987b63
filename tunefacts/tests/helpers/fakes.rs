//! In-memory stand-ins for the catalog, the generation backend and the
//! selection prompt

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tunefacts::disambiguator::CandidatePrompt;
use tunefacts::models::{CandidateRecording, RecordingEntity, SearchResponse};
use tunefacts::scoring::ScoredCandidate;
use tunefacts::services::{GenerationError, MBError, RecordingCatalog, TextGenerator};

/// One recorded search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub title: String,
    pub artist: Option<String>,
}

impl SearchCall {
    pub fn new(title: &str, artist: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.map(str::to_string),
        }
    }
}

/// Catalog answering from fixed tables
///
/// Searches not registered return an empty result set; lookups of unknown
/// ids return `RecordingNotFound`.
#[derive(Default)]
pub struct FakeCatalog {
    searches: HashMap<(String, Option<String>), Vec<CandidateRecording>>,
    entities: HashMap<String, RecordingEntity>,
    network_failure: Option<String>,
    search_calls: Arc<Mutex<Vec<SearchCall>>>,
    fetch_calls: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(
        mut self,
        title: &str,
        artist: Option<&str>,
        results: Vec<CandidateRecording>,
    ) -> Self {
        self.searches
            .insert((title.to_string(), artist.map(str::to_string)), results);
        self
    }

    pub fn with_entity(mut self, entity: RecordingEntity) -> Self {
        self.entities.insert(entity.id.clone(), entity);
        self
    }

    /// Every search fails with a network error
    pub fn failing(message: &str) -> Self {
        Self {
            network_failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Shared view of search requests, readable after the catalog is boxed
    pub fn search_log(&self) -> Arc<Mutex<Vec<SearchCall>>> {
        Arc::clone(&self.search_calls)
    }

    pub fn fetch_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.fetch_calls)
    }
}

#[async_trait]
impl RecordingCatalog for FakeCatalog {
    async fn search_recordings(
        &self,
        title: &str,
        artist: Option<&str>,
        _limit: u32,
    ) -> Result<SearchResponse, MBError> {
        self.search_calls
            .lock()
            .unwrap()
            .push(SearchCall::new(title, artist));

        if let Some(message) = &self.network_failure {
            return Err(MBError::NetworkError(message.clone()));
        }

        let recordings = self
            .searches
            .get(&(title.to_string(), artist.map(str::to_string)))
            .cloned()
            .unwrap_or_default();
        Ok(SearchResponse {
            count: Some(recordings.len() as u64),
            recordings,
        })
    }

    async fn fetch_recording(&self, mbid: &str) -> Result<RecordingEntity, MBError> {
        self.fetch_calls.lock().unwrap().push(mbid.to_string());
        self.entities
            .get(mbid)
            .cloned()
            .ok_or_else(|| MBError::RecordingNotFound(mbid.to_string()))
    }
}

/// Generation backend returning a fixed answer or a fixed failure
pub struct FakeGenerator {
    answer: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Behaves like a backend whose binary is not installed
    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.answer {
            Some(answer) => Ok(format!("  {answer}\n")),
            None => Err(GenerationError::NotFound("ollama".to_string())),
        }
    }
}

/// Selection prompt fed from a fixed list of input lines
#[derive(Default)]
pub struct ScriptedPrompt {
    inputs: VecDeque<String>,
    pub presented: Vec<String>,
    pub rejections: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl CandidatePrompt for ScriptedPrompt {
    fn present(&mut self, shortlist: &[ScoredCandidate<'_>]) {
        self.presented = shortlist.iter().map(|s| s.candidate.id.clone()).collect();
    }

    fn read_choice(&mut self) -> Option<String> {
        self.inputs.pop_front()
    }

    fn reject(&mut self, message: &str) {
        self.rejections.push(message.to_string());
    }
}
