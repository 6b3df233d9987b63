//! Bootstrap configuration loading and config file resolution
//!
//! Configuration is read once at startup from an optional TOML file. Every
//! field has a built-in default, so a missing file (or a file that only sets a
//! few keys) is never fatal.
//!
//! # Config file resolution priority
//!
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`TUNEFACTS_CONFIG`)
//! 3. Platform config directory (`<config_dir>/tunefacts/config.toml`)
//! 4. Built-in defaults (no file)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TUNEFACTS_CONFIG";

/// Environment variable overriding `generation.model`
pub const MODEL_ENV_VAR: &str = "TUNEFACTS_MODEL";

/// Environment variable overriding `musicbrainz.user_agent`
pub const USER_AGENT_ENV_VAR: &str = "TUNEFACTS_USER_AGENT";

const MUSICBRAINZ_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Catalog (MusicBrainz) client configuration
    #[serde(default)]
    pub musicbrainz: MusicBrainzConfig,

    /// Text generation backend configuration
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// MusicBrainz client configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MusicBrainzConfig {
    /// Web service root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with every request (required by MusicBrainz policy)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum spacing between catalog requests
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,

    /// Total request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum recordings requested per search
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            rate_limit_ms: default_rate_limit_ms(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            search_limit: default_search_limit(),
        }
    }
}

/// Text generation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GenerationConfig {
    /// When false, answers are rendered from the facts alone
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Executable used to run the model
    #[serde(default = "default_command")]
    pub command: String,

    /// Model name passed to `<command> run <model>`
    #[serde(default = "default_model")]
    pub model: String,

    /// Time allowed for one generation before it is abandoned
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_command(),
            model: default_model(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    MUSICBRAINZ_BASE_URL.to_string()
}

fn default_rate_limit_ms() -> u64 {
    1000 // MusicBrainz policy: 1 request per second
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_search_limit() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_command() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "mistral".to_string()
}

fn default_generation_timeout_secs() -> u64 {
    60
}

/// Standard User-Agent for catalog requests
///
/// Format follows MusicBrainz guidance: `AppName/Version ( contact )`
pub fn default_user_agent() -> String {
    format!(
        "TuneFacts/{} ( https://github.com/tunefacts/tunefacts )",
        env!("CARGO_PKG_VERSION")
    )
}

impl TomlConfig {
    /// Check values that would make the pipeline misbehave at runtime
    pub fn validate(&self) -> Result<()> {
        if self.musicbrainz.base_url.trim().is_empty() {
            return Err(Error::InvalidInput("musicbrainz.base_url is empty".to_string()));
        }
        if self.musicbrainz.user_agent.trim().is_empty() {
            return Err(Error::InvalidInput("musicbrainz.user_agent is empty".to_string()));
        }
        if !(1..=100).contains(&self.musicbrainz.search_limit) {
            return Err(Error::InvalidInput(format!(
                "musicbrainz.search_limit must be within 1..=100, got {}",
                self.musicbrainz.search_limit
            )));
        }
        if self.generation.timeout_secs == 0 {
            return Err(Error::InvalidInput("generation.timeout_secs must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Apply `TUNEFACTS_MODEL` / `TUNEFACTS_USER_AGENT` on top of file values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var(MODEL_ENV_VAR) {
            if !model.trim().is_empty() {
                info!("Generation model overridden by {}: {}", MODEL_ENV_VAR, model);
                self.generation.model = model;
            }
        }
        if let Ok(agent) = std::env::var(USER_AGENT_ENV_VAR) {
            if !agent.trim().is_empty() {
                self.musicbrainz.user_agent = agent;
            }
        }
    }
}

/// Resolve which config file to read, if any
///
/// Returns `None` when neither an explicit path nor a platform default file
/// exists; the caller then runs on built-in defaults.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform config directory
    dirs::config_dir()
        .map(|d| d.join("tunefacts").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load configuration from `path`, falling back to defaults
///
/// A missing file logs a warning and yields defaults. A file that exists but
/// cannot be parsed is a configuration error.
pub fn load_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        info!("No config file found, using built-in defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!("Config file {} not found, using built-in defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    config.validate()?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
