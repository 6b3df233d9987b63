//! TuneFacts - Main entry point
//!
//! Interactive shell answering questions about songs from MusicBrainz facts,
//! optionally phrased by a local text-generation model.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tunefacts::bootstrap::load_settings_logged;
use tunefacts::services::{MusicBrainzClient, OllamaCli};
use tunefacts::shell::run_shell;
use tunefacts::SongResolver;
use tunefacts_common::config::LoggingConfig;

/// Command-line arguments for tunefacts
#[derive(Parser, Debug)]
#[command(name = "tunefacts")]
#[command(about = "Song facts from MusicBrainz, with optional generated answers")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generation model (overrides config and TUNEFACTS_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "TUNEFACTS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Answer from the facts alone, without the generation backend
    #[arg(long)]
    no_generate: bool,

    /// Pick the best-guess recording instead of asking
    #[arg(long)]
    auto_pick: bool,
}

/// RUST_LOG wins over the configured level; file output disables ANSI
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level: {}", logging.level))?;

    let (file_layer, stderr_layer) = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false);
            (Some(layer), None)
        }
        None => {
            let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config_path, mut config) =
        load_settings_logged(args.config.as_deref(), args.log_level.as_deref(), std::io::stderr)
            .context("Failed to load configuration")?;
    if let Some(model) = args.model {
        config.generation.model = model;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.no_generate {
        config.generation.enabled = false;
    }

    init_tracing(&config.logging)?;

    info!(
        config = ?config_path,
        base_url = %config.musicbrainz.base_url,
        generation = config.generation.enabled,
        model = %config.generation.model,
        "Starting TuneFacts"
    );

    let client =
        MusicBrainzClient::new(&config.musicbrainz).context("Failed to build MusicBrainz client")?;
    let mut resolver = SongResolver::new(Box::new(client), config.musicbrainz.search_limit);
    if config.generation.enabled {
        resolver = resolver.with_generator(Box::new(OllamaCli::from_config(&config.generation)));
    }

    let stdin = std::io::stdin();
    run_shell(&resolver, args.auto_pick, stdin.lock(), std::io::stdout())
        .await
        .context("Shell I/O failed")?;

    info!("Shell closed");
    Ok(())
}
