//! Configuration bootstrap
//!
//! The configured subscriber cannot exist before the config is read, so
//! loading runs under a scoped subscriber and its warnings still reach the
//! user.

use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tunefacts_common::config::{load_config, resolve_config_path, TomlConfig, CONFIG_ENV_VAR};

/// RUST_LOG, else `level_hint`, else `info`
pub fn bootstrap_filter(level_hint: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_hint.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Resolve, load and apply env overrides; returns the file used, if any
pub fn load_settings(config_arg: Option<&Path>) -> tunefacts_common::Result<(Option<PathBuf>, TomlConfig)> {
    let path = resolve_config_path(config_arg, CONFIG_ENV_VAR);
    let mut config = load_config(path.as_deref())?;
    config.apply_env_overrides();
    Ok((path, config))
}

/// [`load_settings`] with its diagnostics written through `make_writer`
pub fn load_settings_logged<W>(
    config_arg: Option<&Path>,
    level_hint: Option<&str>,
    make_writer: W,
) -> tunefacts_common::Result<(Option<PathBuf>, TomlConfig)>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(bootstrap_filter(level_hint))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false),
        );
    tracing::subscriber::with_default(subscriber, || load_settings(config_arg))
}
