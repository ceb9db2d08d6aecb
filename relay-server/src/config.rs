//! Startup configuration: `.env` loading and CLI/env overrides on top of defaults.

use std::path::PathBuf;

use relay_types::{ConfigError, RelayConfig};

use crate::cli::Cli;

/// Load `.env` from the working directory into the process environment.
///
/// Variables already set win over the file. A missing file is not an error.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::EnvFile { message: e.to_string() }),
    }
}

/// Apply every value clap resolved (flag or environment) over the defaults,
/// then validate the result.
pub fn build_config(cli: &Cli) -> Result<RelayConfig, ConfigError> {
    let mut config = RelayConfig::default();

    if let Some(api_key) = &cli.api_key {
        config.upstream.api_key = api_key.trim().to_string();
    }
    if let Some(base_url) = &cli.base_url {
        config.upstream.base_url = base_url.trim().to_string();
    }
    if let Some(secs) = cli.request_timeout_secs {
        config.upstream.request_timeout_secs = secs;
    }
    if let Some(model) = &cli.chat_model {
        config.chat.model = model.clone();
    }
    if let Some(model) = &cli.image_model {
        config.image.model = model.clone();
    }
    if let Some(attempts) = cli.poll_max_attempts {
        config.poll.max_attempts = attempts;
    }
    if let Some(ms) = cli.poll_initial_delay_ms {
        config.poll.initial_delay_ms = ms;
    }
    if let Some(ms) = cli.poll_max_delay_ms {
        config.poll.max_delay_ms = ms;
    }
    config.poll.retry_transport_errors = cli.poll_retry_transport;

    config.validated()
}
