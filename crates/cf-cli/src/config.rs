//! Client configuration from file and flags

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cf_rest_client::ClientConfig;

use crate::Cli;

/// Read a YAML [`ClientConfig`]
pub fn read_config_file(path: &Path) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Build the client configuration: the `--config` file if given, then flags on top
pub fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => ClientConfig::default(),
    };

    if let Some(api) = &cli.api {
        config.api_url = api.clone();
    }
    if let Some(token) = &cli.token {
        config.token = Some(token.clone());
    }
    if cli.skip_ssl_validation {
        config.skip_tls_verification = true;
    }
    if let Some(secs) = cli.poll_interval {
        config.poll.interval = seconds("--poll-interval", secs)?;
    }
    if let Some(secs) = cli.poll_timeout {
        config.poll.timeout = seconds("--poll-timeout", secs)?;
    }

    if config.api_url.trim().is_empty() {
        return Err(cf_core::Error::config("no API endpoint; pass --api or set CF_API").into());
    }
    Ok(config)
}

fn seconds(flag: &str, secs: f64) -> Result<Duration> {
    if secs.is_nan() || secs <= 0.0 {
        return Err(cf_core::Error::config(format!("{flag} must be a positive number of seconds")).into());
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| anyhow::Error::from(cf_core::Error::config(format!("{flag}: {e}"))))
}
