//! `cf-push` command-line library

pub mod config;
pub mod manifest;

use std::path::PathBuf;

use anyhow::{Context, Result};
use cf_core::AppPushOperation;
use cf_rest_api_contract::{App, AppState};
use cf_rest_client::CfClient;
use tokio_util::sync::CancellationToken;
use tracing::info;

// Re-export CLI types for testing
pub use clap::Parser;

/// Push a buildpack app to Cloud Foundry
#[derive(Parser, Debug)]
#[command(name = "cf-push")]
#[command(about = "Push a buildpack app to a Cloud Foundry v3 API")]
#[command(version, author, long_about = None)]
pub struct Cli {
    /// API endpoint, e.g. https://api.example.org
    #[arg(long, env = "CF_API", value_name = "URL")]
    pub api: Option<String>,

    /// OAuth access token
    #[arg(long, env = "CF_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Target organization
    #[arg(short, long, value_name = "NAME")]
    pub org: String,

    /// Target space
    #[arg(short, long, value_name = "NAME")]
    pub space: String,

    /// Manifest file (a single app or an `applications:` list)
    #[arg(short, long, value_name = "FILE")]
    pub manifest: PathBuf,

    /// Zip archive of the app sources
    #[arg(short, long, value_name = "FILE")]
    pub bits: PathBuf,

    /// Application to push when the manifest declares several
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Seconds between state checks while waiting
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<f64>,

    /// Seconds to wait for jobs, packages and builds
    #[arg(long, value_name = "SECS")]
    pub poll_timeout: Option<f64>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub skip_ssl_validation: bool,

    /// YAML client configuration; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run the push described by the arguments
    pub async fn run(&self, cancel: &CancellationToken) -> Result<App> {
        let config = config::load_config(self)?;
        let manifest = manifest::load_manifest(&self.manifest, self.app.as_deref())?;
        let bits = tokio::fs::read(&self.bits)
            .await
            .with_context(|| format!("Failed to read bits from {}", self.bits.display()))?;

        info!(
            api = %config.api_url,
            org = %self.org,
            space = %self.space,
            app = %manifest.name,
            bytes = bits.len(),
            "Pushing app"
        );

        let client = CfClient::from_config(&config).context("Failed to create API client")?;
        let operation = AppPushOperation::new(client, self.org.as_str(), self.space.as_str());
        Ok(operation.push(&manifest, bits, cancel).await?)
    }
}

/// One-line summary of a pushed app
pub fn describe_app(app: &App) -> String {
    let state = match app.state {
        AppState::Started => "STARTED",
        AppState::Stopped => "STOPPED",
    };
    format!("{} ({}) is {}", app.name, app.guid, state)
}
