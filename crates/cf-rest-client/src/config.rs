//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::AuthConfig;
use crate::poll::{duration_secs, PollOptions};

pub const DEFAULT_USER_AGENT: &str = concat!("cf-rest-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a Cloud Foundry API endpoint.
///
/// Can be loaded from YAML; every field except `api_url` has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the API, e.g. `https://api.example.org`
    pub api_url: String,
    /// OAuth access token, with or without a `bearer ` prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user_agent: String,
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    pub skip_tls_verification: bool,
    pub poll: PollOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            skip_tls_verification: false,
            poll: PollOptions::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_skip_tls_verification(mut self, skip: bool) -> Self {
        self.skip_tls_verification = skip;
        self
    }

    pub fn with_poll_options(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }

    pub fn auth(&self) -> AuthConfig {
        match &self.token {
            Some(token) => AuthConfig::with_bearer(token.as_str()),
            None => AuthConfig::default(),
        }
    }
}
