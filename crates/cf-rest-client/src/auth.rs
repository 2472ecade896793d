//! Authentication methods for the REST API client

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};

/// Authentication methods supported by the client.
///
/// Token acquisition and refresh happen outside this crate; the client only
/// presents a token it was given.
#[derive(Debug, Clone, Default)]
pub enum AuthMethod {
    /// OAuth bearer token (`Authorization: bearer <token>`)
    Bearer(String),
    /// No authentication
    #[default]
    None,
}

impl AuthMethod {
    /// Apply authentication headers to a request
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> Result<(), InvalidHeaderValue> {
        match self {
            AuthMethod::Bearer(token) => {
                let mut value = HeaderValue::from_str(&format!("bearer {}", token))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            AuthMethod::None => {}
        }
        Ok(())
    }

    /// Create bearer token authentication from a token string.
    ///
    /// A leading `bearer ` prefix, as printed by `cf oauth-token`, is stripped.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let trimmed = token.trim();
        let stripped = trimmed
            .strip_prefix("bearer ")
            .or_else(|| trimmed.strip_prefix("Bearer "))
            .unwrap_or(trimmed);
        Self::Bearer(stripped.to_string())
    }
}

/// Authentication configuration for the client
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub method: AuthMethod,
}

impl AuthConfig {
    /// Create a new auth config with bearer token authentication
    pub fn with_bearer(token: impl Into<String>) -> Self {
        Self {
            method: AuthMethod::bearer(token),
        }
    }

    /// Get headers for this authentication configuration
    pub fn headers(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        self.method.apply_to_headers(&mut headers)?;
        Ok(headers)
    }
}
