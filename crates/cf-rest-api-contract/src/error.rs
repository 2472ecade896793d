//! Error types for API contract validation and the v3 error envelope

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during API contract validation and parsing
#[derive(Debug, Error)]
pub enum ApiContractError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GUID parsing error: {0}")]
    Guid(#[from] uuid::Error),

    #[error("Manifest has no application named {0}")]
    UnknownApplication(String),

    #[error("Manifest declares {0} applications, expected exactly one")]
    AmbiguousManifest(usize),
}

/// A single error entry as returned by the v3 API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub title: String,
    pub detail: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.code, self.detail)
    }
}

/// Error response body: `{"errors": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}
