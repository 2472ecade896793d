//! Transport trait for the Cloud Foundry client
//!
//! The client core never talks HTTP directly. Every request goes through a
//! [`Transport`], which owns authentication, connection management and the
//! mapping of non-2xx responses onto [`TransportError`]. The production
//! backend lives in `cf-rest-client`; tests use `cf-rest-client-mock`.

use async_trait::async_trait;
use cf_rest_api_contract::ApiError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API returned status {status}: {}", summarize(.errors))]
    Api { status: u16, errors: Vec<ApiError> },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

fn summarize(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TransportError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the API reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type TransportResult<T> = Result<T, TransportError>;

/// HTTP verbs used by the v3 API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Json(Value),
    /// Sent as `application/x-yaml`
    Yaml(String),
    /// Sent as a single-part `multipart/form-data` upload
    Upload {
        field: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// A request relative to the API root, e.g. `/v3/apps?names=web`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::None,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiResponse {
    pub status: u16,
    /// `Location` header, set by asynchronous operations
    pub location: Option<String>,
    /// Decoded JSON body; `None` for empty bodies such as 202/204
    pub body: Option<Value>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the decoded response.
    ///
    /// Non-2xx responses come back as [`TransportError::Api`].
    async fn send(&self, request: ApiRequest) -> TransportResult<ApiResponse>;
}
