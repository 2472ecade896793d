//! Error types for the REST API client

use std::time::Duration;

use cf_client_api::TransportError;
use thiserror::Error;

/// Errors that can occur when using the REST API client
#[derive(Debug, Error)]
pub enum RestClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("API contract error: {0}")]
    ApiContract(#[from] cf_rest_api_contract::ApiContractError),

    #[error("Malformed pagination link: {0}")]
    MalformedPaginationLink(String),

    #[error("No next page to advance to")]
    NoNextPage,

    #[error("Listing exceeded the limit of {0} pages")]
    PageLimitExceeded(usize),

    #[error("Expected exactly one result but found none")]
    NotFound,

    #[error("Expected exactly one result but found {0}")]
    AmbiguousResult(usize),

    #[error("Operation reached failure state {state}: {reason}")]
    OperationFailed { state: String, reason: String },

    #[error("Timed out after {0:?} waiting for a terminal state")]
    PollTimeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for REST client operations
pub type RestClientResult<T> = Result<T, RestClientError>;
