//! Core error types for push orchestration.

use cf_rest_api_contract::ApiContractError;
use cf_rest_client::RestClientError;

use crate::push::PushStep;

/// Core error type for all orchestrated operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Push failed at step '{step}' for {subject}: {source}")]
    Push {
        step: PushStep,
        subject: String,
        #[source]
        source: RestClientError,
    },

    #[error("Invalid manifest: {0}")]
    Manifest(#[from] ApiContractError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// The pipeline step that failed, for push errors
    pub fn step(&self) -> Option<PushStep> {
        match self {
            Error::Push { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// True when the failure was caused by cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Push {
                source: RestClientError::Cancelled,
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
