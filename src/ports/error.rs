//! Collaborator errors shared by every port

use thiserror::Error;

/// Failure reported by an external collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Rate limited, try again later")]
    RateLimited,
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(e: reqwest::Error) -> Self {
        CollaboratorError::Http(e.to_string())
    }
}
