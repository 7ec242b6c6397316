//! Request-level errors
//!
//! Validation failures are the client's fault and map to 400. A failed
//! mandatory step (primary metadata read, Solana analysis, Solana graph)
//! maps to 500 with the collaborator's message.

use thiserror::Error;

use crate::ports::CollaboratorError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Unknown chain")]
    UnknownChain,

    #[error("Missing token/mint")]
    MissingToken,

    #[error("Missing token/center")]
    MissingTokenOrCenter,

    #[error("EVM only")]
    EvmOnly,

    #[error("Bad Sol address")]
    BadSolAddress,

    #[error("{message}")]
    MandatoryStep { step: &'static str, message: String },
}

impl RequestError {
    /// True for client errors that must never be retried
    pub fn is_validation(&self) -> bool {
        !matches!(self, RequestError::MandatoryStep { .. })
    }

    /// Map a collaborator failure in a mandatory step
    pub fn mandatory(step: &'static str) -> impl FnOnce(CollaboratorError) -> RequestError {
        move |e| {
            tracing::error!(step, error = %e, "Mandatory step failed");
            RequestError::MandatoryStep {
                step,
                message: e.to_string(),
            }
        }
    }
}
