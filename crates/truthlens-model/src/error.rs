use std::time::Duration;
use thiserror::Error;
use truthlens_core::TruthLensError;

/// Why a model query produced no answer.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("LLM Connection Failed: no response within {after:?}")]
    Timeout { after: Duration },

    #[error("LLM Connection Failed: LLM responded with {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("LLM Connection Failed: {0}")]
    Transport(String),

    #[error("LLM Connection Failed: invalid endpoint {0}")]
    InvalidEndpoint(String),
}

impl From<ModelError> for TruthLensError {
    fn from(err: ModelError) -> Self {
        TruthLensError::upstream(err.to_string())
    }
}
