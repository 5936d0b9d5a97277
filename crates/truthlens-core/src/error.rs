//! Unified Error Model
//!
//! Failures before a verdict exists abort the request. Failures after a
//! verdict exists (publishing) never do; `PublishFailed` only travels as a
//! diagnostic.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TruthLensError {
    /// Empty or missing claim. No upstream call is made.
    #[error("{0}")]
    InvalidInput(String),

    /// Model endpoint unreachable, non-success, or timed out.
    #[error("{reason}")]
    UpstreamUnavailable { reason: String },

    /// Ledger publish failed.
    #[error("{0}")]
    PublishFailed(String),
}

impl TruthLensError {
    pub fn upstream(reason: impl Into<String>) -> Self {
        TruthLensError::UpstreamUnavailable {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TruthLensError::InvalidInput(_) => "invalid_input",
            TruthLensError::UpstreamUnavailable { .. } => "upstream_unavailable",
            TruthLensError::PublishFailed(_) => "publish_failed",
        }
    }

    /// Whether this error aborts the request.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TruthLensError::PublishFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_failures_are_not_fatal() {
        assert!(TruthLensError::InvalidInput("x".into()).is_fatal());
        assert!(TruthLensError::upstream("down").is_fatal());
        assert!(!TruthLensError::PublishFailed("x".into()).is_fatal());
    }

    #[test]
    fn test_display_is_the_bare_message() {
        let err = TruthLensError::upstream("LLM Connection Failed: timed out");
        assert_eq!(err.to_string(), "LLM Connection Failed: timed out");
        assert_eq!(err.kind(), "upstream_unavailable");
    }
}
