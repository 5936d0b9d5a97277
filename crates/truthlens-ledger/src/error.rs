use std::fmt;
use truthlens_core::TruthLensError;

pub const UNKNOWN_PUBLISH_FAILURE: &str = "DKG publish failed with unknown error";

/// A failed publish, with whatever detail the node or transport gave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub cause: Option<String>,
    pub code: Option<String>,
}

impl PublishError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn timed_out(message: impl Into<String>) -> Self {
        Self::new(message).with_code("ETIMEDOUT")
    }

    /// Single-line detail: `msg | HTTP s | body | Cause: c | Code: k`,
    /// skipping absent parts. Never empty.
    pub fn diagnostic(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if !self.message.trim().is_empty() {
            parts.push(self.message.clone());
        }
        if let Some(status) = self.status {
            parts.push(format!("HTTP {}", status));
        }
        if let Some(body) = self.body.as_deref().filter(|b| !b.trim().is_empty()) {
            parts.push(body.to_string());
        }
        if let Some(cause) = self.cause.as_deref().filter(|c| !c.trim().is_empty()) {
            parts.push(format!("Cause: {}", cause));
        }
        if let Some(code) = self.code.as_deref().filter(|c| !c.trim().is_empty()) {
            parts.push(format!("Code: {}", code));
        }

        if parts.is_empty() {
            UNKNOWN_PUBLISH_FAILURE.to_string()
        } else {
            parts.join(" | ")
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagnostic())
    }
}

impl std::error::Error for PublishError {}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        let mut out = PublishError::new("Unable to reach DKG node");
        if let Some(status) = err.status() {
            out = out.with_status(status.as_u16());
        }
        if err.is_timeout() {
            out = out.with_code("ETIMEDOUT");
        } else if err.is_connect() {
            out = out.with_code("ECONNREFUSED");
        }
        out.with_cause(err.to_string())
    }
}

impl From<PublishError> for TruthLensError {
    fn from(err: PublishError) -> Self {
        TruthLensError::PublishFailed(err.diagnostic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_joins_present_parts() {
        let err = PublishError::new("Unable to publish")
            .with_status(400)
            .with_body(r#"{"message":"bad assertion"}"#)
            .with_cause("validation")
            .with_code("EBADREQ");
        assert_eq!(
            err.diagnostic(),
            r#"Unable to publish | HTTP 400 | {"message":"bad assertion"} | Cause: validation | Code: EBADREQ"#
        );
    }

    #[test]
    fn test_diagnostic_skips_missing_parts() {
        let err = PublishError::timed_out("Publish not finalized after 30 polls");
        assert_eq!(
            err.diagnostic(),
            "Publish not finalized after 30 polls | Code: ETIMEDOUT"
        );
    }

    #[test]
    fn test_diagnostic_never_empty() {
        assert_eq!(PublishError::new("").diagnostic(), UNKNOWN_PUBLISH_FAILURE);
        assert_eq!(
            PublishError::new("  ").with_body("").diagnostic(),
            UNKNOWN_PUBLISH_FAILURE
        );
    }

    #[test]
    fn test_converts_to_non_fatal_error() {
        let err: TruthLensError = PublishError::new("boom").with_status(500).into();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "boom | HTTP 500");
    }
}
