//! Per-call configuration values
//!
//! A [`VerifyConfig`] is built once per request and handed to the
//! orchestrator by value; nothing in the pipeline reads ambient state.
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model query deadline in seconds.
pub const DEFAULT_MODEL_DEADLINE_SECS: u64 = 30;

pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Upper bound on the publish step before it counts as failed.
pub const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 90;

/// Where and how to query the language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEndpointConfig {
    /// Fully-qualified chat-completions URL
    pub url: String,
    /// Model identifier sent in the request body
    pub model: String,
    /// Request is cancelled after this long
    #[serde(with = "duration_secs")]
    pub deadline: Duration,
    pub temperature: f32,
    /// Always `false`; the client expects a single response body.
    pub stream: bool,
}

impl ModelEndpointConfig {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            deadline: Duration::from_secs(DEFAULT_MODEL_DEADLINE_SECS),
            temperature: DEFAULT_TEMPERATURE,
            stream: false,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Same endpoint settings, different URL.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }
}

/// How the publish step behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Anchor the record on the ledger.
    #[default]
    Ledger,
    /// Skip the ledger and synthesize an identifier. The verdict still
    /// comes from a real model query.
    Demo,
}

/// Deployment flavour; controls diagnostic exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    Development,
    #[default]
    Production,
}

impl OperatingMode {
    /// `development`/`dev` (any case) selects Development; anything else
    /// is Production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => OperatingMode::Development,
            _ => OperatingMode::Production,
        }
    }

    pub fn exposes_diagnostics(self) -> bool {
        self == OperatingMode::Development
    }
}

/// Immutable configuration for one verification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    pub model: ModelEndpointConfig,
    pub publish_mode: PublishMode,
    pub operating_mode: OperatingMode,
    #[serde(with = "duration_secs")]
    pub publish_timeout: Duration,
}

impl VerifyConfig {
    pub fn new(model: ModelEndpointConfig) -> Self {
        Self {
            model,
            publish_mode: PublishMode::default(),
            operating_mode: OperatingMode::default(),
            publish_timeout: Duration::from_secs(DEFAULT_PUBLISH_TIMEOUT_SECS),
        }
    }

    pub fn with_publish_mode(mut self, mode: PublishMode) -> Self {
        self.publish_mode = mode;
        self
    }

    pub fn with_operating_mode(mut self, mode: OperatingMode) -> Self {
        self.operating_mode = mode;
        self
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_defaults() {
        let cfg = ModelEndpointConfig::new("http://localhost:11434/v1/chat/completions", "llama");
        assert_eq!(cfg.deadline, Duration::from_secs(30));
        assert!(!cfg.stream);
        assert!((cfg.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_with_url_keeps_other_settings() {
        let cfg = ModelEndpointConfig::new("http://a/v1", "m").with_deadline(Duration::from_secs(5));
        let other = cfg.with_url("http://b/v1");
        assert_eq!(other.url, "http://b/v1");
        assert_eq!(other.model, "m");
        assert_eq!(other.deadline, Duration::from_secs(5));
    }

    #[test]
    fn test_operating_mode_parse() {
        assert_eq!(OperatingMode::parse("development"), OperatingMode::Development);
        assert_eq!(OperatingMode::parse(" DEV "), OperatingMode::Development);
        assert_eq!(OperatingMode::parse("production"), OperatingMode::Production);
        assert_eq!(OperatingMode::parse(""), OperatingMode::Production);
    }
}
