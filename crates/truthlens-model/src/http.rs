//! HTTP transport for the model client
use async_trait::async_trait;
use std::time::Duration;
use truthlens_core::{Claim, ModelEndpointConfig, RawModelOutput};

use crate::envelope::normalize_body;
use crate::error::ModelError;
use crate::prompt::ChatRequest;
use crate::ModelClient;

/// Health probes give up after this long.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters of raw content echoed to debug logs.
const LOG_PREVIEW_CHARS: usize = 300;

/// Model client over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpModelClient {
    http: reqwest::Client,
}

impl HttpModelClient {
    pub fn new() -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Existence check against the endpoint's base path.
    ///
    /// Sends `HEAD` to the URL cut at `/v1` or `/api`. Returns `true` on any
    /// 2xx within the probe timeout; never errors.
    pub async fn probe(&self, url: &str) -> bool {
        let base = probe_base_url(url);
        match self.http.head(base).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => {
                tracing::debug!(base, status = response.status().as_u16(), "model endpoint probed");
                response.status().is_success()
            }
            Err(e) => {
                tracing::debug!(base, error = %e, "model endpoint unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn query(
        &self,
        endpoint: &ModelEndpointConfig,
        claim: &Claim,
    ) -> Result<RawModelOutput, ModelError> {
        let url = reqwest::Url::parse(&endpoint.url)
            .map_err(|e| ModelError::InvalidEndpoint(format!("{} ({})", endpoint.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ModelError::InvalidEndpoint(endpoint.url.clone()));
        }

        tracing::info!(url = %url, model = %endpoint.model, "querying model");

        let response = self
            .http
            .post(url)
            .json(&ChatRequest::for_claim(endpoint, claim))
            .timeout(endpoint.deadline)
            .send()
            .await
            .map_err(|e| classify(e, endpoint.deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(e, endpoint.deadline))?;
        let (shape, content) = normalize_body(&body);

        tracing::debug!(
            envelope = ?shape,
            content = %content.chars().take(LOG_PREVIEW_CHARS).collect::<String>(),
            "raw model response"
        );

        Ok(RawModelOutput::new(content))
    }
}

fn classify(err: reqwest::Error, deadline: Duration) -> ModelError {
    if err.is_timeout() {
        ModelError::Timeout { after: deadline }
    } else {
        ModelError::Transport(err.to_string())
    }
}

/// The URL up to its first `/v1`, then up to its first `/api`.
pub fn probe_base_url(url: &str) -> &str {
    let base = url.split("/v1").next().unwrap_or(url);
    base.split("/api").next().unwrap_or(base)
}
