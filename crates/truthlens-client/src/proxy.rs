//! HTTP client for a running TruthLens proxy
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use truthlens_core::VerificationResult;

use crate::error::ClientError;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000";

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct VerifyBody<'a> {
    claim: &'a str,
    #[serde(rename = "llmUrl", skip_serializing_if = "Option::is_none")]
    llm_url: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn verify(
        &self,
        claim: &str,
        model_endpoint: Option<&str>,
    ) -> Result<VerificationResult, ClientError> {
        tracing::debug!(proxy = %self.base_url, llm_url = ?model_endpoint, "sending claim to proxy");

        let response = self
            .http
            .post(format!("{}/verify", self.base_url))
            .json(&VerifyBody {
                claim,
                llm_url: model_endpoint,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Server Error: {}", status.as_u16()));
            return Err(ClientError::Server(message));
        }

        Ok(response.json().await?)
    }

    /// `true` when `GET /health` answers with a 2xx.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "proxy disconnected");
                false
            }
        }
    }
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }
}
