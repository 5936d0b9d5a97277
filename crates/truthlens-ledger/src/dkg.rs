//! DKG node client over HTTP
//!
//! Publishing is asynchronous on the node side: `POST /publish` returns an
//! operation id, and the caller polls `GET /publish/{id}` until the
//! operation completes or fails.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use truthlens_core::LedgerId;

use crate::{ClaimReviewRecord, LedgerClient, PublishError, PublishOptions};

pub const DEFAULT_NODE_HOSTNAME: &str = "http://localhost";
pub const DEFAULT_NODE_PORT: u16 = 9200;
pub const DEFAULT_BLOCKCHAIN_ID: &str = "otp:2043";
pub const DEFAULT_MAX_RETRIES: u32 = 30;
pub const DEFAULT_FREQUENCY_SECS: u64 = 2;

/// Health checks give up after this long.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-request bound on publish and poll calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DkgConfig {
    pub hostname: String,
    pub port: u16,
    pub blockchain: String,
    pub public_key: Option<String>,
    pub max_retries: u32,
    pub frequency: Duration,
}

impl Default for DkgConfig {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_NODE_HOSTNAME.to_string(),
            port: DEFAULT_NODE_PORT,
            blockchain: DEFAULT_BLOCKCHAIN_ID.to_string(),
            public_key: None,
            max_retries: DEFAULT_MAX_RETRIES,
            frequency: Duration::from_secs(DEFAULT_FREQUENCY_SECS),
        }
    }
}

impl DkgConfig {
    /// `<hostname>:<port>`
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.hostname.trim_end_matches('/'), self.port)
    }
}

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    assertion: &'a ClaimReviewRecord,
    blockchain: &'a str,
    #[serde(rename = "publicKey", skip_serializing_if = "Option::is_none")]
    public_key: Option<&'a str>,
    keywords: &'a [String],
    visibility: &'a str,
    #[serde(rename = "epochsNum")]
    epochs_num: u32,
}

#[derive(Debug, Deserialize)]
struct PublishAccepted {
    #[serde(rename = "operationId")]
    operation_id: String,
}

#[derive(Debug, Deserialize)]
struct OperationStatus {
    status: String,
    #[serde(default)]
    data: Value,
    #[serde(rename = "UAL", default)]
    ual: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DkgHttpClient {
    http: reqwest::Client,
    config: DkgConfig,
}

impl DkgHttpClient {
    pub fn new(config: DkgConfig) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(PublishError::from)?;
        Ok(Self { http, config })
    }

    pub fn with_client(http: reqwest::Client, config: DkgConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &DkgConfig {
        &self.config
    }

    /// Best-effort reachability check. Only logged; never blocks a publish.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url());
        match self.http.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => {
                tracing::info!(url, status = response.status().as_u16(), "DKG node health check");
                response.status().is_success()
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "DKG node health check failed");
                false
            }
        }
    }

    async fn submit(
        &self,
        record: &ClaimReviewRecord,
        options: &PublishOptions,
    ) -> Result<String, PublishError> {
        let body = PublishRequest {
            assertion: record,
            blockchain: &self.config.blockchain,
            public_key: self.config.public_key.as_deref(),
            keywords: &options.keywords,
            visibility: &options.visibility,
            epochs_num: options.epochs_num,
        };

        let response = self
            .http
            .post(format!("{}/publish", self.config.base_url()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PublishError::new("Unable to publish")
                .with_status(status.as_u16())
                .with_body(text));
        }

        let accepted: PublishAccepted = response.json().await.map_err(|e| {
            PublishError::new("Unable to publish: unexpected node response").with_cause(e.to_string())
        })?;
        Ok(accepted.operation_id)
    }

    async fn poll(&self, operation_id: &str) -> Result<LedgerId, PublishError> {
        let url = format!("{}/publish/{}", self.config.base_url(), operation_id);

        for attempt in 1..=self.config.max_retries {
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(PublishError::new("Unable to get publish result")
                    .with_status(status.as_u16())
                    .with_body(text));
            }

            let operation: OperationStatus = response.json().await.map_err(|e| {
                PublishError::new("Unable to get publish result").with_cause(e.to_string())
            })?;

            tracing::debug!(operation_id, attempt, status = %operation.status, "publish status");

            match operation.status.as_str() {
                "COMPLETED" => {
                    let ual = operation
                        .data
                        .get("UAL")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .or(operation.ual);
                    return ual.map(LedgerId::new).ok_or_else(|| {
                        PublishError::new("Publish completed without a UAL")
                            .with_body(operation.data.to_string())
                    });
                }
                "FAILED" => {
                    return Err(failed_operation(&operation.data));
                }
                _ => {}
            }

            if attempt < self.config.max_retries {
                tokio::time::sleep(self.config.frequency).await;
            }
        }

        Err(PublishError::timed_out(format!(
            "Publish not finalized after {} polls",
            self.config.max_retries
        )))
    }
}

fn failed_operation(data: &Value) -> PublishError {
    let message = data
        .get("errorMessage")
        .and_then(Value::as_str)
        .unwrap_or("Publish operation failed");
    let mut err = PublishError::new(message);
    if let Some(kind) = data.get("errorType").and_then(Value::as_str) {
        err = err.with_code(kind);
    }
    err
}

#[async_trait]
impl LedgerClient for DkgHttpClient {
    async fn publish(
        &self,
        record: &ClaimReviewRecord,
        options: &PublishOptions,
    ) -> Result<LedgerId, PublishError> {
        self.health().await;

        tracing::info!(
            node = %self.config.base_url(),
            blockchain = %self.config.blockchain,
            fingerprint = %record.fingerprint(),
            "publishing to DKG"
        );

        let operation_id = self.submit(record, options).await?;
        let ual = self.poll(&operation_id).await?;

        tracing::info!(%ual, operation_id, "published");
        Ok(ual)
    }
}
