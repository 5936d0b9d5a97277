//! TruthLens Client: the caller side of the proxy
//!
//! Talks to a running proxy, fakes verdicts offline in mock mode, checks
//! model endpoint connectivity and reads agent-style markdown answers.

pub mod agent;
pub mod error;
pub mod mock;
pub mod proxy;

pub use agent::parse_agent_response;
pub use error::ClientError;
pub use mock::{mock_verify, mock_verify_with, MOCK_FALSE_EXPLANATION, MOCK_TRUE_EXPLANATION};
pub use proxy::{ProxyClient, DEFAULT_PROXY_URL};

pub const DEFAULT_LLM_URL: &str = "http://localhost:8081/v1/chat/completions";

/// Whether the model endpoint's base path answers at all.
pub async fn probe_model(url: &str) -> bool {
    match truthlens_model::HttpModelClient::new() {
        Ok(client) => client.probe(url).await,
        Err(e) => {
            tracing::warn!(error = %e, "could not build HTTP client");
            false
        }
    }
}
