//! TruthLens Model: query a chat-completion endpoint for a verdict
//!
//! One request per claim, bounded by the endpoint deadline. Whatever
//! envelope the endpoint wraps its answer in, the caller receives the
//! answer text as a [`RawModelOutput`].

pub mod envelope;
pub mod error;
pub mod http;
pub mod prompt;

pub use envelope::{normalize_body, normalize_envelope, EnvelopeShape};
pub use error::ModelError;
pub use http::{probe_base_url, HttpModelClient};
pub use prompt::{ChatMessage, ChatRequest, SYSTEM_PROMPT};

use async_trait::async_trait;
use truthlens_core::{Claim, ModelEndpointConfig, RawModelOutput};

/// Anything that can turn a claim into raw model output.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn query(
        &self,
        endpoint: &ModelEndpointConfig,
        claim: &Claim,
    ) -> Result<RawModelOutput, ModelError>;
}
