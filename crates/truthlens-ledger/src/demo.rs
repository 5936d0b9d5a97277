//! Offline ledger for demo deployments
use async_trait::async_trait;
use truthlens_core::LedgerId;

use crate::{ClaimReviewRecord, LedgerClient, PublishError, PublishOptions};

pub const DEMO_UAL_PREFIX: &str = "did:dkg:otp:20430/0x";

const DEMO_HEX_CHARS: usize = 24;

/// Returns a fresh UAL-shaped identifier without touching the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoLedger;

impl DemoLedger {
    pub fn generate_id() -> LedgerId {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        LedgerId::new(format!("{}{}", DEMO_UAL_PREFIX, &hex[..DEMO_HEX_CHARS]))
    }
}

#[async_trait]
impl LedgerClient for DemoLedger {
    async fn publish(
        &self,
        record: &ClaimReviewRecord,
        _options: &PublishOptions,
    ) -> Result<LedgerId, PublishError> {
        let id = Self::generate_id();
        tracing::info!(ual = %id, fingerprint = %record.fingerprint(), "demo publish");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = DemoLedger::generate_id();
        let hex = id.as_str().strip_prefix(DEMO_UAL_PREFIX).unwrap();
        assert_eq!(hex.len(), 24);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ids_are_fresh() {
        assert_ne!(DemoLedger::generate_id(), DemoLedger::generate_id());
    }
}
