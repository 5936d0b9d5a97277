//! TruthLens Ledger: anchor verdicts as ClaimReview records
//!
//! A [`LedgerClient`] takes a [`ClaimReviewRecord`] and returns the
//! identifier the ledger assigned to it. [`DkgHttpClient`] talks to a DKG
//! node's HTTP API; [`DemoLedger`] fabricates identifiers offline.

pub mod demo;
pub mod dkg;
pub mod error;
pub mod record;

pub use demo::DemoLedger;
pub use dkg::{DkgConfig, DkgHttpClient};
pub use error::{PublishError, UNKNOWN_PUBLISH_FAILURE};
pub use record::{ClaimReviewRecord, Organization, ReviewRating};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use truthlens_core::LedgerId;

/// Asset options sent alongside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOptions {
    pub keywords: Vec<String>,
    pub visibility: String,
    #[serde(rename = "epochsNum")]
    pub epochs_num: u32,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            keywords: vec!["TruthLens".to_string(), "FactCheck".to_string()],
            visibility: "public".to_string(),
            epochs_num: 2,
        }
    }
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn publish(
        &self,
        record: &ClaimReviewRecord,
        options: &PublishOptions,
    ) -> Result<LedgerId, PublishError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let json = serde_json::to_value(PublishOptions::default()).unwrap();
        assert_eq!(json["keywords"], serde_json::json!(["TruthLens", "FactCheck"]));
        assert_eq!(json["visibility"], "public");
        assert_eq!(json["epochsNum"], 2);
    }
}
