//! ClaimReview JSON-LD record
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use truthlens_core::{Verdict, VerdictLabel};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const AUTHOR_NAME: &str = "TruthLens AI";

/// A schema.org `ClaimReview` describing one verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReviewRecord {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "claimReviewed")]
    pub claim_reviewed: String,
    #[serde(rename = "reviewRating")]
    pub review_rating: ReviewRating,
    pub text: String,
    pub author: Organization,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "inLanguage")]
    pub in_language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRating {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "ratingValue")]
    pub rating_value: u8,
    #[serde(rename = "bestRating")]
    pub best_rating: String,
    #[serde(rename = "worstRating")]
    pub worst_rating: String,
    /// `True`, `False` or `Uncertain`
    #[serde(rename = "alternateName")]
    pub alternate_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

impl ClaimReviewRecord {
    pub fn from_verdict(claim: &str, verdict: &Verdict, now: DateTime<Utc>) -> Self {
        let label: VerdictLabel = verdict.label();
        Self {
            context: SCHEMA_CONTEXT.to_string(),
            kind: "ClaimReview".to_string(),
            claim_reviewed: claim.to_string(),
            review_rating: ReviewRating {
                kind: "Rating".to_string(),
                rating_value: verdict.rating.value(),
                best_rating: "5".to_string(),
                worst_rating: "1".to_string(),
                alternate_name: label.short_name().to_string(),
            },
            text: verdict.explanation.clone(),
            author: Organization {
                kind: "Organization".to_string(),
                name: AUTHOR_NAME.to_string(),
            },
            date_published: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            in_language: "en".to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// blake3 over the serialized record, `0x`-prefixed.
    pub fn fingerprint(&self) -> String {
        let data = serde_json::to_string(self).unwrap_or_default();
        format!("0x{}", blake3::hash(data.as_bytes()))
    }
}
