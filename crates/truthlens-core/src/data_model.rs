//! Data Model: Claim, Rating, Verdict, VerificationResult
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TruthLensError;

/// The text being fact-checked.
///
/// Only constructible from text that is non-empty after trimming. The
/// original text is kept as supplied so it can be echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Claim(String);

impl Claim {
    pub fn new(text: impl Into<String>) -> Result<Self, TruthLensError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TruthLensError::InvalidInput(
                "Missing 'claim' field".to_string(),
            ));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters, for log lines.
    pub fn preview(&self, max_chars: usize) -> String {
        self.0.chars().take(max_chars).collect()
    }
}

impl TryFrom<String> for Claim {
    type Error = TruthLensError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Claim::new(value)
    }
}

impl From<Claim> for String {
    fn from(claim: Claim) -> Self {
        claim.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Truthfulness score from 1 (false) to 5 (true).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Resolved when the model output carries no usable rating.
    pub const UNCERTAIN: Rating = Rating(3);

    /// Exact constructor: `None` outside `1..=5`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Coerce a raw numeric signal into range.
    ///
    /// Values below 1 clamp to 1 and values above 5 clamp to 5, so the
    /// label keeps the direction of the signal.
    pub fn from_signal(value: i64) -> Self {
        if value < i64::from(Self::MIN) {
            Self(Self::MIN)
        } else if value > i64::from(Self::MAX) {
            Self(Self::MAX)
        } else {
            Self(value as u8)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> VerdictLabel {
        VerdictLabel::from_rating(self)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::UNCERTAIN
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Rating::new)
            .ok_or_else(|| format!("rating {} outside 1..=5", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Human-facing label derived from a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictLabel {
    #[serde(rename = "Verified True")]
    VerifiedTrue,
    #[serde(rename = "Verified False")]
    VerifiedFalse,
    #[serde(rename = "Uncertain")]
    Uncertain,
}

impl VerdictLabel {
    /// The one place a rating becomes a label.
    pub fn from_rating(rating: Rating) -> Self {
        match rating.value() {
            4..=5 => VerdictLabel::VerifiedTrue,
            1..=2 => VerdictLabel::VerifiedFalse,
            _ => VerdictLabel::Uncertain,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerdictLabel::VerifiedTrue => "Verified True",
            VerdictLabel::VerifiedFalse => "Verified False",
            VerdictLabel::Uncertain => "Uncertain",
        }
    }

    /// Bounded form used in ClaimReview `alternateName`.
    pub fn short_name(self) -> &'static str {
        match self {
            VerdictLabel::VerifiedTrue => "True",
            VerdictLabel::VerifiedFalse => "False",
            VerdictLabel::Uncertain => "Uncertain",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured rating + explanation derived from model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub rating: Rating,
    pub explanation: String,
}

impl Verdict {
    pub fn new(rating: Rating, explanation: impl Into<String>) -> Self {
        Self {
            rating,
            explanation: explanation.into(),
        }
    }

    pub fn label(&self) -> VerdictLabel {
        self.rating.label()
    }
}

/// Decoded textual content of a model answer, after envelope
/// normalization. Consumed once by extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawModelOutput(String);

impl RawModelOutput {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RawModelOutput {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque identifier returned by the ledger for an anchored record
/// (a UAL such as `did:dkg:otp:20430/0x...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerId(String);

impl LedgerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sole externally visible output of a verification.
///
/// `ual` is absent whenever publishing was skipped or failed. `dkgError`
/// only appears in development deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub claim: String,
    pub rating: Rating,
    pub verdict: VerdictLabel,
    pub explanation: String,
    #[serde(rename = "ual", default, skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<LedgerId>,
    #[serde(rename = "dkgError", default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl VerificationResult {
    /// Result with no ledger identifier and no diagnostic.
    pub fn from_verdict(claim: &str, verdict: Verdict) -> Self {
        Self {
            claim: claim.to_string(),
            rating: verdict.rating,
            verdict: verdict.label(),
            explanation: verdict.explanation,
            ledger_id: None,
            diagnostic: None,
        }
    }
}
