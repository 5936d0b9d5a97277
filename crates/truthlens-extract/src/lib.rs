//! TruthLens Extract: free-text model output to structured verdict
//!
//! Models are asked for a JSON object but answer with clean JSON, prose,
//! or chat-template noise. Extraction is total: any input string yields a
//! verdict with a rating in `1..=5` and a non-empty explanation of at most
//! 200 characters.
//!
//! # Layers
//!
//! ```text
//! raw ─► cleanup ─► JsonCandidate ─► LabeledField ─► RawFallback
//!                        │                │               │
//!                        └──── first Some wins ───────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use truthlens_extract::extract;
//!
//! let verdict = extract(r#"{"rating": 5, "explanation": "Confirmed by sources"}"#);
//! assert_eq!(verdict.rating.value(), 5);
//! assert_eq!(verdict.explanation, "Confirmed by sources");
//! ```

pub mod cleanup;
pub mod sanitize;
pub mod strategy;

pub use cleanup::strip_control_tokens;
pub use sanitize::{
    FALLBACK_EXPLANATION, MAX_EXPLANATION_CHARS, MIN_EXPLANATION_CHARS, NO_EXPLANATION,
};
pub use strategy::ExtractionStrategy;

use truthlens_core::Verdict;

/// A verdict together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub verdict: Verdict,
    pub strategy: ExtractionStrategy,
    /// Input after control-token cleanup
    pub cleaned: String,
}

/// Extract a verdict from raw model output. Never fails.
pub fn extract(raw: impl AsRef<str>) -> Verdict {
    extract_with_trace(raw).verdict
}

/// Like [`extract`], also reporting which strategy produced the verdict.
pub fn extract_with_trace(raw: impl AsRef<str>) -> Extraction {
    let cleaned = strip_control_tokens(raw.as_ref());

    let (strategy, verdict) = ExtractionStrategy::ORDERED
        .iter()
        .find_map(|strategy| strategy.apply(&cleaned).map(|v| (*strategy, v)))
        .unwrap_or_else(|| {
            (
                ExtractionStrategy::RawFallback,
                strategy::raw_fallback(&cleaned),
            )
        });

    tracing::debug!(
        strategy = strategy.name(),
        rating = verdict.rating.value(),
        "verdict extracted"
    );

    Extraction {
        verdict,
        strategy,
        cleaned,
    }
}
