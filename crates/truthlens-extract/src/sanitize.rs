//! Explanation sanitation and length capping.

use lazy_static::lazy_static;
use regex::Regex;

use crate::cleanup::{has_control_tokens, strip_control_tokens};

/// Hard cap on explanation length, ellipsis included.
pub const MAX_EXPLANATION_CHARS: usize = 200;

/// Anything shorter than this after sanitation is treated as noise.
pub const MIN_EXPLANATION_CHARS: usize = 10;

pub const FALLBACK_EXPLANATION: &str = "Unable to extract explanation from LLM response.";

/// Used when a JSON answer carries no explanation.
pub const NO_EXPLANATION: &str = "No explanation provided.";

const ELLIPSIS: &str = "...";

lazy_static! {
    static ref JSON_FRAGMENT: Regex = Regex::new(r"\{.*?\}").unwrap();
    static ref RATING_MENTION: Regex = Regex::new(r#"(?i)rating["\s:]+[0-9]"#).unwrap();
}

/// Clean up a heuristically chosen explanation.
///
/// Strips leftover control tokens, brace-delimited fragments and rating
/// mentions. Falls back to [`FALLBACK_EXPLANATION`] when fewer than
/// [`MIN_EXPLANATION_CHARS`] characters survive.
pub fn sanitize_explanation(text: &str) -> String {
    let stripped = strip_control_tokens(text);
    debug_assert!(!has_control_tokens(&stripped));
    let stripped = JSON_FRAGMENT.replace_all(&stripped, "");
    let stripped = RATING_MENTION.replace_all(&stripped, "");
    let stripped = stripped.trim();

    if stripped.chars().count() < MIN_EXPLANATION_CHARS {
        return FALLBACK_EXPLANATION.to_string();
    }

    cap_length(stripped)
}

/// Truncate to [`MAX_EXPLANATION_CHARS`] characters, marking the cut with
/// `...`. Counts characters, not bytes.
pub fn cap_length(text: &str) -> String {
    if text.chars().count() <= MAX_EXPLANATION_CHARS {
        return text.to_string();
    }

    let kept: String = text
        .chars()
        .take(MAX_EXPLANATION_CHARS - ELLIPSIS.len())
        .collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_fragments_and_rating_mentions() {
        let out = sanitize_explanation("Rating: 2 The claim {\"x\": 1} contradicts records");
        assert_eq!(out, "The claim  contradicts records");
    }

    #[test]
    fn test_short_result_falls_back() {
        assert_eq!(sanitize_explanation(""), FALLBACK_EXPLANATION);
        assert_eq!(sanitize_explanation("ok"), FALLBACK_EXPLANATION);
        assert_eq!(sanitize_explanation("{\"a\":1} rating: 5"), FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_long_text_is_capped_with_ellipsis() {
        let long = "word ".repeat(100);
        let out = sanitize_explanation(&long);
        assert!(out.chars().count() <= MAX_EXPLANATION_CHARS);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_cap_counts_characters() {
        let text = "é".repeat(250);
        let out = cap_length(&text);
        assert_eq!(out.chars().count(), MAX_EXPLANATION_CHARS);
        assert_eq!(cap_length("short"), "short");
    }
}
