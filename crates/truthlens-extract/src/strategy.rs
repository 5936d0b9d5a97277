//! Ordered extraction strategies.
//!
//! Each strategy is a pure function from cleaned text to an optional
//! verdict. They are tried in [`ExtractionStrategy::ORDERED`] order and the
//! first `Some` wins. [`ExtractionStrategy::RawFallback`] always yields, so
//! the sequence is total.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use truthlens_core::{Rating, Verdict};

use crate::sanitize::{cap_length, sanitize_explanation, NO_EXPLANATION};

lazy_static! {
    /// Shortest brace-delimited span, across lines
    static ref JSON_CANDIDATE: Regex = Regex::new(r"(?s)\{.*?\}").unwrap();

    /// Rating patterns in priority order
    static ref RATING_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#"(?i)rating["\s:]+([0-9])"#).unwrap(),
        Regex::new(r"([0-9])/5").unwrap(),
        Regex::new(r#""rating":\s*([0-9])"#).unwrap(),
        Regex::new(r"(?i)Rating:\s*([0-9])").unwrap(),
    ];

    /// Explanation patterns in priority order
    static ref EXPLANATION_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#"(?i)explanation["\s:]+["']?([^"'\n}]+)"#).unwrap(),
        Regex::new(r#""explanation":\s*"([^"]+)""#).unwrap(),
        Regex::new(r"(?i)Explanation:\s*([^\n]+)").unwrap(),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStrategy {
    /// First embedded JSON object carrying `rating` or `explanation`
    JsonCandidate,
    /// Labeled `rating`/`explanation` fields found by pattern
    LabeledField,
    /// Rating 3, sanitized text as explanation
    RawFallback,
}

impl ExtractionStrategy {
    pub const ORDERED: [ExtractionStrategy; 3] = [
        ExtractionStrategy::JsonCandidate,
        ExtractionStrategy::LabeledField,
        ExtractionStrategy::RawFallback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExtractionStrategy::JsonCandidate => "json_candidate",
            ExtractionStrategy::LabeledField => "labeled_field",
            ExtractionStrategy::RawFallback => "raw_fallback",
        }
    }

    /// Run this strategy alone on already-cleaned text.
    pub fn apply(self, cleaned: &str) -> Option<Verdict> {
        match self {
            ExtractionStrategy::JsonCandidate => json_candidate(cleaned),
            ExtractionStrategy::LabeledField => labeled_field(cleaned),
            ExtractionStrategy::RawFallback => Some(raw_fallback(cleaned)),
        }
    }
}

/// Scan left to right for brace-delimited candidates and accept the first
/// one that decodes to an object with a `rating` or `explanation` key.
///
/// Candidates are shortest-match, so a nested object never decodes as a
/// whole; only flat objects are recognized.
pub fn json_candidate(cleaned: &str) -> Option<Verdict> {
    JSON_CANDIDATE.find_iter(cleaned).find_map(|candidate| {
        let object: Map<String, Value> = serde_json::from_str(candidate.as_str()).ok()?;
        if !object.contains_key("rating") && !object.contains_key("explanation") {
            return None;
        }

        let rating = object
            .get("rating")
            .and_then(coerce_rating)
            .unwrap_or(Rating::UNCERTAIN);
        let explanation = object
            .get("explanation")
            .and_then(explanation_text)
            .unwrap_or_else(|| NO_EXPLANATION.to_string());

        Some(Verdict::new(rating, cap_length(&explanation)))
    })
}

/// Locate a rating and an explanation independently by pattern.
///
/// Yields `None` when neither is found so the raw fallback takes over.
pub fn labeled_field(cleaned: &str) -> Option<Verdict> {
    let rating = first_capture(&RATING_PATTERNS, cleaned)
        .and_then(|digit| digit.parse::<i64>().ok())
        .map(Rating::from_signal);
    let explanation = first_capture(&EXPLANATION_PATTERNS, cleaned);

    if rating.is_none() && explanation.is_none() {
        return None;
    }

    let explanation = explanation.unwrap_or(cleaned);
    Some(Verdict::new(
        rating.unwrap_or(Rating::UNCERTAIN),
        sanitize_explanation(explanation.trim()),
    ))
}

pub fn raw_fallback(cleaned: &str) -> Verdict {
    Verdict::new(Rating::UNCERTAIN, sanitize_explanation(cleaned))
}

fn first_capture<'t>(patterns: &[Regex], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Integers and integer-like strings; fractional numbers round.
fn coerce_rating(value: &Value) -> Option<Rating> {
    let raw = match value {
        // A literal zero counts as a missing rating.
        Value::Number(n) if n.as_f64() == Some(0.0) => return Some(Rating::UNCERTAIN),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => round_finite(n.as_f64()?)?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => round_finite(s.parse::<f64>().ok()?)?,
            }
        }
        _ => return None,
    };
    Some(Rating::from_signal(raw))
}

fn round_finite(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.round() as i64)
}

fn explanation_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}
