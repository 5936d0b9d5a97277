//! Parsing of markdown answers from a TruthLens agent
//!
//! Agents answer in loosely formatted markdown:
//!
//! ```text
//! **Rating:** 1
//! **Short Explanation:** The tower stands in Paris.
//! **UAL (Knowledge Asset):** did:dkg:otp:2043/0xabc/12
//! ```
use lazy_static::lazy_static;
use regex::Regex;
use truthlens_core::{LedgerId, Rating, Verdict, VerificationResult};

lazy_static! {
    static ref BOLD_RATING: Regex = Regex::new(r"(?i)\*\*Rating:\*\*\s*([0-9]+)").unwrap();
    static ref PLAIN_RATING: Regex = Regex::new(r"(?i)Rating:\s*([0-9]+)").unwrap();
    static ref SHORT_EXPLANATION: Regex =
        Regex::new(r"(?i)\*\*Short Explanation:\*\*\s*").unwrap();
    static ref SHORT_EXPLANATION_END: Regex = Regex::new(r"(?i)\*\*UAL|\n\*\*").unwrap();
    static ref PLAIN_EXPLANATION: Regex = Regex::new(r"(?i)Explanation:\s*").unwrap();
    static ref PLAIN_EXPLANATION_END: Regex = Regex::new(r"(?i)UAL").unwrap();
    static ref STRAY_RATING: Regex = Regex::new(r"\*\*Rating:\*\* [0-9]+").unwrap();
    static ref STRAY_UAL: Regex = Regex::new(r"\*\*UAL.*$").unwrap();
    static ref UAL: Regex = Regex::new(r"did:dkg:otp:\S+").unwrap();
}

pub fn parse_agent_response(content: &str, claim: &str) -> VerificationResult {
    let rating = BOLD_RATING
        .captures(content)
        .or_else(|| PLAIN_RATING.captures(content))
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .map(Rating::from_signal)
        .unwrap_or_default();

    let explanation = section_after(content, &SHORT_EXPLANATION, &SHORT_EXPLANATION_END)
        .or_else(|| section_after(content, &PLAIN_EXPLANATION, &PLAIN_EXPLANATION_END))
        .unwrap_or(content)
        .trim();
    let explanation = STRAY_RATING.replace(explanation, "");
    let explanation = STRAY_UAL.replace(&explanation, "").trim().to_string();

    let mut result = VerificationResult::from_verdict(claim, Verdict::new(rating, explanation));
    result.ledger_id = UAL.find(content).map(|m| LedgerId::new(m.as_str()));
    result
}

/// Text after the first `start` match, up to the first `end` match.
fn section_after<'a>(content: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let rest = &content[start.find(content)?.end()..];
    Some(match end.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use truthlens_core::VerdictLabel;

    #[test]
    fn test_markdown_agent_answer() {
        let content = "**Rating:** 1\n**Short Explanation:** The Eiffel Tower stands in Paris, not Berlin.\n**UAL (Knowledge Asset):** did:dkg:otp:2043/0xabc/12";
        let result = parse_agent_response(content, "The Eiffel Tower is in Berlin");

        assert_eq!(result.claim, "The Eiffel Tower is in Berlin");
        assert_eq!(result.rating.value(), 1);
        assert_eq!(result.verdict, VerdictLabel::VerifiedFalse);
        assert_eq!(result.explanation, "The Eiffel Tower stands in Paris, not Berlin.");
        assert_eq!(
            result.ledger_id.as_ref().map(LedgerId::as_str),
            Some("did:dkg:otp:2043/0xabc/12")
        );
    }

    #[test]
    fn test_plain_labels() {
        let content = "Rating: 4\nExplanation: Consistent with census data. UAL: none";
        let result = parse_agent_response(content, "c");
        assert_eq!(result.rating.value(), 4);
        assert_eq!(result.explanation, "Consistent with census data.");
        assert_eq!(result.ledger_id, None);
    }

    #[test]
    fn test_no_labels_uses_whole_content() {
        let result = parse_agent_response("I could not find anything on this.", "c");
        assert_eq!(result.rating.value(), 3);
        assert_eq!(result.verdict, VerdictLabel::Uncertain);
        assert_eq!(result.explanation, "I could not find anything on this.");
    }

    #[test]
    fn test_stray_fragments_are_removed() {
        let content = "**Short Explanation:** **Rating:** 5 Verified by two sources\n**UAL:** did:dkg:otp:2043/0x1/1";
        let result = parse_agent_response(content, "c");
        assert_eq!(result.rating.value(), 5);
        assert_eq!(result.explanation, "Verified by two sources");
        assert_eq!(
            result.ledger_id.as_ref().map(LedgerId::as_str),
            Some("did:dkg:otp:2043/0x1/1")
        );
    }

    #[test]
    fn test_out_of_range_rating_is_clamped() {
        assert_eq!(parse_agent_response("**Rating:** 9", "c").rating.value(), 5);
        assert_eq!(parse_agent_response("**Rating:** 0", "c").rating.value(), 1);
    }
}
