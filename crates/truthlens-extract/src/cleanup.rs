//! Control-token cleanup.
//!
//! Some models wrap their answer in chat-template delimiters such as
//! `<|channel|>`, `<|message|>` and `<|end|>`. These are stripped before
//! any structural parsing.

use lazy_static::lazy_static;
use regex::Regex;

/// Delimiters seen in the wild, removed explicitly before the generic pass.
const KNOWN_MARKERS: [&str; 3] = ["<|channel|>", "<|message|>", "<|end|>"];

lazy_static! {
    /// Any single-line `<|...|>` delimiter
    static ref CONTROL_TOKEN: Regex = Regex::new(r"<\|.*?\|>").unwrap();
}

/// Strip control tokens and surrounding whitespace.
///
/// Removal repeats until nothing changes, so the output never contains a
/// `<|...|>` token and cleaning twice is the same as cleaning once.
pub fn strip_control_tokens(text: &str) -> String {
    let mut current = text.to_string();

    loop {
        let mut next = current.clone();
        for marker in KNOWN_MARKERS {
            next = next.replace(marker, "");
        }
        next = CONTROL_TOKEN.replace_all(&next, "").into_owned();

        if next == current {
            break;
        }
        current = next;
    }

    current.trim().to_string()
}

/// Whether any control token remains in `text`.
pub(crate) fn has_control_tokens(text: &str) -> bool {
    CONTROL_TOKEN.is_match(text)
}
