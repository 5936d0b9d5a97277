//! Response envelope normalization.
//!
//! Endpoints wrap the answer differently: OpenAI-compatible servers use
//! `choices[0].message.content`, some proxies `message.content`, Ollama's
//! generate API `response`. Normalization is total over any JSON value.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `choices[0].message.content`
    Choices,
    /// `message.content`
    Message,
    /// `response`
    Response,
    /// Top-level JSON string, or a body that is not JSON at all
    RawString,
    /// None matched; the payload itself, serialized
    Serialized,
}

/// Decode an HTTP body and normalize it. Non-JSON bodies are taken as
/// the answer text verbatim.
pub fn normalize_body(body: &str) -> (EnvelopeShape, String) {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => normalize_envelope(&payload),
        Err(_) => (EnvelopeShape::RawString, body.to_string()),
    }
}

pub fn normalize_envelope(payload: &Value) -> (EnvelopeShape, String) {
    if let Some(content) = payload
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return (EnvelopeShape::Choices, content.to_string());
    }

    if let Some(content) = payload
        .pointer("/message/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return (EnvelopeShape::Message, content.to_string());
    }

    if let Some(content) = payload
        .get("response")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return (EnvelopeShape::Response, content.to_string());
    }

    if let Value::String(content) = payload {
        return (EnvelopeShape::RawString, content.clone());
    }

    (EnvelopeShape::Serialized, payload.to_string())
}
