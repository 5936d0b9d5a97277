//! Chat request body
use serde::{Deserialize, Serialize};
use truthlens_core::{Claim, ModelEndpointConfig};

pub const SYSTEM_PROMPT: &str = "You are a fact-checking assistant. Analyze the claim and return a JSON object with two fields:
- \"rating\": an integer from 1 (False) to 5 (True).
- \"explanation\": a short summary string.
Do NOT return any other text or internal monologue. Return ONLY the JSON.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f32,
}

impl ChatRequest {
    /// Fixed instruction as the system turn, the claim as the user turn.
    pub fn for_claim(endpoint: &ModelEndpointConfig, claim: &Claim) -> Self {
        Self {
            model: endpoint.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(format!("Claim: \"{}\"", claim.as_str())),
            ],
            stream: endpoint.stream,
            temperature: endpoint.temperature,
        }
    }
}
