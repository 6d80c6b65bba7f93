//! Anthropic Messages request body.

use llm::GenerationRequest;
use serde::Serialize;

/// A message in the Anthropic request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Always `user` here.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

/// The Messages API request body.
///
/// The system prompt is a top-level field, never a message.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Model identifier.
    pub model: String,
    /// Token budget.
    pub max_tokens: u32,
    /// The user prompt.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: f32,
    /// System prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Whether to stream.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

impl Request {
    /// Build the body for `request`, falling back to `model`.
    pub fn new(model: &str, request: &GenerationRequest, stream: bool) -> Self {
        Self {
            model: request
                .model_override
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(model)
                .to_owned(),
            max_tokens: request.max_tokens,
            messages: vec![Message {
                role: "user",
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
            system: request.system().map(str::to_owned),
            stream,
        }
    }
}
