//! Chat completions request body.

use llm::GenerationRequest;
use serde::Serialize;

/// A chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// `system` or `user`.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

impl Message {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// The chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Model identifier.
    pub model: String,
    /// System message (when present) followed by the user prompt.
    pub messages: Vec<Message>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Token budget.
    pub max_tokens: u32,
    /// Whether to stream.
    pub stream: bool,
}

impl Request {
    /// Build the body for `request`, falling back to `model`.
    ///
    /// The system prompt is its own message and never merged into the user turn.
    pub fn new(model: &str, request: &GenerationRequest, stream: bool) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system() {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(request.prompt.as_str()));

        Self {
            model: request
                .model_override
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(model)
                .to_owned(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream,
        }
    }
}
