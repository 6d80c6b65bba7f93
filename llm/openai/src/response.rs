//! Chat completions responses and stream chunks.

use llm::{Error, Usage, sse::Frame};
use serde::Deserialize;

/// A non-streaming chat completions response.
#[derive(Debug, Deserialize)]
pub struct Response {
    /// Completion choices; only the first is read.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,
}

/// The generated message of a choice.
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text, `null` when the model produced none.
    #[serde(default)]
    pub content: Option<String>,
}

impl Response {
    /// Content of the first choice. `None` when there are no choices.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref().unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct Chunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ChunkError>,
}

/// In-band failure reported after the stream has started.
#[derive(Deserialize)]
struct ChunkError {
    #[serde(default)]
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl ChunkError {
    fn into_error(self) -> Error {
        let body = match self.kind {
            Some(kind) if !kind.is_empty() => format!("{}: {}", kind, self.message),
            _ => self.message,
        };
        Error::Upstream {
            status: None,
            body,
            timeout: false,
        }
    }
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Default, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Decode one `data:` payload of a chat completions stream.
///
/// Chunks without delta content (role announcements, usage, finish
/// reasons) are skipped. An `error` object ends the stream.
pub fn decode_chunk(payload: &str) -> serde_json::Result<Frame> {
    let chunk: Chunk = serde_json::from_str(payload)?;
    if let Some(error) = chunk.error {
        return Ok(Frame::Error(error.into_error()));
    }
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .map_or(Frame::Skip, Frame::Text))
}
