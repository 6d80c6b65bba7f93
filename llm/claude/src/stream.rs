//! SSE event parsing for the Anthropic streaming Messages API.
//!
//! Anthropic streaming events differ from OpenAI's format:
//! - `message_start`: initial message metadata
//! - `content_block_start` / `content_block_stop`: block boundaries
//! - `content_block_delta`: incremental content (`text_delta` carries text)
//! - `message_delta`: final stop reason and usage
//! - `message_stop`: end of message
//! - `error`: in-band failure, e.g. `overloaded_error`

use llm::{Error, sse::Frame};
use serde::Deserialize;

/// A raw SSE event from the Anthropic streaming API.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Incremental content within a block.
    #[serde(rename = "content_block_delta")]
    ContentBlockDelta { delta: BlockDelta },
    /// End of message.
    #[serde(rename = "message_stop")]
    MessageStop,
    /// In-band failure.
    #[serde(rename = "error")]
    Error { error: ErrorBody },
    /// Metadata, pings, block boundaries and unknown events.
    #[serde(other)]
    Other,
}

/// Delta payload of a content block.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BlockDelta {
    /// Text.
    #[serde(rename = "text_delta")]
    TextDelta { text: String },
    /// Tool input JSON, thinking and anything newer.
    #[serde(other)]
    Other,
}

/// Body of an `error` event.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

impl Event {
    /// Map this event onto the normalizer's frame.
    pub fn into_frame(self) -> Frame {
        match self {
            Self::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
            } => Frame::Text(text),
            Self::MessageStop => Frame::Done,
            Self::Error { error } => Frame::Error(Error::Upstream {
                status: None,
                body: format!("{}: {}", error.kind, error.message),
                timeout: false,
            }),
            Self::ContentBlockDelta {
                delta: BlockDelta::Other,
            }
            | Self::Other => Frame::Skip,
        }
    }
}

/// Decode one `data:` payload of a Messages stream.
pub fn decode_event(payload: &str) -> serde_json::Result<Frame> {
    serde_json::from_str::<Event>(payload).map(Event::into_frame)
}
