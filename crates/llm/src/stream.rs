//! Streaming deltas.

use crate::{Error, Result};
use futures_core::Stream;
use futures_util::StreamExt;
use std::pin::Pin;

/// One unit of a streamed generation.
///
/// A stream yields any number of `Text` deltas followed by exactly one
/// terminal `Done` or `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamDelta {
    /// An incremental, non-empty text fragment.
    Text(String),
    /// The upstream finished normally.
    Done,
    /// The upstream failed; no further deltas follow.
    Error(Error),
}

impl StreamDelta {
    /// Whether this delta ends the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// The text fragment, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A lazy, single-use sequence of deltas. Dropping it closes the connection.
pub type DeltaStream = Pin<Box<dyn Stream<Item = StreamDelta> + Send>>;

/// Drain a stream and concatenate its text, failing on a terminal error.
pub async fn collect_text(mut stream: DeltaStream) -> Result<String> {
    let mut content = String::new();
    while let Some(delta) = stream.next().await {
        match delta {
            StreamDelta::Text(text) => content.push_str(&text),
            StreamDelta::Done => break,
            StreamDelta::Error(e) => return Err(e),
        }
    }
    Ok(content)
}
