//! Server-sent event frames for HTTP front ends.
//!
//! Every frame is `data: <json>\n\n`. Text deltas become
//! `{"content": ...}`, a failure becomes `{"error": ...}`, and each stream
//! ends with the literal `data: [DONE]\n\n`.

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{DeltaStream, Error, StreamDelta};
use serde_json::{Value, json};

/// Final frame of every stream.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Encode `payload` as one frame.
pub fn frame(payload: &Value) -> String {
    format!("data: {payload}\n\n")
}

/// The frame for a text fragment.
pub fn content_frame(text: &str) -> String {
    frame(&json!({ "content": text }))
}

/// The frame for a failure.
pub fn error_frame(error: &Error) -> String {
    frame(&json!({ "error": error.to_string() }))
}

/// Map a delta stream to frames, always ending with [`DONE_FRAME`].
pub fn frames(mut deltas: DeltaStream) -> impl Stream<Item = String> + Send {
    stream! {
        while let Some(delta) = deltas.next().await {
            match delta {
                StreamDelta::Text(text) => yield content_frame(&text),
                StreamDelta::Done => break,
                StreamDelta::Error(e) => {
                    yield error_frame(&e);
                    break;
                }
            }
        }
        yield DONE_FRAME.to_owned();
    }
}
