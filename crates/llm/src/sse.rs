//! Streaming normalizer shared by every adapter.
//!
//! Upstream bodies arrive as arbitrary byte chunks. [`LineBuffer`] reassembles
//! them into lines, only `data:` lines are considered, and each payload is
//! handed to a vendor decoder that turns it into a [`Frame`]. [`normalize`]
//! drives the whole thing and guarantees the delta stream ends with exactly
//! one terminal marker:
//!
//! - the literal `[DONE]` payload, or a decoder-signalled [`Frame::Done`],
//!   stops consumption even if the connection stays open;
//! - an in-band vendor error ([`Frame::Error`]) ends the stream as an error;
//! - a payload that fails to decode is logged and skipped;
//! - a transport failure or an idle deadline becomes a terminal error delta;
//! - end of body without a stop marker counts as done.

use crate::{DeltaStream, Error, HttpTransport, StreamDelta};
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use serde::Serialize;
use std::time::Duration;

/// Literal payload OpenAI-style vendors send to end a stream.
pub const DONE: &str = "[DONE]";

/// What a vendor decoder made of one `data:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Incremental text. Empty text is dropped by the normalizer.
    Text(String),
    /// A well-formed event that carries no text.
    Skip,
    /// The vendor's own end-of-stream event.
    Done,
    /// The vendor reported a failure in-band.
    Error(Error),
}

/// Longest line [`LineBuffer`] will hold. Longer lines are dropped whole.
pub const MAX_LINE: usize = 1 << 20;

/// Reassembles byte chunks into complete lines.
///
/// Splits on `\n`, strips a trailing `\r`, and decodes each line only once it
/// is complete so multi-byte characters split across chunks survive. Each
/// byte is scanned once, and a line that grows past [`MAX_LINE`] is discarded
/// up to its newline instead of buffered.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
    /// Prefix of `pending` already known to hold no newline.
    scanned: usize,
    /// Dropping the rest of an overlong line.
    skipping: bool,
}

impl LineBuffer {
    /// Feed a chunk and return the lines it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[self.scanned..]
            .iter()
            .position(|b| *b == b'\n')
        {
            let end = self.scanned + offset;
            if self.skipping {
                self.skipping = false;
            } else {
                lines.push(decode_line(&self.pending[start..end]));
            }
            start = end + 1;
            self.scanned = start;
        }
        self.pending.drain(..start);
        self.scanned = self.pending.len();

        if self.pending.len() > MAX_LINE {
            if !self.skipping {
                tracing::warn!("dropping stream line longer than {MAX_LINE} bytes");
            }
            self.pending.clear();
            self.scanned = 0;
            self.skipping = true;
        }
        lines
    }

    /// Flush whatever is left once the body ends.
    pub fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        if std::mem::take(&mut self.skipping) {
            self.pending.clear();
            return None;
        }
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// The payload of a `data:` line, trimmed. `None` for any other line.
pub fn data(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim)
}

/// Turn an SSE byte stream into a [`DeltaStream`].
///
/// Every read of the next chunk is bounded by `idle`. Dropping the returned
/// stream drops `body`, which closes the connection.
pub fn normalize<S, B, E, F>(body: S, idle: Duration, mut decode: F) -> DeltaStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<Error> + Send + 'static,
    F: FnMut(&str) -> serde_json::Result<Frame> + Send + 'static,
{
    Box::pin(stream! {
        let mut body = std::pin::pin!(body);
        let mut lines = LineBuffer::default();
        let mut count = 0usize;
        loop {
            let next = match tokio::time::timeout(idle, body.next()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::warn!("stream idle for {}s after {count} deltas", idle.as_secs_f32());
                    yield StreamDelta::Error(Error::timeout(idle));
                    return;
                }
            };

            let (complete, ended) = match next {
                Some(Ok(chunk)) => (lines.push(chunk.as_ref()), false),
                Some(Err(e)) => {
                    let e: Error = e.into();
                    tracing::error!("stream failed after {count} deltas: {e}");
                    yield StreamDelta::Error(e);
                    return;
                }
                None => (lines.finish().into_iter().collect(), true),
            };

            for line in complete {
                tracing::trace!("chunk: {line}");
                let Some(payload) = data(&line) else {
                    continue;
                };
                if payload.is_empty() {
                    continue;
                }
                if payload == DONE {
                    tracing::debug!("received {DONE} after {count} deltas");
                    yield StreamDelta::Done;
                    return;
                }
                match decode(payload) {
                    Ok(Frame::Text(text)) if !text.is_empty() => {
                        count += 1;
                        yield StreamDelta::Text(text);
                    }
                    Ok(Frame::Text(_) | Frame::Skip) => {}
                    Ok(Frame::Done) => {
                        tracing::debug!("stream finished after {count} deltas");
                        yield StreamDelta::Done;
                        return;
                    }
                    Ok(Frame::Error(e)) => {
                        tracing::error!("upstream reported failure after {count} deltas: {e}");
                        yield StreamDelta::Error(e);
                        return;
                    }
                    Err(e) => tracing::warn!("failed to parse chunk: {e}, data: {payload}"),
                }
            }

            if ended {
                tracing::debug!("stream closed after {count} deltas");
                yield StreamDelta::Done;
                return;
            }
        }
    })
}

/// POST `body` through `transport` and normalize the SSE reply.
///
/// Nothing is sent until the stream is first polled. A failed connection or
/// a non-2xx reply becomes the single terminal error delta.
pub fn open<T, F>(transport: HttpTransport, body: T, decode: F) -> DeltaStream
where
    T: Serialize + Send + Sync + 'static,
    F: FnMut(&str) -> serde_json::Result<Frame> + Send + 'static,
{
    Box::pin(stream! {
        let response = match transport.open(&body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("stream request to {} failed: {e}", transport.endpoint());
                yield StreamDelta::Error(e);
                return;
            }
        };
        tracing::debug!("stream opened with status {}", response.status());

        let mut deltas = normalize(response.bytes_stream(), transport.timeouts().stream, decode);
        while let Some(delta) = deltas.next().await {
            yield delta;
        }
    })
}
