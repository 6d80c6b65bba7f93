//! Terminal output for generations.

use anyhow::Result;
use futures_util::StreamExt;
use llm::{Generation, StreamDelta};
use tokio::io::{AsyncWriteExt, stdout};

/// Print a generation, writing stream deltas as they arrive.
///
/// A terminal error delta is returned as an error after the partial text.
pub async fn print_generation(generation: Generation) -> Result<()> {
    match generation {
        Generation::Complete(result) => {
            println!("{}", result.content);
            if let Some(usage) = result.usage {
                tracing::debug!(
                    "{}/{} used {} tokens",
                    result.provider,
                    result.model,
                    usage.total_tokens
                );
            }
            Ok(())
        }
        Generation::Stream(mut stream) => {
            let mut out = stdout();
            while let Some(delta) = stream.next().await {
                match delta {
                    StreamDelta::Text(text) => {
                        out.write_all(text.as_bytes()).await?;
                        out.flush().await?;
                    }
                    StreamDelta::Done => break,
                    StreamDelta::Error(e) => {
                        out.write_all(b"\n").await?;
                        out.flush().await?;
                        return Err(e.into());
                    }
                }
            }
            out.write_all(b"\n").await?;
            out.flush().await?;
            Ok(())
        }
    }
}
