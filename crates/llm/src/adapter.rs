//! The uniform adapter contract.

use crate::{DeltaStream, GenerationRequest, GenerationResult, Result, WireFormat};
use async_trait::async_trait;

/// Output of [`Adapter::generate`].
pub enum Generation {
    /// A complete, non-streamed result.
    Complete(GenerationResult),
    /// A lazy delta stream.
    Stream(DeltaStream),
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete(result) => f.debug_tuple("Complete").field(result).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// One vendor behind the uniform generation contract.
///
/// Implementations resolve their credential at construction and validate
/// every request before touching the network.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Registry identifier of the provider.
    fn provider(&self) -> &str;

    /// Model used when the request carries no override.
    fn model(&self) -> &str;

    /// Wire format chosen for this instance.
    fn wire_format(&self) -> WireFormat;

    /// Generate the complete text for `request`.
    async fn generate_text(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    /// Start streaming `request`.
    ///
    /// Validation errors are returned directly. Upstream failures, including
    /// a non-2xx reply, arrive as the terminal error delta.
    fn generate_stream(&self, request: &GenerationRequest) -> Result<DeltaStream>;

    /// Dispatch on the request's stream flag.
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation> {
        if request.stream {
            self.generate_stream(request).map(Generation::Stream)
        } else {
            self.generate_text(request).await.map(Generation::Complete)
        }
    }
}
