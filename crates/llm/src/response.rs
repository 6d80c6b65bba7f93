//! Non-streaming generation output.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Token counts reported by the vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens generated.
    pub completion_tokens: u32,
    /// Sum of both.
    pub total_tokens: u32,
}

/// The complete output of a non-streaming call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generated text.
    pub content: String,
    /// Provider identifier that produced it.
    pub provider: CompactString,
    /// Model that produced it.
    pub model: String,
    /// Token usage, when the vendor reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}
