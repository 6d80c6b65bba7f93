//! Anthropic Messages response.

use llm::Usage;
use serde::Deserialize;

/// A non-streaming Messages API response.
#[derive(Debug, Deserialize)]
pub struct Response {
    /// Content blocks in order.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Token usage.
    #[serde(default)]
    pub usage: Option<MessageUsage>,
}

/// One content block. Only text blocks carry generated text.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Generated text.
    #[serde(rename = "text")]
    Text { text: String },
    /// Tool use, thinking and anything newer.
    #[serde(other)]
    Other,
}

/// Anthropic usage counts.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Response {
    /// Concatenate the text blocks, skipping everything else.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect()
    }

    /// Usage in the uniform shape.
    pub fn usage(&self) -> Option<Usage> {
        self.usage.as_ref().map(|u| Usage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        })
    }
}
