//! The uniform generation request.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Temperature used when neither the request nor the agent sets one.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Token budget used when neither the request nor the agent sets one.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Accepted sampling temperatures.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

/// Accepted token budgets.
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 1..=8192;

/// A single generation call, independent of vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user prompt.
    pub prompt: String,

    /// Optional system prompt, sent as a separate message or field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// Sampling temperature, within [`TEMPERATURE_RANGE`].
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Token budget, within [`MAX_TOKENS_RANGE`].
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Model to use for this call instead of the adapter's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_override: Option<String>,

    /// Whether the caller wants a delta stream.
    #[serde(default)]
    pub stream: bool,
}

impl GenerationRequest {
    /// Create a non-streaming request with default parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            model_override: None,
            stream: false,
        }
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_prompt = Some(system.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the model for this call.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    /// Set the stream flag.
    pub fn streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    /// The system prompt, if present and not blank.
    pub fn system(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .filter(|system| !system.trim().is_empty())
    }

    /// Reject requests that must never reach a vendor.
    ///
    /// Out-of-range parameters are refused, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(Error::InvalidParameter {
                name: "temperature",
                value: self.temperature.to_string(),
            });
        }
        if !MAX_TOKENS_RANGE.contains(&self.max_tokens) {
            return Err(Error::InvalidParameter {
                name: "max_tokens",
                value: self.max_tokens.to_string(),
            });
        }
        Ok(())
    }
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
