//! Static per-provider configuration.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Request/response shape a vendor speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// OpenAI chat completions.
    #[serde(rename = "openai")]
    OpenAI,
    /// Anthropic messages.
    #[serde(alias = "anthropic-native", alias = "native")]
    Anthropic,
    /// Volcengine Ark, OpenAI-shaped under a versioned base path.
    Volcengine,
}

impl WireFormat {
    /// Identifier used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Volcengine => "volcengine",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" | "anthropic-native" | "native" => Ok(Self::Anthropic),
            "volcengine" => Ok(Self::Volcengine),
            other => Err(Error::Config(format!("unknown wire format '{other}'"))),
        }
    }
}

/// Defaults and environment names for one provider.
///
/// Profiles are compile-time constants owned by the vendor crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Registry identifier.
    pub name: &'static str,
    /// Default base URL, without trailing slash.
    pub base_url: &'static str,
    /// Path appended to the base URL for generation calls.
    pub chat_path: &'static str,
    /// Default model identifier.
    pub default_model: &'static str,
    /// Environment variables consulted for the credential, in order.
    pub credentials: &'static [&'static str],
    /// Environment variable overriding the base URL.
    pub base_url_env: &'static str,
    /// Environment variable overriding the model.
    pub model_env: &'static str,
    /// Default wire format.
    pub wire_format: WireFormat,
}
