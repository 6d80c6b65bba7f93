//! Credential and endpoint resolution.
//!
//! Every field resolves as explicit option, then environment, then the
//! profile default. The credential has no default.

use crate::{Error, ProviderProfile, Result, WireFormat};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, time::Duration};

/// Source of environment configuration.
pub trait Environment: Send + Sync {
    /// Look up a variable. Blank values count as unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.trim().is_empty()).cloned()
    }
}

/// Deadlines for vendor calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Whole non-streaming call.
    pub request: Duration,
    /// Connection setup and each body read while streaming.
    pub stream: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(60),
            stream: Duration::from_secs(120),
        }
    }
}

/// Explicit per-adapter settings, usually from configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AdapterOptions {
    /// API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default model override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Wire format override, honoured by adapters that speak more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_format: Option<WireFormat>,
    /// Call deadlines.
    #[serde(skip)]
    pub timeouts: Timeouts,
}

impl fmt::Debug for AdapterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterOptions")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("wire_format", &self.wire_format)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl AdapterOptions {
    /// Options carrying only an API key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Default::default()
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the wire format.
    pub fn wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = Some(format);
        self
    }

    /// Set the deadlines.
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Resolve the endpoint for `profile`, failing fast without a credential.
    pub fn resolve(&self, profile: &ProviderProfile, env: &dyn Environment) -> Result<Endpoint> {
        let api_key = explicit(&self.api_key)
            .or_else(|| profile.credentials.iter().find_map(|key| env.var(key)))
            .ok_or_else(|| Error::Auth {
                provider: profile.name.to_owned(),
                credential: profile.credentials.join(" or "),
            })?;
        let base_url = explicit(&self.base_url)
            .or_else(|| env.var(profile.base_url_env))
            .unwrap_or_else(|| profile.base_url.to_owned());
        let model = explicit(&self.model)
            .or_else(|| env.var(profile.model_env))
            .unwrap_or_else(|| profile.default_model.to_owned());

        Ok(Endpoint {
            api_key,
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            model,
            timeouts: self.timeouts,
        })
    }
}

fn explicit(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// A fully resolved endpoint. Read once at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Credential.
    pub api_key: String,
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Default model.
    pub model: String,
    /// Call deadlines.
    pub timeouts: Timeouts,
}

impl Endpoint {
    /// Join the base URL with `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}
