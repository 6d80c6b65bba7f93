//! OpenAI-style chat completions provider.
//!
//! Covers DeepSeek and any other service exposing the OpenAI chat
//! completions API, including Claude behind an OpenAI-compatible proxy.

use compact_str::CompactString;
use llm::{
    AdapterOptions, Client, Endpoint, Environment, HttpTransport, ProviderProfile, Result,
    WireFormat,
};
pub use request::{Message, Request};
pub use response::{Response, decode_chunk};

mod provider;
mod request;
mod response;

/// Built-in OpenAI-style provider profiles.
pub mod profile {
    use llm::{ProviderProfile, WireFormat};

    /// DeepSeek chat completions.
    pub const DEEPSEEK: ProviderProfile = ProviderProfile {
        name: "deepseek",
        base_url: "https://api.deepseek.com",
        chat_path: "/v1/chat/completions",
        default_model: "deepseek-chat",
        credentials: &["DEEPSEEK_API_KEY"],
        base_url_env: "DEEPSEEK_BASE_URL",
        model_env: "DEEPSEEK_MODEL",
        wire_format: WireFormat::OpenAI,
    };
}

/// An OpenAI-compatible provider bound to one endpoint.
#[derive(Clone, Debug)]
pub struct OpenAI {
    /// Registry identifier reported in results.
    provider: CompactString,
    /// Default model.
    model: String,
    /// Wire format reported to callers.
    format: WireFormat,
    /// Transport with Bearer auth.
    transport: HttpTransport,
}

impl OpenAI {
    /// Create a provider for `profile` at an already resolved endpoint.
    pub fn new(client: Client, profile: &ProviderProfile, endpoint: &Endpoint) -> Result<Self> {
        let url = endpoint.url(profile.chat_path);
        tracing::debug!("{} at {url} with model {}", profile.name, endpoint.model);
        let transport = HttpTransport::bearer(client, &endpoint.api_key, &url)?
            .with_timeouts(endpoint.timeouts);
        Ok(Self {
            provider: profile.name.into(),
            model: endpoint.model.clone(),
            format: profile.wire_format,
            transport,
        })
    }

    /// Resolve `profile` against `options` and the environment.
    pub fn configured(
        client: Client,
        profile: &ProviderProfile,
        env: &dyn Environment,
        options: &AdapterOptions,
    ) -> Result<Self> {
        let endpoint = options.resolve(profile, env)?;
        Self::new(client, profile, &endpoint)
    }

    /// Create a provider targeting the DeepSeek API.
    pub fn deepseek(client: Client, env: &dyn Environment, options: &AdapterOptions) -> Result<Self> {
        Self::configured(client, &profile::DEEPSEEK, env, options)
    }

    /// The chat completions URL.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// The underlying transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}
