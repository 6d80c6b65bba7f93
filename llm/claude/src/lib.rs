//! Claude provider.
//!
//! Talks to Anthropic's native Messages API or to an OpenAI-compatible
//! proxy. The wire format is chosen once per instance when it is built:
//!
//! 1. an explicit `wire_format` option wins;
//! 2. `CLAUDE_USE_OPENAI_FORMAT` (`true`/`1`/`yes`) forces the proxy format;
//! 3. otherwise the official endpoint gets the native format and any other
//!    base URL gets the proxy format.

use compact_str::CompactString;
use llm::{
    AdapterOptions, Client, Endpoint, Environment, HttpTransport, ProviderProfile, Result,
    WireFormat,
};
use openai::OpenAI;
pub use request::{Message, Request};
pub use response::Response;
pub use stream::{Event, decode_event};

mod provider;
mod request;
mod response;
mod stream;

/// Claude on the Anthropic Messages API.
pub const CLAUDE: ProviderProfile = ProviderProfile {
    name: "claude",
    base_url: "https://api.anthropic.com",
    chat_path: "/v1/messages",
    default_model: "claude-3-5-sonnet-20241022",
    credentials: &["CLAUDE_API_KEY", "ANTHROPIC_API_KEY"],
    base_url_env: "CLAUDE_BASE_URL",
    model_env: "CLAUDE_MODEL",
    wire_format: WireFormat::Anthropic,
};

/// Claude behind an OpenAI-compatible proxy.
pub const CLAUDE_PROXY: ProviderProfile = ProviderProfile {
    chat_path: "/v1/chat/completions",
    wire_format: WireFormat::OpenAI,
    ..CLAUDE
};

/// Environment flag forcing the OpenAI-style format.
pub const OPENAI_FORMAT_ENV: &str = "CLAUDE_USE_OPENAI_FORMAT";

/// Host of the official Anthropic API.
pub const OFFICIAL_HOST: &str = "api.anthropic.com";

/// Value sent in the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

/// Whether `base_url` points at the official Anthropic API.
pub fn is_official(base_url: &str) -> bool {
    base_url.contains(OFFICIAL_HOST)
}

/// Decide the wire format for a Claude instance.
pub fn select_format(
    base_url: &str,
    explicit: Option<WireFormat>,
    env: &dyn Environment,
) -> WireFormat {
    if let Some(format) = explicit {
        return match format {
            WireFormat::Anthropic => WireFormat::Anthropic,
            WireFormat::OpenAI | WireFormat::Volcengine => WireFormat::OpenAI,
        };
    }
    let forced = env
        .var(OPENAI_FORMAT_ENV)
        .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"));
    if forced || !is_official(base_url) {
        WireFormat::OpenAI
    } else {
        WireFormat::Anthropic
    }
}

/// Native Anthropic Messages provider.
#[derive(Clone, Debug)]
pub struct Anthropic {
    /// Registry identifier reported in results.
    provider: CompactString,
    /// Default model.
    model: String,
    /// Transport with vendor or Bearer auth.
    transport: HttpTransport,
}

impl Anthropic {
    /// Create a provider at a resolved endpoint.
    ///
    /// Vendor headers are used on the official endpoint only; anything else
    /// gets a Bearer token.
    pub fn new(client: Client, endpoint: &Endpoint) -> Result<Self> {
        let url = endpoint.url(CLAUDE.chat_path);
        let transport = if is_official(&endpoint.base_url) {
            HttpTransport::custom_headers(
                client,
                &[
                    ("x-api-key", endpoint.api_key.as_str()),
                    ("anthropic-version", API_VERSION),
                ],
                &url,
            )?
        } else {
            HttpTransport::bearer(client, &endpoint.api_key, &url)?
        };
        Ok(Self {
            provider: CLAUDE.name.into(),
            model: endpoint.model.clone(),
            transport: transport.with_timeouts(endpoint.timeouts),
        })
    }

    /// The underlying transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

/// The Claude provider in the wire format chosen at construction.
#[derive(Clone, Debug)]
pub enum Claude {
    /// Anthropic Messages API.
    Native(Anthropic),
    /// OpenAI-compatible proxy.
    Proxy(OpenAI),
}

impl Claude {
    /// Create a provider from explicit options, falling back to the environment.
    pub fn new(client: Client, env: &dyn Environment, options: &AdapterOptions) -> Result<Self> {
        let endpoint = options.resolve(&CLAUDE, env)?;
        let format = select_format(&endpoint.base_url, options.wire_format, env);
        tracing::debug!(
            "claude at {} speaking {format} with model {}",
            endpoint.base_url,
            endpoint.model
        );
        match format {
            WireFormat::Anthropic => Anthropic::new(client, &endpoint).map(Self::Native),
            _ => OpenAI::new(client, &CLAUDE_PROXY, &endpoint).map(Self::Proxy),
        }
    }

    /// The URL generation calls go to.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Native(native) => native.transport.endpoint(),
            Self::Proxy(proxy) => proxy.endpoint(),
        }
    }
}
