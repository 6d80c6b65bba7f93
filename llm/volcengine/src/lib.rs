//! Volcengine Ark provider for the Doubao model family.
//!
//! Ark speaks the chat completions shape under a versioned base path
//! (`/api/v3/chat/completions`, no `/v1`), and addresses models by
//! inference endpoint ID (`ep-...`) rather than by model name.

use async_trait::async_trait;
use llm::{
    Adapter, AdapterOptions, Client, DeltaStream, Environment, GenerationRequest,
    GenerationResult, ProviderProfile, Result, WireFormat,
};
use openai::OpenAI;

/// Doubao on Volcengine Ark.
pub const DOUBAO: ProviderProfile = ProviderProfile {
    name: "doubao",
    base_url: "https://ark.cn-beijing.volces.com/api/v3",
    chat_path: "/chat/completions",
    default_model: "ep-20241226000000-00000",
    credentials: &["DOUBAO_API_KEY"],
    base_url_env: "DOUBAO_BASE_URL",
    model_env: "DOUBAO_MODEL",
    wire_format: WireFormat::Volcengine,
};

/// The Doubao provider.
#[derive(Clone, Debug)]
pub struct Doubao {
    inner: OpenAI,
}

impl Doubao {
    /// Create a provider from explicit options, falling back to the environment.
    pub fn new(client: Client, env: &dyn Environment, options: &AdapterOptions) -> Result<Self> {
        let inner = OpenAI::configured(client, &DOUBAO, env, options)?;
        Ok(Self { inner })
    }

    /// The chat completions URL.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}

#[async_trait]
impl Adapter for Doubao {
    fn provider(&self) -> &str {
        self.inner.provider()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    fn wire_format(&self) -> WireFormat {
        WireFormat::Volcengine
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.inner.generate_text(request).await
    }

    fn generate_stream(&self, request: &GenerationRequest) -> Result<DeltaStream> {
        self.inner.generate_stream(request)
    }
}
