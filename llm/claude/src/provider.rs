//! `Adapter` implementations for the Claude providers.

use crate::{Anthropic, Claude, Request, Response, decode_event};
use async_trait::async_trait;
use llm::{
    Adapter, DeltaStream, Error, GenerationRequest, GenerationResult, Result, WireFormat, sse,
};

#[async_trait]
impl Adapter for Anthropic {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn wire_format(&self) -> WireFormat {
        WireFormat::Anthropic
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;
        let body = Request::new(&self.model, request, false);
        let text = self.transport.send(&body).await?;
        let response: Response = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidResponse(format!("{e}: {text}")))?;

        Ok(GenerationResult {
            content: response.text(),
            provider: self.provider.clone(),
            model: body.model,
            usage: response.usage(),
        })
    }

    fn generate_stream(&self, request: &GenerationRequest) -> Result<DeltaStream> {
        request.validate()?;
        let body = Request::new(&self.model, request, true);
        Ok(sse::open(self.transport.clone(), body, decode_event))
    }
}

#[async_trait]
impl Adapter for Claude {
    fn provider(&self) -> &str {
        match self {
            Self::Native(native) => native.provider(),
            Self::Proxy(proxy) => proxy.provider(),
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::Native(native) => native.model(),
            Self::Proxy(proxy) => proxy.model(),
        }
    }

    fn wire_format(&self) -> WireFormat {
        match self {
            Self::Native(_) => WireFormat::Anthropic,
            Self::Proxy(_) => WireFormat::OpenAI,
        }
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        match self {
            Self::Native(native) => native.generate_text(request).await,
            Self::Proxy(proxy) => proxy.generate_text(request).await,
        }
    }

    fn generate_stream(&self, request: &GenerationRequest) -> Result<DeltaStream> {
        match self {
            Self::Native(native) => native.generate_stream(request),
            Self::Proxy(proxy) => proxy.generate_stream(request),
        }
    }
}
