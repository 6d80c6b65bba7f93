//! `Adapter` implementation for OpenAI-compatible endpoints.

use crate::{OpenAI, Request, Response, decode_chunk};
use async_trait::async_trait;
use llm::{
    Adapter, DeltaStream, Error, GenerationRequest, GenerationResult, Result, WireFormat, sse,
};

#[async_trait]
impl Adapter for OpenAI {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn wire_format(&self) -> WireFormat {
        self.format
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        request.validate()?;
        let body = Request::new(&self.model, request, false);
        let text = self.transport.send(&body).await?;
        let response: Response = serde_json::from_str(&text)
            .map_err(|e| Error::InvalidResponse(format!("{e}: {text}")))?;
        let content = response
            .content()
            .ok_or_else(|| Error::InvalidResponse(format!("no choices: {text}")))?
            .to_owned();

        Ok(GenerationResult {
            content,
            provider: self.provider.clone(),
            model: body.model,
            usage: response.usage,
        })
    }

    fn generate_stream(&self, request: &GenerationRequest) -> Result<DeltaStream> {
        request.validate()?;
        let body = Request::new(&self.model, request, true);
        Ok(sse::open(self.transport.clone(), body, decode_chunk))
    }
}
