//! Prompt-level generation commands.

use crate::{cmd::Context, output};
use anyhow::Result;
use clap::Args;
use generation::{DEFAULT_DURATION, DEFAULT_STYLE};
use llm::GenerationRequest;

/// Generate directly from a prompt.
#[derive(Args, Debug)]
pub struct Generate {
    /// Prompt text.
    pub prompt: String,

    /// System prompt.
    #[arg(long)]
    pub system: Option<String>,

    /// Sampling temperature.
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Token budget.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Stream the reply.
    #[arg(long)]
    pub stream: bool,
}

impl Generate {
    /// The generation request for these arguments.
    pub fn request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.prompt.clone()).streaming(self.stream);
        if let Some(system) = &self.system {
            request = request.with_system(system.clone());
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }

    /// Generate and print the reply.
    pub async fn run(self, context: &Context) -> Result<()> {
        complete(context, self.request()).await
    }
}

/// Write social media copy.
#[derive(Args, Debug)]
pub struct Copywriting {
    /// Topic.
    pub topic: String,

    /// Style: 营销, 种草, 科普 or 故事.
    #[arg(long, default_value = DEFAULT_STYLE)]
    pub style: String,

    /// Token budget.
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl Copywriting {
    /// Generate and print the copy.
    pub async fn run(self, context: &Context) -> Result<()> {
        let mut preset = generation::Copywriting::new(self.topic).with_style(self.style);
        if let Some(max_tokens) = self.max_tokens {
            preset = preset.with_max_tokens(max_tokens);
        }
        complete(context, preset.into_request()).await
    }
}

/// Write a talking-head video script.
#[derive(Args, Debug)]
pub struct Script {
    /// Topic.
    pub topic: String,

    /// Duration: 30秒, 60秒 or 3分钟.
    #[arg(long, default_value = DEFAULT_DURATION)]
    pub duration: String,

    /// Token budget.
    #[arg(long)]
    pub max_tokens: Option<u32>,
}

impl Script {
    /// Generate and print the script.
    pub async fn run(self, context: &Context) -> Result<()> {
        let mut preset = generation::Script::new(self.topic).with_duration(self.duration);
        if let Some(max_tokens) = self.max_tokens {
            preset = preset.with_max_tokens(max_tokens);
        }
        complete(context, preset.into_request()).await
    }
}

async fn complete(context: &Context, mut request: GenerationRequest) -> Result<()> {
    if let Some(model) = &context.model {
        request = request.with_model(model.clone());
    }
    let generation = context
        .orchestrator
        .complete(&context.provider, &request)
        .await?;
    output::print_generation(generation).await
}
