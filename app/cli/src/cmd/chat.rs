//! Agent chat commands.

use crate::{cmd::Context, output};
use anyhow::{Context as _, Result};
use clap::Args;
use generation::{ChatRequest, GenerationParams};
use persona::{ConversationHistory, Turn};
use std::path::{Path, PathBuf};

/// Chat with an agent.
#[derive(Args, Debug)]
pub struct Chat {
    /// Latest user message.
    pub content: String,

    /// Agent identifier.
    #[arg(long)]
    pub agent: Option<String>,

    /// Persona identifier from the config.
    #[arg(long)]
    pub persona: Option<String>,

    /// JSON file with prior turns, `[{"role": "user", "content": "..."}]`.
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Sampling temperature.
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Token budget.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Wait for the complete text instead of streaming.
    #[arg(long)]
    pub no_stream: bool,
}

impl Chat {
    /// Build the chat request for `context`.
    pub fn request(&self, context: &Context) -> Result<ChatRequest> {
        let mut messages = match &self.history_file {
            Some(path) => load_history(path)?,
            None => ConversationHistory::default(),
        };
        messages.push(Turn::user(self.content.clone()));

        Ok(ChatRequest {
            persona_id: self.persona.clone(),
            agent: self.agent.clone().unwrap_or_else(|| context.agent.clone()),
            messages,
            provider: context.provider.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            model: context.model.clone(),
            stream: !self.no_stream,
        })
    }

    /// Run the chat and print the reply.
    pub async fn run(self, context: &Context) -> Result<()> {
        let request = self.request(context)?;
        let generation = context.orchestrator.chat(&request).await?;
        output::print_generation(generation).await
    }
}

/// One-shot agent generation without history.
#[derive(Args, Debug)]
pub struct Quick {
    /// Content or topic to write about.
    pub content: String,

    /// Agent identifier.
    #[arg(long)]
    pub agent: Option<String>,

    /// Persona identifier from the config.
    #[arg(long)]
    pub persona: Option<String>,
}

impl Quick {
    /// Parameters for the one-shot call, carrying the global model override.
    pub fn params(&self, context: &Context) -> GenerationParams {
        GenerationParams {
            model: context.model.clone(),
            ..Default::default()
        }
    }

    /// Generate and print the reply.
    pub async fn run(self, context: &Context) -> Result<()> {
        let agent = self.agent.as_deref().unwrap_or(&context.agent);
        let result = context
            .orchestrator
            .quick(
                &context.provider,
                agent,
                self.persona.as_deref(),
                &self.content,
                &self.params(context),
            )
            .await?;
        println!("{}", result.content);
        Ok(())
    }
}

fn load_history(path: &Path) -> Result<ConversationHistory> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse history in {}", path.display()))
}
