//! CLI argument parsing and subcommand dispatch.

use crate::config::{HuoyuanConfig, resolve_config};
use anyhow::Result;
use clap::{Parser, Subcommand};
use generation::Orchestrator;
use std::path::PathBuf;

pub use chat::{Chat, Quick};
pub use generate::{Copywriting, Generate, Script};

pub mod chat;
pub mod generate;
pub mod list;

/// Huoyuan short-video copywriting assistant.
#[derive(Parser, Debug)]
#[command(name = "huoyuan", about = "Huoyuan short-video copywriting assistant")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to huoyuan.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Provider override.
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Model override.
    #[arg(long, global = true)]
    pub model: Option<String>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with an agent, streaming by default.
    Chat(Chat),
    /// One-shot agent generation.
    Quick(Quick),
    /// Generate directly from a prompt.
    Generate(Generate),
    /// Write social media copy for a topic.
    Copywriting(Copywriting),
    /// Write a talking-head video script for a topic.
    Script(Script),
    /// List available agents.
    Agents,
    /// List available providers.
    Providers,
}

/// What every command gets from global flags and configuration.
pub struct Context {
    /// The orchestrator built from configuration.
    pub orchestrator: Orchestrator,
    /// Provider to use.
    pub provider: String,
    /// Agent used when a command does not pick one.
    pub agent: String,
    /// Model override.
    pub model: Option<String>,
}

impl Context {
    /// Combine configuration with the global flags.
    pub fn new(config: &HuoyuanConfig, provider: Option<String>, model: Option<String>) -> Self {
        Self {
            orchestrator: config.orchestrator(),
            provider: provider.unwrap_or_else(|| config.defaults.provider.clone()),
            agent: config.defaults.agent.clone(),
            model,
        }
    }
}

impl Cli {
    /// Parse config, build the orchestrator and run the subcommand.
    pub async fn run(self) -> Result<()> {
        let config = resolve_config(self.config.as_deref())?;
        let context = Context::new(&config, self.provider, self.model);
        match self.command {
            Command::Chat(cmd) => cmd.run(&context).await,
            Command::Quick(cmd) => cmd.run(&context).await,
            Command::Generate(cmd) => cmd.run(&context).await,
            Command::Copywriting(cmd) => cmd.run(&context).await,
            Command::Script(cmd) => cmd.run(&context).await,
            Command::Agents => {
                list::agents(&context);
                Ok(())
            }
            Command::Providers => {
                list::providers(&context);
                Ok(())
            }
        }
    }
}
