//! Configuration resolution for the CLI.
//!
//! Resolves huoyuan.toml in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `./huoyuan.toml` (working directory)
//! 3. `~/.config/huoyuan/huoyuan.toml` (global default)
//!
//! Without any file the built-in defaults apply and credentials come from
//! the environment.

use anyhow::{Context, Result};
use generation::{DEFAULT_PROVIDER, MemoryPersonaStore, Orchestrator, default_registry};
use llm::AdapterOptions;
use persona::{AgentCatalog, AgentProfile, DEFAULT_AGENT, PersonaProfile};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// File name looked up in the working and config directories.
pub const CONFIG_FILE: &str = "huoyuan.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HuoyuanConfig {
    /// Fallback provider and agent.
    pub defaults: Defaults,
    /// Adapter options keyed by provider identifier.
    pub providers: BTreeMap<String, AdapterOptions>,
    /// Agents added to, or replacing, the built-in catalog.
    pub agents: Vec<AgentProfile>,
    /// Personas keyed by identifier.
    pub personas: BTreeMap<String, PersonaProfile>,
}

/// Defaults used when a command does not say otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Provider identifier.
    pub provider: String,
    /// Agent identifier.
    pub agent: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_owned(),
            agent: DEFAULT_AGENT.to_owned(),
        }
    }
}

impl HuoyuanConfig {
    /// Parse a TOML string, expanding `${VAR}` references first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Build an orchestrator over the built-in providers.
    pub fn orchestrator(&self) -> Orchestrator {
        let catalog = AgentCatalog::builtin().with_agents(self.agents.iter().cloned());
        let personas: MemoryPersonaStore = self
            .personas
            .iter()
            .map(|(id, persona)| (id.as_str(), persona.clone()))
            .collect();

        let mut orchestrator = Orchestrator::new(default_registry())
            .with_catalog(catalog)
            .with_personas(personas);
        for (provider, options) in &self.providers {
            orchestrator = orchestrator.with_options(provider, options.clone());
        }
        orchestrator
    }
}

/// Resolve the config following the priority chain.
pub fn resolve_config(config_flag: Option<&Path>) -> Result<HuoyuanConfig> {
    // 1. Explicit --config flag.
    if let Some(path) = config_flag {
        return HuoyuanConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }

    // 2. Working directory.
    let local_path = PathBuf::from(CONFIG_FILE);
    if local_path.exists() {
        return HuoyuanConfig::load(&local_path)
            .with_context(|| format!("failed to load config from {CONFIG_FILE}"));
    }

    // 3. Global default.
    let global_path = global_config_path();
    if global_path.exists() {
        return HuoyuanConfig::load(&global_path)
            .with_context(|| format!("failed to load config from {}", global_path.display()));
    }

    tracing::debug!("no config file found, using defaults");
    Ok(HuoyuanConfig::default())
}

/// Path to the global default config.
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("huoyuan")
        .join(CONFIG_FILE)
}

/// Replace `${VAR}` with the value of `VAR` from the process environment.
///
/// Unset variables expand to the empty string.
pub fn expand_env_vars(input: &str) -> String {
    expand_vars(input, |name| std::env::var(name).ok())
}

/// Replace `${VAR}` using `lookup`.
pub fn expand_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                name.push(c);
            }
            if let Some(value) = lookup(&name) {
                result.push_str(&value);
            }
        } else {
            result.push(ch);
        }
    }
    result
}
