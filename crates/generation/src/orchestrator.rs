//! Request validation, fusion and dispatch.

use crate::{MemoryPersonaStore, PersonaStore};
use compact_str::CompactString;
use llm::{
    Adapter, AdapterOptions, Generation, GenerationRequest, GenerationResult, Registry, Result,
};
use persona::{
    AgentCatalog, AgentProfile, ConversationHistory, DEFAULT_AGENT, Overrides, PersonaProfile,
    fuse,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, sync::Arc};

/// Provider used when a chat request does not name one.
pub const DEFAULT_PROVIDER: &str = "deepseek";

/// Caller-supplied parameters for one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Temperature, beating the agent default.
    pub temperature: Option<f32>,
    /// Token budget, beating the agent default.
    pub max_tokens: Option<u32>,
    /// Model for this call only.
    pub model: Option<String>,
    /// Whether to stream deltas.
    pub stream: bool,
}

/// An agent-driven chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Persona to look up in the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
    /// Agent identifier.
    #[serde(default = "default_agent")]
    pub agent: String,
    /// Conversation so far, ending with the user's latest turn.
    pub messages: ConversationHistory,
    /// Provider identifier.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Temperature override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Token budget override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Model override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Whether to stream deltas.
    #[serde(default = "default_stream")]
    pub stream: bool,
}

impl ChatRequest {
    /// A streaming single-turn request with the default agent and provider.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            persona_id: None,
            agent: default_agent(),
            messages: ConversationHistory::single(content),
            provider: default_provider(),
            temperature: None,
            max_tokens: None,
            model: None,
            stream: true,
        }
    }

    fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            model: self.model.clone(),
            stream: self.stream,
        }
    }
}

/// The generation entry point.
///
/// Owns the provider registry, the agent catalog, the persona store and
/// per-provider adapter options. Adapters are built per call.
pub struct Orchestrator {
    registry: Arc<Registry>,
    catalog: Arc<AgentCatalog>,
    personas: Arc<dyn PersonaStore>,
    options: BTreeMap<CompactString, AdapterOptions>,
}

impl Orchestrator {
    /// An orchestrator over `registry` with the built-in agents and no personas.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            catalog: Arc::new(AgentCatalog::builtin()),
            personas: Arc::new(MemoryPersonaStore::new()),
            options: BTreeMap::new(),
        }
    }

    /// Use `catalog` for agent lookup.
    pub fn with_catalog(mut self, catalog: AgentCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Use `personas` for persona lookup.
    pub fn with_personas(mut self, personas: impl PersonaStore + 'static) -> Self {
        self.personas = Arc::new(personas);
        self
    }

    /// Apply `options` whenever an adapter for `provider` is built.
    pub fn with_options(mut self, provider: &str, options: AdapterOptions) -> Self {
        self.options.insert(normalize(provider), options);
        self
    }

    /// The provider registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registered provider identifiers.
    pub fn providers(&self) -> Vec<CompactString> {
        self.registry.list().into_iter().collect()
    }

    /// Catalog agents in display order.
    pub fn agents(&self) -> &[AgentProfile] {
        self.catalog.list()
    }

    /// Generate for `history` with `agent` on `provider`.
    ///
    /// Unsupported providers, unknown agents, missing prompts and
    /// out-of-range parameters fail before any adapter is built.
    pub async fn generate(
        &self,
        provider: &str,
        agent: &str,
        persona: Option<&PersonaProfile>,
        history: &ConversationHistory,
        params: &GenerationParams,
    ) -> Result<Generation> {
        let (adapter, request) = self.prepare(provider, agent, persona, history, params)?;
        adapter.generate(&request).await
    }

    /// Run a chat request, looking its persona up in the store.
    pub async fn chat(&self, request: &ChatRequest) -> Result<Generation> {
        let persona = self.persona(request.persona_id.as_deref());
        self.generate(
            &request.provider,
            &request.agent,
            persona.as_ref(),
            &request.messages,
            &request.params(),
        )
        .await
    }

    /// Single-turn, non-streaming chat. `params.stream` is ignored.
    pub async fn quick(
        &self,
        provider: &str,
        agent: &str,
        persona_id: Option<&str>,
        content: &str,
        params: &GenerationParams,
    ) -> Result<GenerationResult> {
        let persona = self.persona(persona_id);
        let history = ConversationHistory::single(content);
        let params = GenerationParams {
            stream: false,
            ..params.clone()
        };
        let (adapter, request) =
            self.prepare(provider, agent, persona.as_ref(), &history, &params)?;
        adapter.generate_text(&request).await
    }

    /// Generate directly from `request`, without agent or persona.
    pub async fn complete(
        &self,
        provider: &str,
        request: &GenerationRequest,
    ) -> Result<Generation> {
        self.registry.check(provider)?;
        request.validate()?;
        self.adapter(provider)?.generate(request).await
    }

    fn prepare(
        &self,
        provider: &str,
        agent: &str,
        persona: Option<&PersonaProfile>,
        history: &ConversationHistory,
        params: &GenerationParams,
    ) -> Result<(Box<dyn Adapter>, GenerationRequest)> {
        self.registry.check(provider)?;
        let agent = self.catalog.resolve(agent)?;
        let overrides = Overrides {
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };
        let mut request = fuse(agent, persona, history, overrides)?
            .into_request()
            .streaming(params.stream);
        if let Some(model) = params.model.as_deref().filter(|m| !m.trim().is_empty()) {
            request = request.with_model(model);
        }
        request.validate()?;

        tracing::debug!(
            "generating with agent {} on {provider}, stream: {}",
            agent.id,
            request.stream
        );
        Ok((self.adapter(provider)?, request))
    }

    fn adapter(&self, provider: &str) -> Result<Box<dyn Adapter>> {
        match self.options.get(&normalize(provider)) {
            Some(options) => self.registry.create(provider, options),
            None => self.registry.create(provider, &AdapterOptions::default()),
        }
    }

    fn persona(&self, id: Option<&str>) -> Option<PersonaProfile> {
        let id = id.map(str::trim).filter(|id| !id.is_empty())?;
        let persona = self.personas.lookup(id);
        if persona.is_none() {
            tracing::warn!("persona {id} not found, generating without it");
        }
        persona
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("registry", &self.registry)
            .field("agents", &self.catalog.list().len())
            .field("options", &self.options)
            .finish()
    }
}

fn normalize(name: &str) -> CompactString {
    CompactString::from(name.trim().to_lowercase())
}

fn default_agent() -> String {
    DEFAULT_AGENT.to_owned()
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_owned()
}

fn default_stream() -> bool {
    true
}
