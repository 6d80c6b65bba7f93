//! Huoyuan generation: the single entry point for agent-driven writing.
//!
//! The [`Orchestrator`] validates the provider, resolves the agent, runs
//! prompt fusion and dispatches to the adapter built by the registry. It
//! holds no mutable state, so one instance serves concurrent requests.
//!
//! # Example
//!
//! ```rust,ignore
//! use generation::{ChatRequest, Orchestrator, default_registry};
//!
//! let orchestrator = Orchestrator::new(default_registry());
//! let request = ChatRequest::new("帮我写一个关于健康饮食的短视频开头");
//! let generation = orchestrator.chat(&request).await?;
//! ```

pub use builtin::{PROVIDERS, default_registry, register_builtin};
pub use orchestrator::{ChatRequest, DEFAULT_PROVIDER, GenerationParams, Orchestrator};
pub use preset::{
    COPYWRITING_STYLES, Copywriting, DEFAULT_DURATION, DEFAULT_STYLE, SCRIPT_DURATIONS, Script,
};
pub use store::{MemoryPersonaStore, PersonaStore};

mod builtin;
mod orchestrator;
mod preset;
pub mod sse;
mod store;
