//! Agent catalog, IP personas and the prompt fusion engine.
//!
//! [`fuse`] merges an agent's base system prompt, a window of conversation
//! history and an optional IP persona into one system prompt, and resolves
//! the generation parameters. It is a pure function.

pub use agent::{AgentCatalog, AgentProfile, DEFAULT_AGENT};
pub use fusion::{
    Fusion, HISTORY_WINDOW, Overrides, fuse, render_history, render_persona_section,
};
pub use history::{ConversationHistory, Role, Turn};
pub use persona::PersonaProfile;

mod agent;
mod fusion;
mod history;
mod persona;
