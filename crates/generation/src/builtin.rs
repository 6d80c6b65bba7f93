//! Built-in provider wiring.

use claude::Claude;
use llm::{Adapter, Registry};
use openai::OpenAI;
use volcengine::Doubao;

/// Identifiers registered by [`register_builtin`].
pub const PROVIDERS: [&str; 3] = ["claude", "deepseek", "doubao"];

/// Register the DeepSeek, Doubao and Claude adapters on `registry`.
pub fn register_builtin(registry: &Registry) {
    registry.register("deepseek", |client, env, options| {
        OpenAI::deepseek(client.clone(), env, options).map(|p| Box::new(p) as Box<dyn Adapter>)
    });
    registry.register("doubao", |client, env, options| {
        Doubao::new(client.clone(), env, options).map(|p| Box::new(p) as Box<dyn Adapter>)
    });
    registry.register("claude", |client, env, options| {
        Claude::new(client.clone(), env, options).map(|p| Box::new(p) as Box<dyn Adapter>)
    });
}

/// A registry reading the process environment with every built-in provider.
pub fn default_registry() -> Registry {
    let registry = Registry::new();
    register_builtin(&registry);
    registry
}
