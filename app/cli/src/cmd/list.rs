//! Listing commands: agents, providers.

use crate::cmd::Context;

/// Print the agent catalog.
pub fn agents(context: &Context) {
    for agent in context.orchestrator.agents() {
        let marker = if agent.id == context.agent { "*" } else { " " };
        println!("{marker} {} {} ({}): {}", agent.icon, agent.name, agent.id, agent.description);
    }
}

/// Print registered providers.
pub fn providers(context: &Context) {
    for provider in context.orchestrator.providers() {
        let marker = if provider == context.provider.trim().to_lowercase() {
            "*"
        } else {
            " "
        };
        println!("{marker} {provider}");
    }
}
