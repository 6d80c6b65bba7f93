//! The prompt fusion engine.

use crate::{AgentProfile, ConversationHistory, PersonaProfile, Turn};
use llm::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, GenerationRequest, Result};

/// Most recent prior turns kept in the history block.
pub const HISTORY_WINDOW: usize = 6;

const HISTORY_HEADER: &str = "【对话历史】";
const HISTORY_FOOTER: &str = "请基于以上对话历史，继续回复用户的最新请求。";
const PERSONA_INTRO: &str = "在创作时，请严格遵循以下IP人设设定，确保内容符合该IP的风格特点：";
const PERSONA_OUTRO: &str = "请在保持智能体专业能力的同时，融入以上IP的人设特点进行创作。";
const RULE_WIDTH: usize = 40;

/// Caller-supplied parameters that beat agent defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Token budget.
    pub max_tokens: Option<u32>,
}

/// Output of [`fuse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fusion {
    /// Final system prompt.
    pub system_prompt: String,
    /// Content of the final user turn.
    pub prompt: String,
    /// Resolved temperature.
    pub temperature: f32,
    /// Resolved token budget.
    pub max_tokens: u32,
}

impl Fusion {
    /// A generation request carrying the fused prompt and parameters.
    pub fn into_request(self) -> GenerationRequest {
        GenerationRequest::new(self.prompt)
            .with_system(self.system_prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

/// Merge agent, history and persona into one system prompt.
///
/// The history block goes right after the agent's base prompt and the
/// persona section after that. Parameters resolve as override, then agent
/// default, then the global default.
pub fn fuse(
    agent: &AgentProfile,
    persona: Option<&PersonaProfile>,
    history: &ConversationHistory,
    overrides: Overrides,
) -> Result<Fusion> {
    let (prior, prompt) = history.split_prompt()?;

    let mut system_prompt = agent.system_prompt.clone();
    if let Some(block) = render_history(prior) {
        system_prompt.push_str(&block);
    }
    if let Some(block) = persona.and_then(PersonaProfile::render) {
        system_prompt.push_str(&render_persona_section(&block));
    }

    Ok(Fusion {
        system_prompt,
        prompt: prompt.to_owned(),
        temperature: overrides
            .temperature
            .or(agent.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: overrides
            .max_tokens
            .or(agent.max_tokens)
            .unwrap_or(DEFAULT_MAX_TOKENS),
    })
}

/// The history block for the turns before the final user turn.
///
/// Keeps the last [`HISTORY_WINDOW`] turns in order; older turns are
/// dropped. `None` when there is nothing before the final turn.
pub fn render_history(prior: &[Turn]) -> Option<String> {
    if prior.is_empty() {
        return None;
    }
    let window = &prior[prior.len().saturating_sub(HISTORY_WINDOW)..];
    let lines = window
        .iter()
        .map(|turn| format!("{}：{}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("\n{HISTORY_HEADER}\n{lines}\n\n{HISTORY_FOOTER}"))
}

/// Wrap a rendered persona block in its delimiters and instructions.
pub fn render_persona_section(block: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n\n{rule}\n{PERSONA_INTRO}\n{block}\n{rule}\n{PERSONA_OUTRO}")
}
