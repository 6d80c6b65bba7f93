//! Agent profiles and the static catalog.

use compact_str::CompactString;
use llm::{Error, Result};
use serde::{Deserialize, Serialize};

/// Agent used when the caller does not pick one.
pub const DEFAULT_AGENT: &str = "efficient_oral";

/// A reusable writing persona with its own base system prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Catalog identifier.
    pub id: CompactString,
    /// Display name.
    pub name: String,
    /// Display icon.
    #[serde(default)]
    pub icon: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Base system prompt.
    pub system_prompt: String,
    /// Default temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Default token budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// The agent catalog, in display order.
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    agents: Vec<AgentProfile>,
}

impl AgentCatalog {
    /// A catalog holding exactly `agents`.
    pub fn new(agents: Vec<AgentProfile>) -> Self {
        Self { agents }
    }

    /// The built-in agents.
    pub fn builtin() -> Self {
        Self::new(vec![
            agent(
                DEFAULT_AGENT,
                "高效口播",
                "🎙️",
                "节奏明快、信息密度高的口播文案",
                EFFICIENT_ORAL,
                Some(0.7),
                Some(2048),
            ),
            agent(
                "emotional",
                "情感共鸣",
                "💗",
                "以真实情绪打动观众的走心文案",
                EMOTIONAL,
                Some(0.85),
                Some(2048),
            ),
            agent(
                "knowledge",
                "知识科普",
                "📚",
                "严谨易懂的专业知识科普",
                KNOWLEDGE,
                Some(0.5),
                Some(3072),
            ),
            agent(
                "storytelling",
                "故事叙述",
                "📖",
                "用故事承载观点的叙事型文案",
                STORYTELLING,
                Some(0.9),
                None,
            ),
            agent(
                "marketing",
                "营销种草",
                "🛒",
                "突出卖点、引导转化的种草文案",
                MARKETING,
                None,
                Some(1536),
            ),
        ])
    }

    /// Add agents, replacing built-ins with the same identifier.
    pub fn with_agents(mut self, extra: impl IntoIterator<Item = AgentProfile>) -> Self {
        for agent in extra {
            match self.agents.iter_mut().find(|a| a.id == agent.id) {
                Some(existing) => *existing = agent,
                None => self.agents.push(agent),
            }
        }
        self
    }

    /// Look up an agent by identifier.
    pub fn resolve(&self, id: &str) -> Result<&AgentProfile> {
        let id = id.trim();
        self.agents
            .iter()
            .find(|agent| agent.id == id)
            .ok_or_else(|| Error::UnknownAgent(id.to_owned()))
    }

    /// All agents in display order.
    pub fn list(&self) -> &[AgentProfile] {
        &self.agents
    }
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn agent(
    id: &str,
    name: &str,
    icon: &str,
    description: &str,
    system_prompt: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> AgentProfile {
    AgentProfile {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
        description: description.into(),
        system_prompt: system_prompt.into(),
        temperature,
        max_tokens,
    }
}

const EFFICIENT_ORAL: &str = "你是一位高效口播文案专家，擅长为短视频创作节奏明快、信息密度高的口播稿。
创作要求：
1. 开头三秒抛出核心观点或痛点，迅速抓住注意力
2. 句子短促有力，适合口语表达，避免书面化长句
3. 每段只讲一个要点，层层递进
4. 结尾给出明确的行动号召";

const EMOTIONAL: &str = "你是一位情感共鸣型文案专家，擅长用真实细腻的情绪打动观众。
创作要求：
1. 从具体场景和细节切入，唤起观众的亲身感受
2. 语言温暖真诚，避免空洞说教
3. 情绪有起伏，在高潮处点明观点
4. 结尾留有余味，引发评论与分享";

const KNOWLEDGE: &str = "你是一位知识科普型文案专家，擅长把专业知识讲得通俗易懂。
创作要求：
1. 用一个反常识的问题或现象开场
2. 内容准确严谨，不夸大、不编造数据
3. 善用类比和生活化例子解释概念
4. 结尾总结要点，方便观众记忆";

const STORYTELLING: &str = "你是一位故事叙述型文案专家，擅长用故事承载观点。
创作要求：
1. 设置人物、冲突和转折，让故事有张力
2. 以对话和画面感推动情节
3. 故事服务于观点，结尾自然升华主题
4. 控制篇幅，适合短视频口播";

const MARKETING: &str = "你是一位营销种草型文案专家，擅长突出产品卖点并引导转化。
创作要求：
1. 先戳中用户痛点，再给出解决方案
2. 卖点具体可感知，用使用场景代替参数堆砌
3. 语气真诚，像朋友推荐而非硬广
4. 结尾给出清晰的购买或行动指引";
