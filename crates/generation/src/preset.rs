//! Fixed-template generators for copywriting and video scripts.

use llm::GenerationRequest;
use serde::{Deserialize, Serialize};

/// Copywriting styles offered to users.
pub const COPYWRITING_STYLES: [&str; 4] = ["营销", "种草", "科普", "故事"];

/// Style used when none is given.
pub const DEFAULT_STYLE: &str = "营销";

/// Video durations offered to users.
pub const SCRIPT_DURATIONS: [&str; 3] = ["30秒", "60秒", "3分钟"];

/// Duration used when none is given.
pub const DEFAULT_DURATION: &str = "60秒";

const COPYWRITING_MAX_TOKENS: u32 = 1024;
const SCRIPT_MAX_TOKENS: u32 = 2048;

/// A social media copywriting request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Copywriting {
    /// Topic to write about.
    pub topic: String,
    /// Style label, see [`COPYWRITING_STYLES`].
    #[serde(default = "default_style")]
    pub style: String,
    /// Token budget.
    #[serde(default = "copywriting_max_tokens")]
    pub max_tokens: u32,
}

impl Copywriting {
    /// Copywriting on `topic` in the default style.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            style: default_style(),
            max_tokens: COPYWRITING_MAX_TOKENS,
        }
    }

    /// Set the style. Blank keeps the default.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        let style = style.into();
        if !style.trim().is_empty() {
            self.style = style.trim().to_owned();
        }
        self
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The generation request for this preset.
    pub fn into_request(self) -> GenerationRequest {
        let style = self.style;
        let system = format!(
            "你是一位专业的文案创作专家，擅长{style}类型的内容创作。\n\
请根据用户提供的主题，创作一段吸引人的文案。\n\
要求：\n\
1. 内容要有吸引力和感染力\n\
2. 语言流畅自然\n\
3. 适合在社交媒体传播\n\
4. 包含适当的情感表达"
        );
        let prompt = format!("请为以下主题创作一段{style}文案：\n\n主题：{}", self.topic);
        GenerationRequest::new(prompt)
            .with_system(system)
            .with_max_tokens(self.max_tokens)
    }
}

/// A talking-head video script request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Topic of the video.
    pub topic: String,
    /// Duration label, see [`SCRIPT_DURATIONS`].
    #[serde(default = "default_duration")]
    pub duration: String,
    /// Token budget.
    #[serde(default = "script_max_tokens")]
    pub max_tokens: u32,
}

impl Script {
    /// A script on `topic` for the default duration.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            duration: default_duration(),
            max_tokens: SCRIPT_MAX_TOKENS,
        }
    }

    /// Set the duration. Blank keeps the default.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        let duration = duration.into();
        if !duration.trim().is_empty() {
            self.duration = duration.trim().to_owned();
        }
        self
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The generation request for this preset.
    pub fn into_request(self) -> GenerationRequest {
        let duration = self.duration;
        let system = format!(
            "你是一位专业的短视频脚本创作专家。\n\
请根据用户提供的主题，创作一个适合{duration}的口播脚本。\n\
要求：\n\
1. 开头要有吸引力的hook\n\
2. 内容结构清晰，逻辑流畅\n\
3. 语言适合口播，自然亲切\n\
4. 结尾要有明确的行动号召（CTA）\n\
5. 标注适当的情感和节奏提示"
        );
        let prompt = format!(
            "请为以下主题创作一个{duration}的口播视频脚本：\n\n主题：{}",
            self.topic
        );
        GenerationRequest::new(prompt)
            .with_system(system)
            .with_max_tokens(self.max_tokens)
    }
}

fn default_style() -> String {
    DEFAULT_STYLE.to_owned()
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_owned()
}

fn copywriting_max_tokens() -> u32 {
    COPYWRITING_MAX_TOKENS
}

fn script_max_tokens() -> u32 {
    SCRIPT_MAX_TOKENS
}
