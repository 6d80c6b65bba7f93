//! IP persona profiles.

use serde::{Deserialize, Serialize};

/// Header of the rendered persona block.
const HEADER: &str = "【IP信息】";

/// Separator for list-valued fields.
const SEPARATOR: &str = ", ";

/// A creator's IP persona, owned by the project store.
///
/// Fusion only reads a snapshot; every field is optional and empty fields
/// are left out of the rendered block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaProfile {
    /// IP name.
    pub name: String,
    /// Industry or content track.
    pub industry: String,
    /// Free-text introduction.
    pub introduction: String,
    /// Tone of voice.
    pub tone: String,
    /// Target audience.
    pub target_audience: String,
    /// Content style.
    pub content_style: String,
    /// Catchphrase.
    pub catchphrase: String,
    /// Frequently used keywords.
    pub keywords: Vec<String>,
    /// Topics and expressions to avoid.
    pub taboos: Vec<String>,
    /// Accounts to benchmark against.
    pub benchmark_accounts: Vec<String>,
}

impl PersonaProfile {
    /// One labelled line per populated field, in a fixed order.
    pub fn lines(&self) -> Vec<String> {
        let text = [
            ("IP名称", &self.name),
            ("所属赛道", &self.industry),
            ("IP简介", &self.introduction),
            ("语气风格", &self.tone),
            ("目标受众", &self.target_audience),
            ("内容风格", &self.content_style),
            ("常用口头禅", &self.catchphrase),
        ];
        let lists = [
            ("常用关键词", &self.keywords),
            ("内容禁忌", &self.taboos),
            ("对标账号", &self.benchmark_accounts),
        ];

        let mut lines: Vec<String> = text
            .into_iter()
            .filter_map(|(label, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| format!("- {label}：{value}"))
            })
            .collect();
        lines.extend(lists.into_iter().filter_map(|(label, values)| {
            let joined = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(SEPARATOR);
            (!joined.is_empty()).then(|| format!("- {label}：{joined}"))
        }));
        lines
    }

    /// Whether no field is populated.
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    /// The persona block, or `None` when nothing is populated.
    pub fn render(&self) -> Option<String> {
        let lines = self.lines();
        if lines.is_empty() {
            return None;
        }
        Some(format!("{HEADER}\n{}", lines.join("\n")))
    }
}
