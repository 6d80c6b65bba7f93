//! Conversation history.

use llm::{Error, Result};
use serde::{Deserialize, Serialize};

/// Speaker of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The creator.
    User,
    /// The model.
    Assistant,
}

impl Role {
    /// Label used when rendering history into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "用户",
            Self::Assistant => "助手",
        }
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker.
    pub role: Role,
    /// Text.
    pub content: String,
}

impl Turn {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Turns in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    /// History holding `turns`.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// A single user turn.
    pub fn single(content: impl Into<String>) -> Self {
        Self::new(vec![Turn::user(content)])
    }

    /// Append a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether there are no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Split into the turns before the final user turn and its content.
    ///
    /// Assistant turns after the final user turn are dropped. Fails with
    /// [`Error::EmptyPrompt`] when there is no user turn or it is blank.
    pub fn split_prompt(&self) -> Result<(&[Turn], &str)> {
        let index = self
            .turns
            .iter()
            .rposition(|turn| turn.role == Role::User)
            .ok_or(Error::EmptyPrompt)?;
        let prompt = self.turns[index].content.as_str();
        if prompt.trim().is_empty() {
            return Err(Error::EmptyPrompt);
        }
        let dropped = self.turns.len() - index - 1;
        if dropped > 0 {
            tracing::debug!("ignoring {dropped} turns after the final user turn");
        }
        Ok((&self.turns[..index], prompt))
    }
}

impl From<Vec<Turn>> for ConversationHistory {
    fn from(turns: Vec<Turn>) -> Self {
        Self::new(turns)
    }
}
