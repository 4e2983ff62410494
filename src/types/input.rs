//! Accepted chat input representations
//!
//! Callers either hand over a resolved message list (`ChatRequest`) or the
//! older question/answer history object (`LegacyChat`). Both are normalized
//! into the same message sequence before the payload is built.

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;
use super::context::ContextResource;

/// Resolved chat request: system prompt, context and ordered turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub context: Vec<ContextResource>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_context(mut self, context: Vec<ContextResource>) -> Self {
        self.context = context;
        self
    }
}

/// One question/answer exchange of the legacy history format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyTurn {
    pub question: String,
    pub answer: String,
}

/// Legacy chat object: prior exchanges plus the pending question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LegacyChat {
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub history: Vec<LegacyTurn>,
    pub question: String,
    #[serde(default)]
    pub context: Vec<ContextResource>,
}

/// Any accepted chat representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum ChatInput {
    Messages(ChatRequest),
    Legacy(LegacyChat),
}

impl From<ChatRequest> for ChatInput {
    fn from(request: ChatRequest) -> Self {
        ChatInput::Messages(request)
    }
}

impl From<LegacyChat> for ChatInput {
    fn from(chat: LegacyChat) -> Self {
        ChatInput::Legacy(chat)
    }
}

impl From<Vec<ChatMessage>> for ChatInput {
    fn from(messages: Vec<ChatMessage>) -> Self {
        ChatInput::Messages(ChatRequest::new(messages))
    }
}
