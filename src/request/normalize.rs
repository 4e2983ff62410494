//! Chat input normalization
//!
//! Maps every accepted chat representation onto the canonical
//! `(system prompt, context, messages)` triple consumed by the builder.

use crate::types::{ChatInput, ChatMessage, ChatRequest, LegacyChat};

/// Normalize any accepted input into a `ChatRequest`.
pub fn normalize_chat_input(input: ChatInput) -> ChatRequest {
    match input {
        ChatInput::Messages(request) => request,
        ChatInput::Legacy(chat) => from_legacy(chat),
    }
}

fn from_legacy(chat: LegacyChat) -> ChatRequest {
    let mut messages = Vec::with_capacity(chat.history.len() * 2 + 1);
    for turn in chat.history {
        messages.push(ChatMessage::user(turn.question));
        messages.push(ChatMessage::assistant(turn.answer));
    }
    messages.push(ChatMessage::user(chat.question));

    ChatRequest {
        system_prompt: chat.system_prompt.unwrap_or_default(),
        context: chat.context,
        messages,
    }
}
