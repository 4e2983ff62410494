//! Wire request body for chat completions

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;
use crate::error::LlmError;

/// Chat-completions request body.
///
/// Message order is significant: system prompt first (when present), then the
/// context-resource message (when present), then the conversation turns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatPayload {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f64,
    pub stream: bool,
}

impl ChatPayload {
    /// Encode the payload as a JSON body.
    pub fn to_json(&self) -> Result<serde_json::Value, LlmError> {
        if !self.temperature.is_finite() {
            return Err(LlmError::EncodingError(format!(
                "temperature {} is not representable in JSON",
                self.temperature
            )));
        }
        Ok(serde_json::to_value(self)?)
    }
}

/// One incremental unit of streamed model output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamDelta {
    pub content: String,
}

impl StreamDelta {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
