//! OpenAI(-compatible) wire format types.
//!
//! Only the fields the client reads are modeled; everything is optional so a
//! decode step, not ad-hoc key lookups, decides whether a document is usable.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Buffered chat-completions response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    // Untyped so that an off-shape later choice cannot invalidate `choices[0]`.
    #[serde(default)]
    pub choices: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, when present.
    pub fn into_content(self) -> Option<String> {
        first_choice::<CompletionChoice>(self.choices)?.message?.content
    }
}

/// One streamed chat-completions chunk (`data:` frame payload).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: Option<ChunkDelta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// `choices[0].delta.content`, when present.
    pub fn into_delta_content(self) -> Option<String> {
        first_choice::<ChunkChoice>(self.choices)?.delta?.content
    }
}

fn first_choice<T: DeserializeOwned>(choices: Option<Vec<serde_json::Value>>) -> Option<T> {
    let first = choices?.into_iter().next()?;
    serde_json::from_value(first).ok()
}

/// Standard error envelope: `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
