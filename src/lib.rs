//! pagechat
//!
//! Chat-completions client adapter: builds the wire payload from a system
//! prompt, context resources and conversation turns, sends it over HTTP, and
//! returns the reply text. Streaming replies are reassembled from SSE frames
//! and forwarded live to a caller-supplied sink.
//!
//! ```rust,ignore
//! use pagechat::prelude::*;
//!
//! let config = ClientConfig::new("gpt-4o-mini").with_api_key("sk-...").with_stream(true);
//! let client = ChatClient::new(config)?;
//! let request = ChatRequest::new(vec![ChatMessage::user("Summarize this page")])
//!     .with_system_prompt("You answer questions about wiki pages.")
//!     .with_context(vec![ContextResource::page_context("Start", "Welcome...")]);
//! let mut sink = |d: &StreamDelta| print!("{}", d.content);
//! let reply = client.chat_stream(request, &mut sink).await?;
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod execution;
pub mod request;
pub mod standards;
pub mod streaming;
pub mod types;

pub use client::ChatClient;
pub use config::{ClientConfig, ProxyConfig};
pub use error::LlmError;

/// Commonly used items.
pub mod prelude {
    pub use crate::client::ChatClient;
    pub use crate::config::{ClientConfig, ProxyConfig};
    pub use crate::error::LlmError;
    pub use crate::streaming::{CancelHandle, CollectingSink, DeltaSink};
    pub use crate::types::{
        ChatInput, ChatMessage, ChatPayload, ChatRequest, ContentPart, ContextResource,
        ImageDetail, LegacyChat, LegacyTurn, MessageContent, MessageRole, ResourceKind,
        StreamDelta,
    };
}
