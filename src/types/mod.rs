//! Request-scoped data types shared by the builder and the transport.

pub mod chat;
pub mod context;
pub mod input;
pub mod payload;

pub use chat::*;
pub use context::{ContextResource, ResourceKind};
pub use input::{ChatInput, ChatRequest, LegacyChat, LegacyTurn};
pub use payload::{ChatPayload, StreamDelta};
