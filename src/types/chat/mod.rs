//! Chat message and content types

pub mod content;
pub mod message;

pub use content::{ContentPart, ImageDetail, ImageUrl, MessageContent};
pub use message::{ChatMessage, MessageRole};
