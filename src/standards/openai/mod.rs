//! OpenAI chat-completions wire protocol.

pub mod errors;
pub mod types;

pub use errors::{classify_http_error, extract_error_message};
pub use types::{ChatCompletionChunk, ChatCompletionResponse};
