//! Request executors

pub mod chat;

pub use chat::{build_chat_request, execute_buffered, execute_streaming, parse_completion_body};
