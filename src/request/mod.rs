//! Request construction: input normalization and payload building.

pub mod builder;
pub mod normalize;

pub use builder::{build_chat_payload, context_message, describe_resource};
pub use normalize::normalize_chat_input;
