//! Provider wire standards

pub mod openai;
