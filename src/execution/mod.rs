//! Execution layer: HTTP transport and chat executors.

pub mod executors;
pub mod http;
