//! Error Handling Module
//!
//! This module provides the error taxonomy for the chat client:
//! - Core error type (`LlmError`)
//! - Classification helpers for presenting failures to end users
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use pagechat::error::LlmError;
//!
//! let error = LlmError::api_error(500, "HTTP Error: 500");
//! assert_eq!(error.status_code(), Some(500));
//! assert!(!error.is_auth_error());
//! ```

// Module declarations
mod conversions;
pub mod helpers;
pub mod types;

// Re-exports for public API
pub use helpers::ErrorKind;
pub use types::*;
