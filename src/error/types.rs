//! Core error types

use thiserror::Error;

/// Errors surfaced by the chat client.
///
/// Every failure reaches the immediate caller as one of these variants; nothing
/// is retried internally. Messages never carry the credential value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The request payload could not be serialized to JSON.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Connection or transfer failure before/while receiving an HTTP response.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// HTTP 401 from the provider.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Any other non-200 status, with the provider message or a generic fallback.
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// Status 200 but the body is not valid JSON or lacks the expected fields.
    #[error("Malformed response: {0}")]
    MalformedResponseError(String),

    /// Invalid client configuration (endpoint, model, header values).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LlmError {
    /// Create an API error
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError(message.into())
    }

    /// Create a malformed-response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponseError(message.into())
    }

    /// HTTP status associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::AuthenticationError(_) => Some(401),
            Self::MalformedResponseError(_) => Some(200),
            _ => None,
        }
    }
}
