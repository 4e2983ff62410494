//! Error helper utilities for user-facing error handling.
//!
//! Coarse classification and a presentable message, suitable for rendering
//! in the page integration that hosts the chat client.

use super::types::LlmError;

/// Error kind for presentation (coarse-grained)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Client,
    Server,
    Network,
    Parsing,
    Configuration,
}

impl LlmError {
    /// Map this error onto a presentation kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::AuthenticationError(_) => ErrorKind::Auth,
            LlmError::ApiError { code, .. } if *code >= 500 => ErrorKind::Server,
            LlmError::ApiError { .. } => ErrorKind::Client,
            LlmError::TransportError(_) => ErrorKind::Network,
            LlmError::EncodingError(_) | LlmError::MalformedResponseError(_) => {
                ErrorKind::Parsing
            }
            LlmError::ConfigurationError(_) => ErrorKind::Configuration,
        }
    }

    /// Whether the provider rejected the credential.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, LlmError::AuthenticationError(_))
    }

    /// Whether the failure happened below the HTTP layer.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, LlmError::TransportError(_))
    }

    /// The provider-supplied (or fallback) message without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::ApiError { message, .. } => message.clone(),
            LlmError::AuthenticationError(message)
            | LlmError::TransportError(message)
            | LlmError::EncodingError(message)
            | LlmError::MalformedResponseError(message)
            | LlmError::ConfigurationError(message) => message.clone(),
        }
    }
}
