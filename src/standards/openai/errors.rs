use crate::error::LlmError;

use super::types::ErrorEnvelope;

/// Extract `error.message` from an OpenAI-style error body.
///
/// Returns `None` when the body is not JSON or doesn't match the envelope.
pub fn extract_error_message(body_text: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body_text).ok()?;
    envelope.error?.message
}

/// Classify a non-200 response.
///
/// 401 always maps to `AuthenticationError`, whatever the body looks like;
/// every other status maps to `ApiError`. Without a provider message the
/// fallback is `"HTTP Error: <status>"`.
pub fn classify_http_error(status: u16, body_text: &str) -> LlmError {
    let message =
        extract_error_message(body_text).unwrap_or_else(|| format!("HTTP Error: {status}"));

    if status == 401 {
        LlmError::AuthenticationError(message)
    } else {
        LlmError::ApiError {
            code: status,
            message,
        }
    }
}
