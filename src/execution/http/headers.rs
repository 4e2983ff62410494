//! HTTP Headers Utility
//!
//! Builds the request headers for chat-completions calls.

use crate::error::LlmError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

/// HTTP header builder for API requests
#[derive(Debug, Default)]
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add Bearer token authorization
    ///
    /// The value is marked sensitive so it is redacted from `Debug` output.
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, LlmError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            LlmError::ConfigurationError("Invalid API key format".to_string())
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Ask for an event stream or a JSON document
    pub fn with_accept(mut self, stream: bool) -> Self {
        let accept = if stream {
            "text/event-stream"
        } else {
            "application/json"
        };
        self.headers.insert(ACCEPT, HeaderValue::from_static(accept));
        self
    }

    /// Add user agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, LlmError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| LlmError::ConfigurationError(format!("Invalid user agent: {e}")))?,
        );
        Ok(self)
    }

    /// Build the final header map
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

/// Headers for a chat-completions request.
pub fn chat_headers(api_key: &str, user_agent: &str, stream: bool) -> Result<HeaderMap, LlmError> {
    Ok(HttpHeaderBuilder::new()
        .with_json_content_type()
        .with_bearer_auth(api_key)?
        .with_accept(stream)
        .with_user_agent(user_agent)?
        .build())
}
