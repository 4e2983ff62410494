//! Chat client
//!
//! Caller-facing surface: a client bound to one model and endpoint. Every call
//! builds its own payload, decoder and aggregate; the client itself holds only
//! the immutable configuration and the transport.

use std::sync::Arc;

use secrecy::ExposeSecret;

use crate::config::ClientConfig;
use crate::error::LlmError;
use crate::execution::executors::chat::{build_chat_request, execute_buffered, execute_streaming};
use crate::execution::http::transport::{HttpTransport, ReqwestTransport};
use crate::request::{build_chat_payload, normalize_chat_input};
use crate::streaming::{CancelHandle, DeltaSink};
use crate::types::{ChatInput, ChatPayload};

/// Chat-completions client.
#[derive(Clone)]
pub struct ChatClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatClient {
    /// Create a client using the default `reqwest` transport (and proxy, if configured).
    pub fn new(config: ClientConfig) -> Result<Self, LlmError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.proxy.as_ref())?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
        })
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, LlmError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the payload for `input` without sending it.
    pub fn build_payload(
        &self,
        input: impl Into<ChatInput>,
        stream: bool,
    ) -> Result<ChatPayload, LlmError> {
        let request = normalize_chat_input(input.into());
        build_chat_payload(
            &request.system_prompt,
            Some(&request.context),
            &request.messages,
            &self.config.model,
            self.config.temperature,
            stream,
        )
    }

    /// Send a chat in the configured mode and return the full reply.
    ///
    /// In streaming mode the deltas are aggregated without a live sink.
    pub async fn chat(&self, input: impl Into<ChatInput>) -> Result<String, LlmError> {
        let payload = self.build_payload(input, self.config.stream)?;
        self.send(&payload, None, None).await
    }

    /// Send a streaming chat, forwarding every delta to `sink`.
    pub async fn chat_stream(
        &self,
        input: impl Into<ChatInput>,
        sink: &mut dyn DeltaSink,
    ) -> Result<String, LlmError> {
        let payload = self.build_payload(input, true)?;
        self.send(&payload, Some(sink), None).await
    }

    /// Like [`ChatClient::chat_stream`], abortable through `cancel`.
    pub async fn chat_stream_with_cancel(
        &self,
        input: impl Into<ChatInput>,
        sink: &mut dyn DeltaSink,
        cancel: &CancelHandle,
    ) -> Result<String, LlmError> {
        let payload = self.build_payload(input, true)?;
        self.send(&payload, Some(sink), Some(cancel)).await
    }

    /// Send a pre-built payload; `payload.stream` selects the protocol.
    pub async fn send(
        &self,
        payload: &ChatPayload,
        sink: Option<&mut dyn DeltaSink>,
        cancel: Option<&CancelHandle>,
    ) -> Result<String, LlmError> {
        let request = build_chat_request(
            &self.config.endpoint,
            self.config.api_key.expose_secret(),
            &self.config.user_agent,
            payload,
        )?;

        if payload.stream {
            execute_streaming(self.transport.as_ref(), request, sink, cancel).await
        } else {
            execute_buffered(self.transport.as_ref(), request, cancel).await
        }
    }
}
