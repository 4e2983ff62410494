//! Chat execution
//!
//! Runs one chat-completions exchange over an `HttpTransport`, in buffered or
//! streaming mode, and turns the outcome into the reply text or a typed error.

use std::future::Future;

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;

use crate::error::LlmError;
use crate::execution::http::headers::chat_headers;
use crate::execution::http::transport::{ByteStream, HttpTransport, HttpTransportRequest};
use crate::standards::openai::{ChatCompletionResponse, classify_http_error};
use crate::streaming::{CancelHandle, DeltaSink, SseFrameDecoder};
use crate::types::{ChatPayload, StreamDelta};

/// Maximum number of characters of an error body that is logged.
const EXCERPT_CHARS: usize = 200;

/// Assemble the transport request for `payload`.
pub fn build_chat_request(
    endpoint: &str,
    api_key: &str,
    user_agent: &str,
    payload: &ChatPayload,
) -> Result<HttpTransportRequest, LlmError> {
    Ok(HttpTransportRequest {
        request_id: uuid::Uuid::new_v4().to_string(),
        url: endpoint.to_string(),
        headers: chat_headers(api_key, user_agent, payload.stream)?,
        body: payload.to_json()?,
    })
}

/// Identifying fields kept for logging once the request has been handed off.
struct RequestMeta {
    request_id: String,
    endpoint: String,
    has_api_key: bool,
}

impl RequestMeta {
    fn of(request: &HttpTransportRequest) -> Self {
        let has_api_key = request
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| !v.trim_start_matches("Bearer").trim().is_empty())
            .unwrap_or(false);
        Self {
            request_id: request.request_id.clone(),
            endpoint: request.url.clone(),
            has_api_key,
        }
    }

    fn failure(&self, status: u16, body: &[u8]) -> LlmError {
        let text = String::from_utf8_lossy(body);
        let excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
        tracing::warn!(
            request_id = %self.request_id,
            status,
            endpoint = %self.endpoint,
            has_api_key = self.has_api_key,
            excerpt = %excerpt,
            "chat completion request failed"
        );
        classify_http_error(status, &text)
    }
}

/// Buffered exchange: one JSON document in, `choices[0].message.content` out.
pub async fn execute_buffered(
    transport: &dyn HttpTransport,
    request: HttpTransportRequest,
    cancel: Option<&CancelHandle>,
) -> Result<String, LlmError> {
    let meta = RequestMeta::of(&request);
    tracing::debug!(request_id = %meta.request_id, endpoint = %meta.endpoint, "sending buffered chat request");

    let response = with_cancel(cancel, transport.execute_json(request)).await?;
    if response.status != 200 {
        return Err(meta.failure(response.status, &response.body));
    }
    parse_completion_body(&response.body)
}

/// Decode a 200 response body.
pub fn parse_completion_body(body: &[u8]) -> Result<String, LlmError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| LlmError::malformed(format!("Response body is not valid JSON: {e}")))?;
    let response: ChatCompletionResponse = serde_json::from_value(value)
        .map_err(|e| LlmError::malformed(format!("Unexpected response shape: {e}")))?;
    response
        .into_content()
        .ok_or_else(|| LlmError::malformed("Missing choices[0].message.content"))
}

/// Streaming exchange.
///
/// Each delta goes to `sink` (when given) and then onto the aggregate, both
/// synchronously and in arrival order. Returns the aggregate once the
/// transport signals end-of-transfer.
pub async fn execute_streaming(
    transport: &dyn HttpTransport,
    request: HttpTransportRequest,
    mut sink: Option<&mut dyn DeltaSink>,
    cancel: Option<&CancelHandle>,
) -> Result<String, LlmError> {
    let meta = RequestMeta::of(&request);
    tracing::debug!(request_id = %meta.request_id, endpoint = %meta.endpoint, "sending streaming chat request");

    let response = with_cancel(cancel, transport.execute_stream(request)).await?;
    let mut body = response.body.into_stream();

    if response.status != 200 {
        let mut buf = Vec::new();
        while let Some(chunk) = next_chunk(&mut body, cancel).await? {
            buf.extend_from_slice(&chunk);
        }
        return Err(meta.failure(response.status, &buf));
    }

    let mut decoder = SseFrameDecoder::new();
    let mut aggregate = String::new();
    while let Some(chunk) = next_chunk(&mut body, cancel).await? {
        emit(decoder.push(&chunk), &mut sink, &mut aggregate, cancel)?;
    }
    emit(decoder.finish(), &mut sink, &mut aggregate, cancel)?;

    tracing::debug!(
        request_id = %meta.request_id,
        saw_done = decoder.saw_done(),
        reply_len = aggregate.len(),
        "chat stream completed"
    );
    Ok(aggregate)
}

fn emit(
    deltas: Vec<StreamDelta>,
    sink: &mut Option<&mut dyn DeltaSink>,
    aggregate: &mut String,
    cancel: Option<&CancelHandle>,
) -> Result<(), LlmError> {
    for delta in deltas {
        if cancel.is_some_and(CancelHandle::is_cancelled) {
            return Err(aborted());
        }
        if let Some(sink) = sink.as_deref_mut() {
            sink.on_delta(&delta);
        }
        aggregate.push_str(&delta.content);
    }
    Ok(())
}

async fn next_chunk(
    body: &mut ByteStream,
    cancel: Option<&CancelHandle>,
) -> Result<Option<Bytes>, LlmError> {
    with_cancel(cancel, async { body.next().await.transpose() }).await
}

async fn with_cancel<T, F>(cancel: Option<&CancelHandle>, fut: F) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    match cancel {
        Some(handle) => tokio::select! {
            biased;
            _ = handle.cancelled() => Err(aborted()),
            result = fut => result,
        },
        None => fut.await,
    }
}

fn aborted() -> LlmError {
    LlmError::transport("Transfer aborted")
}
