//! HTTP transport abstraction.
//!
//! The executors talk to an injectable transport so the network call can be
//! swapped for a stub in tests or for an embedder's own HTTP stack.
//! `ReqwestTransport` is the default implementation.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::HeaderMap;

use crate::config::ProxyConfig;
use crate::error::LlmError;

/// Transport-level request data for JSON POST requests.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub request_id: String,
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Raw body chunks as they arrive.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, LlmError>> + Send>>;

/// Incrementally delivered response body.
pub struct HttpTransportStreamBody {
    stream: ByteStream,
}

impl HttpTransportStreamBody {
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, LlmError>> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
        }
    }

    /// A body delivered as the given chunks, in order.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
        I::IntoIter: Send + 'static,
    {
        Self::from_stream(futures_util::stream::iter(
            chunks.into_iter().map(|c| Ok(Bytes::from(c))),
        ))
    }

    pub fn into_stream(self) -> ByteStream {
        self.stream
    }
}

impl std::fmt::Debug for HttpTransportStreamBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportStreamBody").finish_non_exhaustive()
    }
}

/// Response whose status/headers are known but whose body is still streaming.
#[derive(Debug)]
pub struct HttpTransportStreamResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: HttpTransportStreamBody,
}

/// Custom HTTP transport for JSON POST requests.
///
/// Implementations must map connection and transfer failures to
/// `LlmError::TransportError`; HTTP status handling belongs to the caller.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError>;

    async fn execute_stream(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportStreamResponse, LlmError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client, routing through `proxy` when given.
    pub fn new(proxy: Option<&ProxyConfig>) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy.url()).map_err(|e| {
                LlmError::ConfigurationError(format!("Invalid proxy configuration: {e}"))
            })?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build().map_err(|e| {
            LlmError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self { client })
    }

    fn post(&self, request: &HttpTransportRequest) -> reqwest::RequestBuilder {
        self.client
            .post(&request.url)
            .headers(request.headers.clone())
            .json(&request.body)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        let resp = self.post(&request).send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| LlmError::TransportError(format!("Failed to read response body: {e}")))?;

        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }

    async fn execute_stream(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportStreamResponse, LlmError> {
        let resp = self.post(&request).send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let stream = resp
            .bytes_stream()
            .map(|item| item.map_err(|e| LlmError::TransportError(format!("Stream aborted: {e}"))));

        Ok(HttpTransportStreamResponse {
            status,
            headers,
            body: HttpTransportStreamBody::from_stream(stream),
        })
    }
}
