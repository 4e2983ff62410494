use async_trait::async_trait;
use pagechat::execution::http::transport::{
    HttpTransport, HttpTransportRequest, HttpTransportResponse, HttpTransportStreamBody,
    HttpTransportStreamResponse,
};
use pagechat::prelude::*;
use reqwest::header::HeaderMap;
use std::sync::{Arc, Mutex};

const BUFFERED_HELLO: &str = r#"{"choices":[{"message":{"content":"hello"}}]}"#;

#[derive(Clone, Default)]
struct RecordingTransport {
    chunks: Vec<String>,
    calls: Arc<Mutex<Vec<HttpTransportRequest>>>,
}

impl RecordingTransport {
    fn with_chunks(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            calls: Arc::default(),
        }
    }

    fn calls(&self) -> Vec<HttpTransportRequest> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        self.calls.lock().expect("lock").push(request);
        Ok(HttpTransportResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: self.chunks.concat().into_bytes(),
        })
    }

    async fn execute_stream(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportStreamResponse, LlmError> {
        self.calls.lock().expect("lock").push(request);
        Ok(HttpTransportStreamResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: HttpTransportStreamBody::from_chunks(
                self.chunks
                    .iter()
                    .map(|c| c.clone().into_bytes())
                    .collect::<Vec<_>>(),
            ),
        })
    }
}

fn client(transport: &RecordingTransport, stream: bool) -> ChatClient {
    let config = ClientConfig::new("gpt-4o-mini")
        .with_endpoint("https://example.invalid/v1/chat/completions")
        .with_api_key("test-key")
        .with_temperature(0.2)
        .with_stream(stream);
    ChatClient::with_transport(config, Arc::new(transport.clone())).expect("client")
}

#[tokio::test]
async fn split_line_reassembles_into_one_delta() {
    let transport = RecordingTransport::with_chunks(&[
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hel",
        "lo\"}}]}\n\ndata: [DONE]\n\n",
    ]);
    let mut sink = CollectingSink::new();
    let reply = client(&transport, true)
        .chat_stream(vec![ChatMessage::user("hi")], &mut sink)
        .await
        .expect("stream ok");

    assert_eq!(sink.contents(), vec!["Hello"]);
    assert_eq!(reply, "Hello");
}

#[tokio::test]
async fn malformed_frame_between_valid_frames_is_skipped() {
    let transport = RecordingTransport::with_chunks(&[
        "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n\ndata: [DONE]\n\n",
    ]);
    let mut seen = Vec::new();
    let mut sink = |d: &StreamDelta| seen.push(d.content.clone());
    let reply = client(&transport, true)
        .chat_stream(vec![ChatMessage::user("hi")], &mut sink)
        .await
        .expect("stream ok");

    assert_eq!(reply, "ab");
    assert_eq!(seen, vec!["a", "b"]);
}

#[tokio::test]
async fn channel_sink_receives_live_deltas() {
    let transport = RecordingTransport::with_chunks(&[
        "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"y\"}}]}\n",
    ]);
    let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let reply = client(&transport, true)
        .chat_stream(vec![ChatMessage::user("hi")], &mut tx)
        .await
        .expect("stream ok");
    drop(tx);

    let mut received = Vec::new();
    while let Some(delta) = rx.recv().await {
        received.push(delta.content);
    }
    assert_eq!(received, vec!["x", "y"]);
    assert_eq!(reply, "xy");
}

#[tokio::test]
async fn abort_stops_delivery_to_sink() {
    let transport = RecordingTransport::with_chunks(&[concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"first\"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"second\"}}]}\n",
    )]);
    let cancel = CancelHandle::new();
    let trigger = cancel.clone();
    let mut seen = Vec::new();
    let mut sink = |d: &StreamDelta| {
        seen.push(d.content.clone());
        trigger.cancel();
    };

    let err = client(&transport, true)
        .chat_stream_with_cancel(vec![ChatMessage::user("hi")], &mut sink, &cancel)
        .await
        .expect_err("aborted");

    assert!(err.is_transport_error());
    assert_eq!(seen, vec!["first"]);
}

#[tokio::test]
async fn buffered_calls_are_idempotent() {
    let transport = RecordingTransport::with_chunks(&[BUFFERED_HELLO]);
    let client = client(&transport, false);
    let request = ChatRequest::new(vec![ChatMessage::user("hi")]).with_system_prompt("sys");

    let first = client.chat(request.clone()).await.expect("first");
    let second = client.chat(request).await.expect("second");
    assert_eq!(first, "hello");
    assert_eq!(first, second);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].body, calls[1].body);
    assert_ne!(calls[0].request_id, calls[1].request_id);
}

#[tokio::test]
async fn request_carries_headers_and_ordered_messages() {
    let transport = RecordingTransport::with_chunks(&[BUFFERED_HELLO]);
    let request = ChatRequest::new(vec![ChatMessage::user("What is on this page?")])
        .with_system_prompt("You are a wiki assistant.")
        .with_context(vec![
            ContextResource::page_context("Start", "Welcome"),
            ContextResource::image_file("diagram.png", "https://wiki.local/diagram.png")
                .with_mime_type("image/png"),
        ]);

    client(&transport, false).chat(request).await.expect("chat ok");

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.url, "https://example.invalid/v1/chat/completions");
    assert_eq!(
        call.headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "Bearer test-key"
    );
    assert_eq!(
        call.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "application/json"
    );

    let messages = call.body["messages"].as_array().expect("messages");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "You are a wiki assistant.");
    assert_eq!(messages[1]["role"], "user");
    let blocks = messages[1]["content"].as_array().expect("blocks");
    assert_eq!(blocks.len(), 2 + 3 * 2);
    assert_eq!(blocks[5]["type"], "image_url");
    assert_eq!(blocks[5]["image_url"]["url"], "https://wiki.local/diagram.png");
    assert_eq!(blocks[5]["image_url"]["detail"], "high");
    assert_eq!(messages[2]["content"], "What is on this page?");
    assert_eq!(call.body["model"], "gpt-4o-mini");
    assert_eq!(call.body["temperature"], 0.2);
    assert_eq!(call.body["stream"], false);
}

#[tokio::test]
async fn legacy_chat_object_is_normalized() {
    let transport = RecordingTransport::with_chunks(&[BUFFERED_HELLO]);
    let legacy = LegacyChat {
        system_prompt: None,
        history: vec![LegacyTurn {
            question: "Who wrote this page?".into(),
            answer: "Alice.".into(),
        }],
        question: "When?".into(),
        context: vec![],
    };

    let reply = client(&transport, false).chat(legacy).await.expect("chat ok");
    assert_eq!(reply, "hello");

    let body = &transport.calls()[0].body;
    assert_eq!(
        body["messages"],
        serde_json::json!([
            {"role": "user", "content": "Who wrote this page?"},
            {"role": "assistant", "content": "Alice."},
            {"role": "user", "content": "When?"}
        ])
    );
}
