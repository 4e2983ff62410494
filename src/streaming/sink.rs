//! Delta sinks
//!
//! A sink receives each streamed delta synchronously, in arrival order, before
//! the delta is appended to the aggregate reply.

use tokio::sync::mpsc::UnboundedSender;

use crate::types::StreamDelta;

/// Receiver of live stream deltas.
pub trait DeltaSink: Send {
    fn on_delta(&mut self, delta: &StreamDelta);
}

impl<F> DeltaSink for F
where
    F: FnMut(&StreamDelta) + Send,
{
    fn on_delta(&mut self, delta: &StreamDelta) {
        self(delta)
    }
}

/// Forwards deltas into a channel; a dropped receiver is ignored.
impl DeltaSink for UnboundedSender<StreamDelta> {
    fn on_delta(&mut self, delta: &StreamDelta) {
        if self.send(delta.clone()).is_err() {
            tracing::debug!("delta receiver dropped; continuing aggregation only");
        }
    }
}

/// Sink that keeps every delta, mostly useful in tests and batch callers.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub deltas: Vec<StreamDelta>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<&str> {
        self.deltas.iter().map(|d| d.content.as_str()).collect()
    }
}

impl DeltaSink for CollectingSink {
    fn on_delta(&mut self, delta: &StreamDelta) {
        self.deltas.push(delta.clone());
    }
}
