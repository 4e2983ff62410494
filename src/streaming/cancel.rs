//! Cancellation utilities
//!
//! Provides an abort handle for in-flight chat requests.

use tokio_util::sync::CancellationToken;

/// A handle that can be used to abort an in-flight request.
///
/// Once cancelled, the request future stops at its next await point, drops the
/// HTTP response (closing the connection) and the sink receives no further
/// deltas.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}
