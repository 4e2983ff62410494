//! Streaming support: frame decoding, delta sinks and cancellation.

pub mod cancel;
pub mod decoder;
pub mod sink;

pub use cancel::CancelHandle;
pub use decoder::{DATA_PREFIX, DONE_SENTINEL, SseFrameDecoder, decode_frame};
pub use sink::{CollectingSink, DeltaSink};
