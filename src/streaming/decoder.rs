//! SSE frame decoder for chat-completions streams
//!
//! Turns raw body chunks into ordered `StreamDelta`s. The decoder owns only a
//! carry-over buffer for the incomplete trailing line, so it is a plain state
//! transition driven synchronously by the transport loop:
//! `push(chunk) -> deltas`.

use crate::standards::openai::ChatCompletionChunk;
use crate::types::StreamDelta;

/// Prefix that marks a data line.
pub const DATA_PREFIX: &str = "data: ";

/// Frame payload that marks the end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Incremental line/frame decoder.
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    // Bytes, not text: a multi-byte character may straddle two chunks.
    buffer: Vec<u8>,
    done: bool,
}

impl SseFrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one body chunk and return the deltas completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamDelta> {
        self.buffer.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buffer[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            let line = classify_line(&self.buffer[start..end]);
            self.apply(line, &mut deltas);
            start = end + 1;
        }
        self.buffer.drain(..start);
        deltas
    }

    /// Flush the carry-over at end-of-transfer.
    ///
    /// A final frame that arrives without a trailing newline is still decoded.
    pub fn finish(&mut self) -> Vec<StreamDelta> {
        let rest = std::mem::take(&mut self.buffer);
        let mut deltas = Vec::new();
        self.apply(classify_line(&rest), &mut deltas);
        deltas
    }

    /// Bytes held back waiting for a newline.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn saw_done(&self) -> bool {
        self.done
    }

    fn apply(&mut self, line: Line, deltas: &mut Vec<StreamDelta>) {
        match line {
            Line::Delta(_) if self.done => {
                tracing::trace!("discarding frame received after [DONE]");
            }
            Line::Delta(delta) => deltas.push(delta),
            Line::Done => self.done = true,
            Line::Skip => {}
        }
    }
}

enum Line {
    Delta(StreamDelta),
    Done,
    Skip,
}

fn classify_line(raw: &[u8]) -> Line {
    let Ok(text) = std::str::from_utf8(raw) else {
        tracing::trace!("discarding stream line that is not valid UTF-8");
        return Line::Skip;
    };
    let line = text.trim();
    if line.is_empty() {
        return Line::Skip;
    }

    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Line::Skip;
    };
    if payload == DONE_SENTINEL {
        return Line::Done;
    }

    decode_frame(payload).map_or(Line::Skip, Line::Delta)
}

/// Decode one frame payload; malformed or off-shape frames yield `None`.
pub fn decode_frame(payload: &str) -> Option<StreamDelta> {
    match serde_json::from_str::<ChatCompletionChunk>(payload) {
        Ok(chunk) => {
            let content = chunk.into_delta_content();
            if content.is_none() {
                tracing::trace!("discarding frame without choices[0].delta.content");
            }
            content.map(StreamDelta::new)
        }
        Err(e) => {
            tracing::trace!(error = %e, "discarding malformed stream frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(deltas: Vec<StreamDelta>) -> Vec<String> {
        deltas.into_iter().map(|d| d.content).collect()
    }

    #[test]
    fn reassembles_deltas_across_chunks() {
        let mut decoder = SseFrameDecoder::new();
        let first = decoder.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"He\"}}]}\n\n");
        let second = decoder.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"llo\"}}]}\n\ndata: [DONE]\n\n",
        );

        assert_eq!(contents(first), vec!["He"]);
        assert_eq!(contents(second), vec!["llo"]);
        assert!(decoder.saw_done());
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn line_split_mid_json_yields_exactly_one_delta() {
        let mut decoder = SseFrameDecoder::new();
        let a = decoder.push(b"data: {\"choices\":[{\"delta\":{\"con");
        assert!(a.is_empty());
        assert!(decoder.pending_len() > 0);

        let b = decoder.push(b"tent\":\"Hi\"}}]}\n\n");
        assert_eq!(contents(b), vec!["Hi"]);
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn malformed_frame_is_dropped_without_ending_stream() {
        let mut decoder = SseFrameDecoder::new();
        let out = decoder.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\
              data: {not json}\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n",
        );
        assert_eq!(contents(out), vec!["a", "b"]);
    }

    #[test]
    fn non_data_lines_and_off_shape_frames_are_ignored() {
        let mut decoder = SseFrameDecoder::new();
        let out = decoder.push(
            b": keep-alive\n\
              event: ping\n\
              data: {\"choices\":[]}\n\
              data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\
              data:\n\
              data: \n\
              \r\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\r\n",
        );
        assert_eq!(contents(out), vec!["ok"]);
    }

    #[test]
    fn done_sentinel_is_not_forwarded() {
        let mut decoder = SseFrameDecoder::new();
        assert!(decoder.push(b"data: [DONE]\n").is_empty());
        assert!(decoder.saw_done());
    }

    #[test]
    fn multibyte_character_split_across_chunks() {
        let frame = "data: {\"choices\":[{\"delta\":{\"content\":\"h\u{e9}\"}}]}\n";
        let bytes = frame.as_bytes();
        let split = frame.find('\u{e9}').unwrap() + 1;

        let mut decoder = SseFrameDecoder::new();
        assert!(decoder.push(&bytes[..split]).is_empty());
        assert_eq!(contents(decoder.push(&bytes[split..])), vec!["h\u{e9}"]);
    }

    #[test]
    fn finish_flushes_unterminated_final_frame() {
        let mut decoder = SseFrameDecoder::new();
        assert!(
            decoder
                .push(b"data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}")
                .is_empty()
        );
        assert_eq!(contents(decoder.finish()), vec!["tail"]);
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn frames_after_done_are_ignored() {
        let mut decoder = SseFrameDecoder::new();
        let out = decoder.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\
              data: [DONE]\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"late\"}}]}\n",
        );
        assert_eq!(contents(out), vec!["a"]);
        assert!(decoder.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"later\"}}]}").is_empty());
        assert!(decoder.finish().is_empty());
    }

    #[test]
    fn invalid_utf8_frame_is_discarded() {
        let mut decoder = SseFrameDecoder::new();
        let mut chunk = b"data: {\"choices\":[{\"delta\":{\"content\":\"x".to_vec();
        chunk.extend_from_slice(&[0xff, 0xfe]);
        chunk.extend_from_slice(b"\"}}]}\ndata: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n");
        assert_eq!(contents(decoder.push(&chunk)), vec!["ok"]);
    }
}
