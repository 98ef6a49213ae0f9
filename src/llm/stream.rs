use std::collections::VecDeque;
use std::fmt::Display;

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};

use crate::llm::model::StreamChunk;

#[derive(Debug, PartialEq)]
pub enum SseEvent {
    Chunk(String),
    Done,
}

/// Splits a server-sent-event body into completion deltas.
/// Bytes may arrive cut anywhere, including inside a UTF-8 sequence.
#[derive(Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events carried by the complete lines received so far.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = decode_line(&String::from_utf8_lossy(&line)) {
                events.push(event);
            }
        }
        events
    }

    /// Decodes a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Vec<SseEvent> {
        let rest = std::mem::take(&mut self.buffer);
        decode_line(&String::from_utf8_lossy(&rest))
            .into_iter()
            .collect()
    }
}

fn decode_line(line: &str) -> Option<SseEvent> {
    let payload = line.trim_end_matches(['\r', '\n']).strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    if payload == "[DONE]" {
        return Some(SseEvent::Done);
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|c| !c.is_empty())
            .map(SseEvent::Chunk),
        Err(e) => {
            log::debug!("skipping malformed stream event: {e}");
            None
        }
    }
}

struct StreamState<T> {
    body: BoxStream<'static, T>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

/// Lazily turns an SSE byte stream into the text deltas it carries, ending at `[DONE]`,
/// at the end of the body, or at the first transport error.
pub fn content_stream<S, B, E>(body: S) -> BoxStream<'static, String>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = StreamState {
        body: body.boxed(),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(chunk) = state.pending.pop_front() {
                return Some((chunk, state));
            }
            if state.finished {
                return None;
            }

            let events = match state.body.next().await {
                Some(Ok(bytes)) => state.decoder.feed(bytes.as_ref()),
                Some(Err(e)) => {
                    log::warn!("completion stream interrupted: {e}");
                    state.finished = true;
                    Vec::new()
                }
                None => {
                    state.finished = true;
                    state.decoder.finish()
                }
            };

            for event in events {
                match event {
                    SseEvent::Chunk(text) => state.pending.push_back(text),
                    SseEvent::Done => {
                        state.finished = true;
                        break;
                    }
                }
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn delta(text: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"delta": {"content": text}}]})
        )
    }

    #[test]
    fn test_decoder_handles_split_lines() {
        let mut decoder = SseDecoder::new();
        let event = delta("Hola");
        let (a, b) = event.split_at(10);

        assert!(decoder.feed(a.as_bytes()).is_empty());
        assert_eq!(
            decoder.feed(b.as_bytes()),
            vec![SseEvent::Chunk("Hola".to_string())]
        );
    }

    #[test]
    fn test_decoder_skips_noise() {
        let mut decoder = SseDecoder::new();
        let body = format!(
            ": keep-alive\nevent: message\ndata: {{not json\ndata: {{\"choices\": []}}\n{}data: [DONE]\n",
            delta("ok")
        );
        assert_eq!(
            decoder.feed(body.as_bytes()),
            vec![SseEvent::Chunk("ok".to_string()), SseEvent::Done]
        );
    }

    #[test]
    fn test_decoder_finish_flushes_last_line() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: [DONE]").is_empty());
        assert_eq!(decoder.finish(), vec![SseEvent::Done]);
    }

    #[tokio::test]
    async fn test_content_stream_concatenates_deltas() {
        let body = format!(
            "{}data: garbage\n{}{}data: [DONE]\n{}",
            delta("Messi "),
            delta("is "),
            delta("fit."),
            delta("ignored after done")
        );
        // Deliver in awkward pieces.
        let pieces: Vec<Result<Vec<u8>, Infallible>> = body
            .as_bytes()
            .chunks(7)
            .map(|c| Ok(c.to_vec()))
            .collect();

        let chunks: Vec<String> = content_stream(stream::iter(pieces)).collect().await;
        assert_eq!(chunks.concat(), "Messi is fit.");
    }

    #[tokio::test]
    async fn test_content_stream_stops_on_transport_error() {
        let pieces: Vec<Result<String, String>> =
            vec![Ok(delta("partial")), Err("connection reset".to_string()), Ok(delta("lost"))];
        let chunks: Vec<String> = content_stream(stream::iter(pieces)).collect().await;
        assert_eq!(chunks, vec!["partial"]);
    }
}
