//! Reader for the worker's NUL-delimited JSON generation stream.

use std::pin::Pin;

use bytes::{Buf, Bytes, BytesMut};
use futures_util::{Stream, StreamExt, TryStreamExt};

use crate::error::ClientError;
use crate::protocol::GenerateChunk;

/// Frames in the generation stream are separated by a NUL byte.
const DELIMITER: u8 = 0;

/// Pull-based reader over a streaming response body.
///
/// Bytes are buffered until a NUL delimiter is seen; each non-empty frame is
/// decoded as UTF-8 JSON into a [`GenerateChunk`]. A trailing unterminated
/// frame at end of stream is decoded as a final chunk. Malformed frames are
/// errors, never skipped.
pub struct ChunkReader {
    stream: Pin<Box<dyn Stream<Item = Result<Bytes, ClientError>> + Send>>,
    buf: BytesMut,
    eof: bool,
}

impl ChunkReader {
    pub fn new(
        stream: impl Stream<Item = Result<Bytes, ClientError>> + Send + 'static,
    ) -> Self {
        Self {
            stream: Box::pin(stream),
            buf: BytesMut::new(),
            eof: false,
        }
    }

    /// Wrap a streaming HTTP response body.
    pub fn from_response(response: reqwest::Response) -> Self {
        Self::new(response.bytes_stream().map_err(ClientError::from))
    }

    /// The next parsed chunk, or `None` once the stream is exhausted.
    pub async fn next_chunk(&mut self) -> Result<Option<GenerateChunk>, ClientError> {
        loop {
            if let Some(pos) = self.buf.iter().position(|&b| b == DELIMITER) {
                let frame = self.buf.split_to(pos);
                self.buf.advance(1);
                if frame.is_empty() {
                    continue;
                }
                return parse_frame(&frame).map(Some);
            }

            if self.eof {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                let frame = self.buf.split_to(self.buf.len());
                return parse_frame(&frame).map(Some);
            }

            match self.stream.next().await {
                Some(bytes) => self.buf.extend_from_slice(&bytes?),
                None => self.eof = true,
            }
        }
    }
}

fn parse_frame(frame: &[u8]) -> Result<GenerateChunk, ClientError> {
    let text = std::str::from_utf8(frame)?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn reader_over(parts: Vec<&'static [u8]>) -> ChunkReader {
        ChunkReader::new(stream::iter(
            parts.into_iter().map(|p| Ok(Bytes::from_static(p))),
        ))
    }

    #[tokio::test]
    async fn parses_chunks_in_order() {
        let mut reader = reader_over(vec![b"{\"text\":\"Hello\"}\0{\"text\":\"Hello world\"}\0"]);
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "Hello");
        assert_eq!(
            reader.next_chunk().await.unwrap().unwrap().text,
            "Hello world"
        );
        assert!(reader.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reassembles_frames_split_across_reads() {
        let mut reader = reader_over(vec![b"{\"text\":\"Hel", b"lo\"}\0"]);
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "Hello");
        assert!(reader.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn skips_empty_frames() {
        let mut reader = reader_over(vec![b"\0\0{\"text\":\"x\"}\0\0"]);
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "x");
        assert!(reader.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn trailing_unterminated_frame_is_a_chunk() {
        let mut reader = reader_over(vec![b"{\"text\":\"a\"}\0{\"text\":\"b\"}"]);
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "a");
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "b");
        assert!(reader.next_chunk().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_frame_is_an_error() {
        let mut reader = reader_over(vec![b"{\"text\":\"ok\"}\0not json\0"]);
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "ok");
        assert!(matches!(
            reader.next_chunk().await,
            Err(ClientError::Json(_))
        ));
    }

    #[tokio::test]
    async fn unknown_fields_are_ignored() {
        let mut reader =
            reader_over(vec![b"{\"text\":\"hi\",\"error_code\":0,\"usage\":{}}\0"]);
        assert_eq!(reader.next_chunk().await.unwrap().unwrap().text, "hi");
    }
}
