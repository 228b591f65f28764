//! HTTP body readers for the framings of HTTP/1.1.
//!
//! Every reader implements [`BodyRead`], a pull-based byte stream: the caller
//! hands in a buffer, the reader fills some of it and tells whether the body
//! is complete.
//!
//! # Components
//!
//! - [`FixedLengthBodyReader`]: bodies framed by Content-Length
//! - [`ChunkedBodyReader`]: bodies using chunked transfer encoding
//! - [`BodyReader`]: picks one of the above, or no body, from a [`PayloadSize`](crate::protocol::PayloadSize)
//!
//! On top of [`BodyRead`], [`read_to_end`] and [`skip_to_end`] drain a body,
//! [`into_stream`] and [`into_body`] adapt a reader to `futures` and `http_body`.

mod body_reader;
mod chunked_reader;
mod length_reader;
mod stream;

pub use body_reader::BodyReader;
pub use chunked_reader::ChunkedBodyReader;
pub use length_reader::FixedLengthBodyReader;
pub use stream::{into_body, into_stream};

use crate::protocol::{BodyError, ReadOutcome};
use tracing::debug;

/// Size of the scratch buffer used when draining a body
const DRAIN_BUFFER_SIZE: usize = 8 * 1024;

/// A pull-based HTTP message body.
///
/// `read` may be called repeatedly until it reports
/// [`ReadOutcome::complete`]. A reader is exclusively owned by the code
/// consuming the body; any error terminates it for good.
#[trait_variant::make(Send)]
pub trait BodyRead {
    /// Reads the next body bytes into `buf`.
    ///
    /// Returns how many bytes were written and whether the body is now
    /// complete. Once complete, further calls return `(0, true)`.
    async fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, BodyError>;
}

/// Reads the whole remaining body into `out`, returning the number of bytes appended.
pub async fn read_to_end<R: BodyRead>(reader: &mut R, out: &mut Vec<u8>) -> Result<usize, BodyError> {
    let mut buf = vec![0u8; DRAIN_BUFFER_SIZE];
    let mut total = 0;
    loop {
        let outcome = reader.read(&mut buf).await?;
        out.extend_from_slice(&buf[..outcome.read]);
        total += outcome.read;
        if outcome.complete {
            return Ok(total);
        }
    }
}

/// Discards the rest of a body so the connection can carry the next message.
///
/// Returns the number of bytes skipped.
pub async fn skip_to_end<R: BodyRead>(reader: &mut R) -> Result<u64, BodyError> {
    let mut buf = vec![0u8; DRAIN_BUFFER_SIZE];
    let mut skipped = 0;
    loop {
        let outcome = reader.read(&mut buf).await?;
        skipped += outcome.read as u64;
        if outcome.complete {
            debug!(skipped, "skipped unread body");
            return Ok(skipped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BufferedSource;
    use crate::source::testing::trickle;

    #[tokio::test]
    async fn read_to_end_collects_chunked_body() {
        let mut source = BufferedSource::new(trickle(b"3\r\nabc\r\n2\r\nde\r\n0\r\n\r\n"));
        let mut reader = ChunkedBodyReader::new(&mut source);

        let mut out = b"prefix:".to_vec();
        assert_eq!(read_to_end(&mut reader, &mut out).await.unwrap(), 5);
        assert_eq!(out, b"prefix:abcde");
    }

    #[tokio::test]
    async fn skip_to_end_leaves_next_message() {
        let mut source = BufferedSource::new(&b"0123456789GET / HTTP/1.1\r\n"[..]);
        let mut reader = FixedLengthBodyReader::new(&mut source, 10);

        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).await.unwrap(), ReadOutcome::partial(4));
        assert_eq!(skip_to_end(&mut reader).await.unwrap(), 6);

        assert_eq!(source.buffer(), b"GET / HTTP/1.1\r\n");
    }

    #[tokio::test]
    async fn drain_propagates_errors() {
        let mut source = BufferedSource::new(&b"5\r\nhel"[..]);
        let mut reader = ChunkedBodyReader::new(&mut source);

        let error = skip_to_end(&mut reader).await.unwrap_err();
        assert!(matches!(error, BodyError::UnexpectedEof { expected: 5, actual: 3 }));
    }
}
