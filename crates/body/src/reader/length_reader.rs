//! Reader for HTTP message bodies framed by a Content-Length header.
//!
//! The body size is known up front, see
//! [RFC 7230 Section 3.3.2](https://tools.ietf.org/html/rfc7230#section-3.3.2).
//! The reader never asks the source for more than the remaining quota, so
//! bytes of the next message on the connection are left untouched.

use crate::ensure;
use crate::protocol::{BodyError, ReadOutcome};
use crate::reader::BodyRead;
use crate::source::BufSource;
use tracing::{debug, trace, warn};

/// A reader for bodies with a known content length.
///
/// The reader tracks how many bytes were delivered so far and reports
/// completion on exactly the read that reaches `content_length`.
#[derive(Debug)]
pub struct FixedLengthBodyReader<'a, S> {
    source: &'a mut S,
    content_length: u64,
    total_read: u64,
    terminated: bool,
}

impl<'a, S> FixedLengthBodyReader<'a, S> {
    /// Creates a reader for a body of `content_length` bytes on `source`.
    pub fn new(source: &'a mut S, content_length: u64) -> Self {
        Self { source, content_length, total_read: 0, terminated: false }
    }

    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Number of body bytes delivered so far
    pub fn total_read(&self) -> u64 {
        self.total_read
    }

    pub fn remaining(&self) -> u64 {
        self.content_length - self.total_read
    }

    pub fn is_complete(&self) -> bool {
        self.total_read == self.content_length
    }
}

impl<S: BufSource + Send> FixedLengthBodyReader<'_, S> {
    async fn read_inner(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, BodyError> {
        let remaining = self.remaining();

        if remaining <= buf.len() as u64 {
            // the last read: fill exactly the remaining quota
            let quota = usize::try_from(remaining).map_err(BodyError::invariant)?;
            let read = self.source.read_full(&mut buf[..quota]).await?;
            self.total_read += read as u64;

            ensure!(read == quota, BodyError::unexpected_eof(self.content_length, self.total_read));
            ensure!(
                self.total_read == self.content_length,
                BodyError::invariant(format!("read {} bytes of a {} bytes body", self.total_read, self.content_length))
            );

            debug!(content_length = self.content_length, "finished reading fixed length body");
            return Ok(ReadOutcome::complete(read));
        }

        if buf.is_empty() {
            return Ok(ReadOutcome::partial(0));
        }

        let read = self.source.read_some(buf).await?;
        ensure!(read > 0, BodyError::unexpected_eof(self.content_length, self.total_read));

        self.total_read += read as u64;
        trace!(read, remaining = self.remaining(), "read fixed length body bytes");
        Ok(ReadOutcome::partial(read))
    }
}

impl<S: BufSource + Send> BodyRead for FixedLengthBodyReader<'_, S> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, BodyError> {
        ensure!(!self.terminated, BodyError::Terminated);

        let result = self.read_inner(buf).await;
        if let Err(e) = &result {
            warn!(cause = %e, content_length = self.content_length, total_read = self.total_read, "fixed length body terminated");
            self.terminated = true;
        }
        result
    }
}
