//! Reader for HTTP chunked transfer encoding.
//!
//! This module decodes message bodies that use chunked transfer encoding
//! as specified in [RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1).
//!
//! Chunks are decoded one whole unit at a time but handed out in slices sized
//! by the caller's buffer. A chunk larger than the caller's buffer stays at the
//! front of the pending queue and is drained before the next size line is read.

use crate::config::BodyConfig;
use crate::ensure;
use crate::protocol::{BodyError, ReadOutcome};
use crate::reader::BodyRead;
use crate::source::BufSource;
use bytes::{Bytes, BytesMut};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

const CRLF: &[u8; 2] = b"\r\n";

/// A reader for bodies using chunked transfer encoding.
///
/// The reader processes the wire format:
/// - Each chunk starts with its size in hexadecimal on its own line
/// - Anything after the hex digits (chunk extensions) is ignored
/// - Then the chunk data and CRLF
/// - A zero-sized chunk indicates the end of the body, optionally followed by
///   trailer fields and a final empty line
///
/// Trailer fields are consumed so the connection stays in sync, but they are
/// not collected.
#[derive(Debug)]
pub struct ChunkedBodyReader<'a, S> {
    source: &'a mut S,
    pending: VecDeque<Bytes>,
    crlf: [u8; 2],
    finished: bool,
    terminated: bool,
    max_chunk_size: u64,
    max_trailer_fields: usize,
}

impl<'a, S> ChunkedBodyReader<'a, S> {
    /// Creates a reader with the default [`BodyConfig`] limits.
    pub fn new(source: &'a mut S) -> Self {
        Self::with_config(source, &BodyConfig::default())
    }

    pub fn with_config(source: &'a mut S, config: &BodyConfig) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
            crlf: [0; 2],
            finished: false,
            terminated: false,
            max_chunk_size: config.max_chunk_size(),
            max_trailer_fields: config.max_trailer_fields(),
        }
    }

    /// Returns true once the last chunk was read and every decoded byte delivered
    pub fn is_complete(&self) -> bool {
        self.finished && self.pending.is_empty()
    }

    /// Copies the front pending chunk, or a prefix of it, into `buf`.
    fn deliver(&mut self, buf: &mut [u8]) -> ReadOutcome {
        let Some(chunk) = self.pending.front_mut() else {
            return ReadOutcome::complete(0);
        };

        if chunk.len() <= buf.len() {
            let len = chunk.len();
            buf[..len].copy_from_slice(chunk);
            self.pending.pop_front();
            trace!(len, "delivered whole chunk");
            ReadOutcome::partial(len)
        } else {
            let head = chunk.split_to(buf.len());
            buf.copy_from_slice(&head);
            trace!(len = head.len(), carried = chunk.len(), "delivered chunk prefix");
            ReadOutcome::partial(head.len())
        }
    }
}

impl<S: BufSource + Send> ChunkedBodyReader<'_, S> {
    async fn read_inner(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, BodyError> {
        if self.pending.is_empty() && !self.finished {
            match self.next_chunk().await? {
                Some(chunk) => self.pending.push_back(chunk),
                None => return Ok(ReadOutcome::complete(0)),
            }
        }

        Ok(self.deliver(buf))
    }

    /// Decodes the next chunk, `None` after the last chunk.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, BodyError> {
        let line = self.source.read_line().await?.ok_or_else(|| BodyError::missing_line("chunk size"))?;
        let size = parse_chunk_size(&line)?;

        if size == 0 {
            self.read_trailers().await?;
            self.finished = true;
            debug!("finished reading chunked body");
            return Ok(None);
        }

        ensure!(size <= self.max_chunk_size, BodyError::chunk_too_large(size, self.max_chunk_size));
        let len = usize::try_from(size).ok().ok_or_else(|| BodyError::chunk_too_large(size, self.max_chunk_size))?;

        let mut chunk = BytesMut::zeroed(len);
        let read = self.source.read_full(&mut chunk).await?;
        ensure!(read == len, BodyError::unexpected_eof(size, read as u64));

        let read = self.source.read_full(&mut self.crlf).await?;
        ensure!(read == CRLF.len(), BodyError::unexpected_eof(CRLF.len() as u64, read as u64));
        ensure!(&self.crlf == CRLF, BodyError::InvalidChunkTerminator);

        trace!(size, "read chunk");
        Ok(Some(chunk.freeze()))
    }

    /// Consumes the trailer section up to and including the final empty line.
    async fn read_trailers(&mut self) -> Result<(), BodyError> {
        let mut fields = 0;
        loop {
            let line = self.source.read_line().await?.ok_or_else(|| BodyError::missing_line("trailer"))?;
            if line.is_empty() {
                if fields > 0 {
                    debug!(fields, "discarded chunked trailer fields");
                }
                return Ok(());
            }

            fields += 1;
            ensure!(fields <= self.max_trailer_fields, BodyError::too_many_trailers(self.max_trailer_fields));
        }
    }
}

impl<S: BufSource + Send> BodyRead for ChunkedBodyReader<'_, S> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, BodyError> {
        ensure!(!self.terminated, BodyError::Terminated);

        let result = self.read_inner(buf).await;
        if let Err(e) = &result {
            warn!(cause = %e, "chunked body terminated");
            self.terminated = true;
        }
        result
    }
}

/// Parses a chunk-size line as a bare hexadecimal number.
///
/// Leading whitespace is skipped, digits are read up to the first
/// non-hex byte and the rest of the line (chunk extensions) is ignored. A
/// line without any hex digit or a size overflowing `u64` is rejected.
fn parse_chunk_size(line: &[u8]) -> Result<u64, BodyError> {
    let digits = line.trim_ascii_start();
    let mut size: u64 = 0;
    let mut count = 0;

    for &b in digits {
        let value = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b + 10 - b'a',
            b'A'..=b'F' => b + 10 - b'A',
            _ => break,
        };
        size = size
            .checked_mul(16)
            .and_then(|size| size.checked_add(u64::from(value)))
            .ok_or_else(|| BodyError::invalid_chunk_size(line))?;
        count += 1;
    }

    ensure!(count > 0, BodyError::invalid_chunk_size(line));
    Ok(size)
}
