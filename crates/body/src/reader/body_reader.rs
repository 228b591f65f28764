//! A single reader type for every body framing.
//!
//! [`BodyReader`] picks fixed-length, chunked or no-body decoding from a
//! [`PayloadSize`], so the layer owning the connection can drive any body
//! through one type.

use crate::config::BodyConfig;
use crate::protocol::{BodyError, PayloadSize, ReadOutcome};
use crate::reader::chunked_reader::ChunkedBodyReader;
use crate::reader::length_reader::FixedLengthBodyReader;
use crate::reader::BodyRead;
use crate::source::BufSource;

/// A body reader dispatching to the reader matching the message framing.
///
/// This reader supports three payload types:
/// - Fixed length payloads (using Content-Length)
/// - Chunked transfer encoding
/// - No body
#[derive(Debug)]
pub struct BodyReader<'a, S> {
    kind: Kind<'a, S>,
}

#[derive(Debug)]
enum Kind<'a, S> {
    /// Read a body with a fixed content length
    Length(FixedLengthBodyReader<'a, S>),

    /// Read a body using chunked transfer encoding
    Chunked(ChunkedBodyReader<'a, S>),

    /// Message without body
    NoBody,
}

impl<'a, S> BodyReader<'a, S> {
    /// Creates the reader matching `payload_size`.
    pub fn new(source: &'a mut S, payload_size: PayloadSize, config: &BodyConfig) -> Self {
        match payload_size {
            PayloadSize::Length(length) => Self::fix_length(source, length),
            PayloadSize::Chunked => Self::chunked(source, config),
            PayloadSize::Empty => Self::empty(),
        }
    }

    /// Creates a BodyReader for messages with no body.
    pub fn empty() -> Self {
        Self { kind: Kind::NoBody }
    }

    /// Creates a BodyReader for chunked transfer encoding.
    pub fn chunked(source: &'a mut S, config: &BodyConfig) -> Self {
        Self { kind: Kind::Chunked(ChunkedBodyReader::with_config(source, config)) }
    }

    /// Creates a BodyReader for a fixed-length body of `size` bytes.
    pub fn fix_length(source: &'a mut S, size: u64) -> Self {
        Self { kind: Kind::Length(FixedLengthBodyReader::new(source, size)) }
    }

    /// Returns whether this reader handles chunked transfer encoding.
    pub fn is_chunked(&self) -> bool {
        matches!(self.kind, Kind::Chunked(_))
    }

    /// Returns whether this reader handles messages with no body.
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, Kind::NoBody)
    }

    /// Returns whether this reader handles fixed-length payloads.
    pub fn is_fix_length(&self) -> bool {
        matches!(self.kind, Kind::Length(_))
    }
}

impl<S: BufSource + Send> BodyRead for BodyReader<'_, S> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<ReadOutcome, BodyError> {
        match &mut self.kind {
            Kind::Length(length_reader) => length_reader.read(buf).await,
            Kind::Chunked(chunked_reader) => chunked_reader.read(buf).await,
            Kind::NoBody => Ok(ReadOutcome::complete(0)),
        }
    }
}
