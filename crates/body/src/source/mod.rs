//! The byte source body readers pull from.
//!
//! Body readers never talk to a socket directly. They borrow a [`BufSource`],
//! a buffered view of the connection that can hand out bytes in three ways:
//!
//! - [`BufSource::read_some`]: best-effort, short reads allowed
//! - [`BufSource::read_full`]: fill the whole buffer unless the stream ends
//! - [`BufSource::read_line`]: one line of text, used for chunk-size lines
//!
//! [`BufferedSource`] implements the trait over any [`tokio::io::AsyncRead`].

mod buffered;

pub use buffered::BufferedSource;

use crate::protocol::BodyError;
use bytes::Bytes;
use std::io;

/// A buffered byte and line source shared by every body read on a connection.
///
/// Implementations must never consume bytes beyond what a call asked for, the
/// bytes following a body belong to the next message on the connection.
#[trait_variant::make(Send)]
pub trait BufSource {
    /// Reads up to `buf.len()` bytes.
    ///
    /// Returns `Ok(0)` only at end of stream or when `buf` is empty.
    async fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Reads until `buf` is completely filled or the stream ends.
    ///
    /// A result shorter than `buf.len()` means the stream reached its end,
    /// transport failures are reported as `Err`.
    async fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Reads one LF-terminated line and strips the line ending.
    ///
    /// Returns `Ok(None)` if the stream ended before a complete line.
    async fn read_line(&mut self) -> Result<Option<Bytes>, BodyError>;
}
