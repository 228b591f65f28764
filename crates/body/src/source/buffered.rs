use crate::config::BodyConfig;
use crate::ensure;
use crate::protocol::BodyError;
use crate::source::BufSource;
use bytes::{Bytes, BytesMut};
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tracing::trace;

/// A [`BufSource`] over any async reader, backed by [`tokio::io::BufReader`].
///
/// Line reads go through `fill_buf`/`consume` and stop right after the LF, so
/// whatever follows a body on the connection stays in the buffer for the next
/// message.
#[derive(Debug)]
pub struct BufferedSource<R> {
    inner: BufReader<R>,
    max_line_length: usize,
}

impl<R: AsyncRead> BufferedSource<R> {
    /// Creates a source with the default [`BodyConfig`].
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &BodyConfig::default())
    }

    pub fn with_config(reader: R, config: &BodyConfig) -> Self {
        Self {
            inner: BufReader::with_capacity(config.read_buffer_capacity(), reader),
            max_line_length: config.max_line_length(),
        }
    }

    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Bytes already pulled from the transport but not consumed yet.
    pub fn buffer(&self) -> &[u8] {
        self.inner.buffer()
    }

    /// Unwraps the transport, dropping any buffered bytes.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R> BufSource for BufferedSource<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).await
    }

    async fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]).await {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    async fn read_line(&mut self) -> Result<Option<Bytes>, BodyError> {
        let mut line = BytesMut::new();
        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                trace!(partial = line.len(), "stream ended before end of line");
                return Ok(None);
            }

            match available.iter().position(|b| *b == b'\n') {
                Some(index) => {
                    ensure!(line.len() + index <= self.max_line_length, BodyError::line_too_long(self.max_line_length));
                    line.extend_from_slice(&available[..index]);
                    self.inner.consume(index + 1);

                    if line.last() == Some(&b'\r') {
                        line.truncate(line.len() - 1);
                    }
                    return Ok(Some(line.freeze()));
                }
                None => {
                    let len = available.len();
                    ensure!(line.len() + len <= self.max_line_length, BodyError::line_too_long(self.max_line_length));
                    line.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }
    }
}
