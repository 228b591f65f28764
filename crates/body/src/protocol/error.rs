use std::io;
use thiserror::Error;

/// Errors raised while decoding a message body.
///
/// Every error terminates the body stream: the readers never retry, and a
/// reader that returned an error answers all further reads with
/// [`BodyError::Terminated`].
#[derive(Error, Debug)]
pub enum BodyError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("unexpected end of stream, expected {expected} bytes but only {actual} available")]
    UnexpectedEof { expected: u64, actual: u64 },

    #[error("unexpected end of stream while reading a {what} line")]
    MissingLine { what: &'static str },

    #[error("invalid chunk size line: {line:?}")]
    InvalidChunkSize { line: String },

    #[error("invalid chunk terminator, expected CRLF after chunk data")]
    InvalidChunkTerminator,

    #[error("chunk size {size} exceed the limit {max_size}")]
    ChunkTooLarge { size: u64, max_size: u64 },

    #[error("line length exceed the limit {max_size}")]
    LineTooLong { max_size: usize },

    #[error("trailer number exceed the limit {max_num}")]
    TooManyTrailers { max_num: usize },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("body invariant violated: {reason}")]
    Invariant { reason: String },

    #[error("body stream already terminated by a previous error")]
    Terminated,
}

/// Coarse classification of a [`BodyError`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The underlying transport failed, the io error is carried unchanged
    Transport,
    /// The bytes on the wire disagree with the declared framing
    Framing,
    /// Internal bookkeeping went wrong, this is a bug rather than bad input
    Invariant,
    /// The reader was used again after it already failed
    Terminated,
}

impl BodyError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    pub fn unexpected_eof(expected: u64, actual: u64) -> Self {
        Self::UnexpectedEof { expected, actual }
    }

    pub fn missing_line(what: &'static str) -> Self {
        Self::MissingLine { what }
    }

    pub fn invalid_chunk_size(line: &[u8]) -> Self {
        Self::InvalidChunkSize { line: String::from_utf8_lossy(line).into_owned() }
    }

    pub fn chunk_too_large(size: u64, max_size: u64) -> Self {
        Self::ChunkTooLarge { size, max_size }
    }

    pub fn line_too_long(max_size: usize) -> Self {
        Self::LineTooLong { max_size }
    }

    pub fn too_many_trailers(max_num: usize) -> Self {
        Self::TooManyTrailers { max_num }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn invariant<S: ToString>(str: S) -> Self {
        Self::Invariant { reason: str.to_string() }
    }

    /// Returns which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BodyError::Io { .. } => ErrorKind::Transport,
            BodyError::UnexpectedEof { .. }
            | BodyError::MissingLine { .. }
            | BodyError::InvalidChunkSize { .. }
            | BodyError::InvalidChunkTerminator
            | BodyError::ChunkTooLarge { .. }
            | BodyError::LineTooLong { .. }
            | BodyError::TooManyTrailers { .. }
            | BodyError::InvalidContentLength { .. } => ErrorKind::Framing,
            BodyError::Invariant { .. } => ErrorKind::Invariant,
            BodyError::Terminated => ErrorKind::Terminated,
        }
    }

    #[inline]
    pub fn is_framing(&self) -> bool {
        self.kind() == ErrorKind::Framing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_errors() {
        assert_eq!(BodyError::io(io::Error::from(io::ErrorKind::ConnectionReset)).kind(), ErrorKind::Transport);
        assert_eq!(BodyError::unexpected_eof(10, 3).kind(), ErrorKind::Framing);
        assert_eq!(BodyError::invalid_chunk_size(b"zz").kind(), ErrorKind::Framing);
        assert_eq!(BodyError::invariant("total mismatch").kind(), ErrorKind::Invariant);
        assert_eq!(BodyError::Terminated.kind(), ErrorKind::Terminated);
    }

    #[test]
    fn invalid_chunk_size_keeps_line_text() {
        let error = BodyError::invalid_chunk_size(b"xyz");
        assert_eq!(error.to_string(), r#"invalid chunk size line: "xyz""#);
    }
}
