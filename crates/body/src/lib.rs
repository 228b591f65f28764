//! Incremental HTTP/1.1 message body decoding
//!
//! This crate reads an HTTP message body out of a buffered connection and hands
//! it to the caller as a pull-based byte stream. Both framings of HTTP/1.1 are
//! supported:
//!
//! - Fixed length bodies, delimited by a `Content-Length` header
//! - `Transfer-Encoding: chunked` bodies
//!
//! A body reader never consumes bytes past the end of its body, so the next
//! pipelined message on the same connection stays intact in the source. The
//! bytes delivered do not depend on the size of the buffers the caller reads
//! with, nor on how the transport splits its reads.
//!
//! # Example
//!
//! ```no_run
//! use micro_body::reader::{BodyRead, BodyReader};
//! use micro_body::source::BufferedSource;
//! use micro_body::protocol::PayloadSize;
//! use micro_body::BodyConfig;
//! use tokio::net::TcpStream;
//! use tracing::info;
//!
//! # async fn run(headers: http::HeaderMap) -> Result<(), Box<dyn std::error::Error>> {
//! let config = BodyConfig::default();
//! let tcp_stream = TcpStream::connect("127.0.0.1:8080").await?;
//! let mut source = BufferedSource::with_config(tcp_stream, &config);
//!
//! // the request line and headers were read from `source` already
//! let payload_size = PayloadSize::from_headers(&headers)?;
//! let mut reader = BodyReader::new(&mut source, payload_size, &config);
//!
//! let mut buf = [0u8; 4096];
//! loop {
//!     let outcome = reader.read(&mut buf).await?;
//!     info!(len = outcome.read, "receiving body bytes");
//!     if outcome.complete {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`source`]: the buffered byte and line source readers pull from
//! - [`reader`]: the [`reader::BodyRead`] trait and the body readers
//! - [`protocol`]: framing detection, read outcomes and errors
//! - [`config`]: limits applied while decoding
//!
//! # Error Handling
//!
//! Every failure is a [`protocol::BodyError`]. Transport errors are carried
//! unchanged, framing violations (a body shorter than declared, a malformed
//! chunk size line) fail loudly instead of truncating the body. Any error
//! terminates the reader.
//!
//! # Limitations
//!
//! - Chunk extensions are ignored
//! - Trailer fields are consumed but not exposed

pub mod config;
pub mod protocol;
pub mod reader;
pub mod source;

pub use config::BodyConfig;

mod utils;
pub(crate) use utils::ensure;
