//! Core types shared by the body readers.
//!
//! - [`PayloadSize`]: how a message body is framed, detected from its headers
//! - [`ReadOutcome`]: what a single body read produced
//! - [`BodyError`]: the error taxonomy of body decoding, see [`ErrorKind`]

mod payload;
pub use payload::PayloadSize;

mod outcome;
pub use outcome::ReadOutcome;

mod error;
pub use error::BodyError;
pub use error::ErrorKind;
