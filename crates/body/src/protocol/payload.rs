use crate::protocol::BodyError;
use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use http::{HeaderMap, HeaderValue};

/// Represents the size information of an HTTP payload.
///
/// This enum is used to determine how the payload should be read:
/// - Known length: Read exact number of bytes
/// - Chunked: Read using chunked transfer encoding
/// - Empty: No payload to read
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Payload with known length in bytes
    Length(u64),
    /// Payload using chunked transfer encoding
    Chunked,
    /// Empty payload (no body)
    Empty,
}

impl PayloadSize {
    #[inline]
    pub fn new_length(length: u64) -> Self {
        PayloadSize::Length(length)
    }

    #[inline]
    pub fn new_chunked() -> Self {
        PayloadSize::Chunked
    }

    #[inline]
    pub fn new_empty() -> Self {
        PayloadSize::Empty
    }

    /// Returns true if the payload uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    /// Returns true if the payload is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }

    /// Returns the declared length, `None` for chunked payloads
    #[inline]
    pub fn length(&self) -> Option<u64> {
        match self {
            PayloadSize::Length(length) => Some(*length),
            PayloadSize::Chunked => None,
            PayloadSize::Empty => Some(0),
        }
    }

    /// Detects the body framing from message headers.
    ///
    /// Selects the framing according to
    /// [RFC 9112 Section 6.3](https://www.rfc-editor.org/rfc/rfc9112.html#name-message-body-length):
    /// - Empty if neither Transfer-Encoding nor Content-Length is present
    /// - Chunked if chunked is the final transfer coding
    /// - Fixed length if only Content-Length is present
    ///
    /// # Errors
    ///
    /// Returns [`BodyError::InvalidContentLength`] if:
    /// - Both Content-Length and Transfer-Encoding headers are present
    /// - Content-Length value is not a valid `u64`
    /// - Several Content-Length values disagree
    pub fn from_headers(headers: &HeaderMap) -> Result<PayloadSize, BodyError> {
        let te_header = headers.get(TRANSFER_ENCODING);
        let mut cl_values = headers.get_all(CONTENT_LENGTH).iter();

        match (te_header, cl_values.next()) {
            (None, None) => Ok(PayloadSize::new_empty()),

            (te_value @ Some(_), None) => {
                if is_chunked(te_value) {
                    Ok(PayloadSize::new_chunked())
                } else {
                    Ok(PayloadSize::new_empty())
                }
            }

            (None, Some(cl_value)) => {
                let length = parse_content_length(cl_value)?;
                for other in cl_values {
                    if parse_content_length(other)? != length {
                        return Err(BodyError::invalid_content_length("multiple content_length values disagree"));
                    }
                }
                Ok(PayloadSize::new_length(length))
            }

            (Some(_), Some(_)) => {
                Err(BodyError::invalid_content_length("transfer_encoding and content_length both present in headers"))
            }
        }
    }
}

fn parse_content_length(value: &HeaderValue) -> Result<u64, BodyError> {
    let cl_str = value.to_str().map_err(|e| BodyError::invalid_content_length(format!("value can't to_str: {e}")))?;

    cl_str.trim().parse::<u64>().map_err(|e| BodyError::invalid_content_length(format!("value {cl_str} is not u64: {e}")))
}

/// Returns true if chunked is the final encoding in the Transfer-Encoding header.
fn is_chunked(header_value: Option<&HeaderValue>) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    if let Some(value) = header_value {
        if let Some(bytes) = value.as_bytes().rsplit(|b| *b == b',').next() {
            return bytes.trim_ascii().eq_ignore_ascii_case(CHUNKED);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for &(name, value) in pairs {
            headers.append(name, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn check_is_chunked() {
        assert!(!is_chunked(None));
        assert!(is_chunked(Some(&HeaderValue::from_static("chunked"))));
        assert!(is_chunked(Some(&HeaderValue::from_static("gzip, chunked"))));
        assert!(is_chunked(Some(&HeaderValue::from_static("gzip, Chunked "))));
        assert!(!is_chunked(Some(&HeaderValue::from_static("chunked, gzip"))));
        assert!(!is_chunked(Some(&HeaderValue::from_static("gzip"))));
    }

    #[test]
    fn no_framing_headers_means_empty() {
        let size = PayloadSize::from_headers(&headers(&[("host", "localhost")])).unwrap();
        assert!(size.is_empty());
        assert_eq!(size.length(), Some(0));
    }

    #[test]
    fn content_length_means_fixed() {
        let size = PayloadSize::from_headers(&headers(&[("content-length", " 42 ")])).unwrap();
        assert_eq!(size, PayloadSize::Length(42));
    }

    #[test]
    fn chunked_transfer_encoding() {
        let size = PayloadSize::from_headers(&headers(&[("transfer-encoding", "gzip, chunked")])).unwrap();
        assert!(size.is_chunked());
        assert_eq!(size.length(), None);
    }

    #[test]
    fn non_chunked_transfer_encoding_means_empty() {
        let size = PayloadSize::from_headers(&headers(&[("transfer-encoding", "gzip")])).unwrap();
        assert!(size.is_empty());
    }

    #[test]
    fn both_headers_rejected() {
        let result = PayloadSize::from_headers(&headers(&[("transfer-encoding", "chunked"), ("content-length", "5")]));
        assert!(matches!(result, Err(BodyError::InvalidContentLength { .. })));
    }

    #[test]
    fn invalid_content_length_rejected() {
        let result = PayloadSize::from_headers(&headers(&[("content-length", "-1")]));
        assert!(matches!(result, Err(BodyError::InvalidContentLength { .. })));
    }

    #[test]
    fn repeated_content_length_must_agree() {
        let same = PayloadSize::from_headers(&headers(&[("content-length", "5"), ("content-length", "5")])).unwrap();
        assert_eq!(same, PayloadSize::Length(5));

        let result = PayloadSize::from_headers(&headers(&[("content-length", "5"), ("content-length", "6")]));
        assert!(matches!(result, Err(BodyError::InvalidContentLength { .. })));
    }
}
