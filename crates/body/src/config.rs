//! Limits applied while decoding message bodies.

/// Default capacity of the read buffer wrapped around the transport
pub const DEFAULT_READ_BUFFER_CAPACITY: usize = 8 * 1024;

/// Default upper bound of a chunk-size or trailer line, counting a trailing CR but not the LF
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4 * 1024;

/// Default upper bound of a single decoded chunk
pub const DEFAULT_MAX_CHUNK_SIZE: u64 = 16 * 1024 * 1024;

/// Default upper bound of trailer fields skipped after the last chunk
pub const DEFAULT_MAX_TRAILER_FIELDS: usize = 64;

/// Configuration of the buffered source and the body readers.
///
/// # Example
///
/// ```
/// use micro_body::BodyConfig;
///
/// let config = BodyConfig::default().with_max_chunk_size(1024 * 1024).with_max_line_length(256);
/// assert_eq!(config.max_chunk_size(), 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyConfig {
    read_buffer_capacity: usize,
    max_line_length: usize,
    max_chunk_size: u64,
    max_trailer_fields: usize,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            read_buffer_capacity: DEFAULT_READ_BUFFER_CAPACITY,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            max_trailer_fields: DEFAULT_MAX_TRAILER_FIELDS,
        }
    }
}

impl BodyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_read_buffer_capacity(mut self, capacity: usize) -> Self {
        self.read_buffer_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    #[must_use]
    pub fn with_max_chunk_size(mut self, max_chunk_size: u64) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }

    #[must_use]
    pub fn with_max_trailer_fields(mut self, max_trailer_fields: usize) -> Self {
        self.max_trailer_fields = max_trailer_fields;
        self
    }

    pub fn read_buffer_capacity(&self) -> usize {
        self.read_buffer_capacity
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    pub fn max_chunk_size(&self) -> u64 {
        self.max_chunk_size
    }

    pub fn max_trailer_fields(&self) -> usize {
        self.max_trailer_fields
    }
}
