/// The result of a single [`BodyRead::read`](crate::reader::BodyRead::read) call.
///
/// `read` is the number of bytes written into the caller's buffer, `complete`
/// tells whether every framed byte of the body has now been delivered.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub read: usize,
    pub complete: bool,
}

impl ReadOutcome {
    /// More body bytes remain after this read
    #[inline]
    pub fn partial(read: usize) -> Self {
        Self { read, complete: false }
    }

    /// This read delivered the last bytes of the body
    #[inline]
    pub fn complete(read: usize) -> Self {
        Self { read, complete: true }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
