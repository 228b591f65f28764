#[derive(Debug, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    payload: TestPayload,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, payload: TestPayload) -> Self {
        Self { name, group, payload }
    }

    pub fn small(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Small, payload)
    }

    pub fn normal(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Normal, payload)
    }

    pub fn large(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Large, payload)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn payload(&self) -> &TestPayload {
        &self.payload
    }
}

/// A message body together with its encoding on the wire
#[derive(Debug, Clone)]
pub struct TestPayload {
    body_len: usize,
    wire: Vec<u8>,
}

impl TestPayload {
    /// A body sent with Content-Length framing
    pub fn fixed(body_len: usize) -> Self {
        Self { body_len, wire: body(body_len) }
    }

    /// A body split into chunks of `chunk_size` bytes
    pub fn chunked(body_len: usize, chunk_size: usize) -> Self {
        let body = body(body_len);
        let mut wire = Vec::with_capacity(body_len + body_len / chunk_size.max(1) * 8 + 8);
        for chunk in body.chunks(chunk_size.max(1)) {
            wire.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
            wire.extend_from_slice(chunk);
            wire.extend_from_slice(b"\r\n");
        }
        wire.extend_from_slice(b"0\r\n\r\n");
        Self { body_len, wire }
    }

    pub fn body_len(&self) -> usize {
        self.body_len
    }

    pub fn wire(&self) -> &[u8] {
        &self.wire
    }
}

fn body(len: usize) -> Vec<u8> {
    (b'a'..=b'z').cycle().take(len).collect()
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}
