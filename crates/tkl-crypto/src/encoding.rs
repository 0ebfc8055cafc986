/// Unambiguous byte encoding for hash inputs.
///
/// Integers are fixed-width little-endian; byte strings and text carry a
/// `u64` little-endian length prefix. Two different field sequences can
/// therefore never encode to the same bytes, no matter what the fields
/// contain.
#[derive(Debug, Default, Clone)]
pub struct CanonicalEncoder {
    buf: Vec<u8>,
}

impl CanonicalEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single tag byte, used to discriminate variants.
    pub fn tag(mut self, tag: u8) -> Self {
        self.buf.push(tag);
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Raw bytes behind a `u64` length prefix. `usize` is never wider than
    /// 64 bits, so every slice length is written exactly.
    pub fn bytes(self, data: &[u8]) -> Self {
        let mut this = self.u64(data.len() as u64);
        this.buf.extend_from_slice(data);
        this
    }

    /// Length-prefixed UTF-8 text.
    pub fn str(self, text: &str) -> Self {
        self.bytes(text.as_bytes())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
