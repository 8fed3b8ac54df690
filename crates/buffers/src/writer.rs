//! Auto-growing binary buffer writer.

use crate::BufferError;

/// Writes big-endian binary data into an owned, growing buffer.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    pub uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Returns the written bytes and leaves the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    pub fn i8(&mut self, val: i8) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    pub fn i16(&mut self, val: i16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes the IEEE-754 bits of `val` unchanged.
    pub fn f32(&mut self, val: f32) {
        self.u32(val.to_bits());
    }

    /// Writes the IEEE-754 bits of `val` unchanged.
    pub fn f64(&mut self, val: f64) {
        self.u64(val.to_bits());
    }

    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }

    /// Writes `data` preceded by its length as a big-endian `u16`.
    pub fn u16_prefixed(&mut self, data: &[u8]) -> Result<(), BufferError> {
        let len = u16::try_from(data.len()).map_err(|_| BufferError::Overflow(data.len()))?;
        self.u16(len);
        self.buf(data);
        Ok(())
    }
}
