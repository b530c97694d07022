//! Writer for byte-aligned message fields.

use crate::error::{FieldError, FieldResult};

/// A writer for message bodies.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer. All integers are little-endian.
#[derive(Debug, Default)]
pub struct FieldWriter {
    bytes: Vec<u8>,
}

impl FieldWriter {
    /// Creates a new empty `FieldWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `FieldWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a boolean as a single 0/1 byte.
    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    /// Writes a varint `u32`.
    pub fn write_varu32(&mut self, mut value: u32) {
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    /// Writes a varint length prefix followed by the UTF-8 bytes of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::LengthOverflow`] if the string is longer than `u32::MAX` bytes.
    pub fn write_str(&mut self, value: &str) -> FieldResult<()> {
        let len = u32::try_from(value.len())
            .map_err(|_| FieldError::LengthOverflow {
                length: value.len(),
            })?;
        self.write_varu32(len);
        self.bytes.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Writes raw bytes with no prefix.
    pub fn write_bytes(&mut self, value: &[u8]) {
        self.bytes.extend_from_slice(value);
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = FieldWriter::new();
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_integers_little_endian() {
        let mut writer = FieldWriter::new();
        writer.write_u16(0xABCD);
        writer.write_u32(0x1234_5678);
        assert_eq!(writer.len(), 6);
        assert_eq!(writer.finish(), vec![0xCD, 0xAB, 0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn write_u64_and_i32() {
        let mut writer = FieldWriter::new();
        writer.write_u64(1);
        writer.write_i32(-1);
        assert_eq!(
            writer.finish(),
            vec![1, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn write_bool_bytes() {
        let mut writer = FieldWriter::new();
        writer.write_bool(true);
        writer.write_bool(false);
        assert_eq!(writer.finish(), vec![1, 0]);
    }

    #[test]
    fn write_varu32_multi_byte() {
        let mut writer = FieldWriter::new();
        writer.write_varu32(300);
        assert_eq!(writer.finish(), vec![0xAC, 0x02]);
    }

    #[test]
    fn write_varu32_zero() {
        let mut writer = FieldWriter::new();
        writer.write_varu32(0);
        assert_eq!(writer.finish(), vec![0]);
    }

    #[test]
    fn write_str_prefixes_length() {
        let mut writer = FieldWriter::new();
        writer.write_str("Beta").unwrap();
        assert_eq!(writer.finish(), vec![4, b'B', b'e', b't', b'a']);
    }

    #[test]
    fn write_empty_str() {
        let mut writer = FieldWriter::new();
        writer.write_str("").unwrap();
        assert_eq!(writer.finish(), vec![0]);
    }

    #[test]
    fn with_capacity() {
        let writer = FieldWriter::with_capacity(100);
        assert_eq!(writer.len(), 0);
    }

    #[test]
    fn finish_into() {
        let mut writer = FieldWriter::new();
        writer.write_u8(0xAB);

        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xAB]);
    }
}
