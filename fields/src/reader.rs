//! Bounded reader for byte-aligned message fields.

use crate::error::{FieldError, FieldResult};

/// A reader over a message body.
///
/// Every read is bounds-checked and returns an error on failure.
/// The reader never panics on malformed input.
#[derive(Debug)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    /// Creates a new `FieldReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> FieldResult<u8> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self) -> FieldResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self) -> FieldResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn read_u64(&mut self) -> FieldResult<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads a little-endian `i32`.
    pub fn read_i32(&mut self) -> FieldResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a one-byte boolean. Only 0 and 1 are accepted.
    pub fn read_bool(&mut self) -> FieldResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(FieldError::InvalidBool { value }),
        }
    }

    /// Reads a varint `u32` (at most five bytes).
    ///
    /// The fifth byte may only carry the top four bits of the value.
    pub fn read_varu32(&mut self) -> FieldResult<u32> {
        let mut result = 0u32;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            if shift == 28 && byte > 0x0F {
                return Err(FieldError::InvalidVarint);
            }
            result |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(FieldError::InvalidVarint)
    }

    /// Reads a length-prefixed UTF-8 string of at most `max_len` bytes.
    ///
    /// The length is checked against `max_len` before any bytes are consumed.
    pub fn read_str(&mut self, max_len: usize) -> FieldResult<&'a str> {
        let len = self.read_varu32()? as usize;
        if len > max_len {
            return Err(FieldError::StringTooLong { len, max: max_len });
        }
        let bytes = self.read_slice(len)?;
        std::str::from_utf8(bytes).map_err(|_| FieldError::InvalidUtf8)
    }

    /// Reads exactly `N` raw bytes.
    pub fn read_array<const N: usize>(&mut self) -> FieldResult<[u8; N]> {
        let bytes = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_slice(&mut self, len: usize) -> FieldResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(FieldError::UnexpectedEof {
                requested: len,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = FieldReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = FieldReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(result, Err(FieldError::UnexpectedEof { .. })));
    }

    #[test]
    fn read_u32_little_endian() {
        let mut reader = FieldReader::new(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_i32_negative() {
        let bytes = (-5i32).to_le_bytes();
        let mut reader = FieldReader::new(&bytes);
        assert_eq!(reader.read_i32().unwrap(), -5);
    }

    #[test]
    fn read_u64_partial_fails_without_consuming() {
        let mut reader = FieldReader::new(&[1, 2, 3]);
        let err = reader.read_u64().unwrap_err();
        assert_eq!(
            err,
            FieldError::UnexpectedEof {
                requested: 8,
                available: 3
            }
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_bool_rejects_other_bytes() {
        let mut reader = FieldReader::new(&[1, 0, 2]);
        assert!(reader.read_bool().unwrap());
        assert!(!reader.read_bool().unwrap());
        assert_eq!(
            reader.read_bool().unwrap_err(),
            FieldError::InvalidBool { value: 2 }
        );
    }

    #[test]
    fn read_varu32() {
        let mut reader = FieldReader::new(&[0xAC, 0x02]);
        assert_eq!(reader.read_varu32().unwrap(), 300);
    }

    #[test]
    fn read_varu32_invalid() {
        let mut reader = FieldReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
        let err = reader.read_varu32().unwrap_err();
        assert!(matches!(err, FieldError::InvalidVarint));
    }

    #[test]
    fn read_varu32_max() {
        let mut reader = FieldReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert_eq!(reader.read_varu32().unwrap(), u32::MAX);
    }

    #[test]
    fn read_varu32_rejects_overflowing_fifth_byte() {
        let mut reader = FieldReader::new(&[0x81, 0x80, 0x80, 0x80, 0x10]);
        assert_eq!(reader.read_varu32().unwrap_err(), FieldError::InvalidVarint);

        let mut reader = FieldReader::new(&[0x81, 0x80, 0x80, 0x80, 0x70]);
        assert_eq!(reader.read_varu32().unwrap_err(), FieldError::InvalidVarint);
    }

    #[test]
    fn read_str() {
        let mut reader = FieldReader::new(&[5, b'A', b'l', b'p', b'h', b'a']);
        assert_eq!(reader.read_str(255).unwrap(), "Alpha");
        assert!(reader.is_empty());
    }

    #[test]
    fn read_str_over_limit() {
        let mut reader = FieldReader::new(&[5, b'A', b'l', b'p', b'h', b'a']);
        let err = reader.read_str(4).unwrap_err();
        assert_eq!(err, FieldError::StringTooLong { len: 5, max: 4 });
    }

    #[test]
    fn read_str_invalid_utf8() {
        let mut reader = FieldReader::new(&[2, 0xC3, 0x28]);
        assert_eq!(reader.read_str(255).unwrap_err(), FieldError::InvalidUtf8);
    }

    #[test]
    fn read_str_truncated() {
        let mut reader = FieldReader::new(&[10, b'a', b'b']);
        assert!(matches!(
            reader.read_str(255),
            Err(FieldError::UnexpectedEof {
                requested: 10,
                available: 2
            })
        ));
    }

    #[test]
    fn read_array_sixteen() {
        let bytes: Vec<u8> = (0u8..16).collect();
        let mut reader = FieldReader::new(&bytes);
        let id = reader.read_array::<16>().unwrap();
        assert_eq!(id[15], 15);
        assert!(reader.is_empty());
    }
}
