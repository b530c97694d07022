//! Error types for field-level encoding and decoding.

use thiserror::Error;

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur while reading or writing message fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A varint ran past five bytes or overflowed 32 bits.
    #[error("invalid varint")]
    InvalidVarint,

    /// A boolean byte held something other than 0 or 1.
    #[error("invalid bool byte 0x{value:02X}")]
    InvalidBool {
        /// The raw byte that was read.
        value: u8,
    },

    /// A string field was not valid UTF-8.
    #[error("string field is not valid utf-8")]
    InvalidUtf8,

    /// A string length prefix exceeded the caller's bound.
    #[error("string of {len} bytes exceeds maximum of {max}")]
    StringTooLong {
        /// Declared length in bytes.
        len: usize,
        /// Maximum allowed length in bytes.
        max: usize,
    },

    /// A length does not fit in the varint prefix.
    #[error("length overflow: {length}")]
    LengthOverflow {
        /// The offending length.
        length: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = FieldError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("8 bytes"), "should mention requested bytes");
        assert!(msg.contains("3 bytes"), "should mention available bytes");
    }

    #[test]
    fn error_display_invalid_bool() {
        let err = FieldError::InvalidBool { value: 0x7F };
        assert!(err.to_string().contains("7F"));
    }

    #[test]
    fn error_display_string_too_long() {
        let err = FieldError::StringTooLong { len: 300, max: 255 };
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("255"));
    }

    #[test]
    fn error_equality() {
        let err1 = FieldError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let err2 = FieldError::UnexpectedEof {
            requested: 8,
            available: 4,
        };
        assert_eq!(err1.clone(), err1);
        assert_ne!(err1, err2);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<FieldError>();
    }
}
