//! Error types for wire format operations.

use std::fmt;

use thiserror::Error;

use crate::header::MessageTag;

/// Result type for wire format operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for frames and message bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Frame is too small to contain the required header.
    #[error("frame too small: {actual} bytes, need at least {required}")]
    FrameTooSmall { actual: usize, required: usize },

    /// Invalid magic number in frame header.
    #[error("invalid magic number: 0x{found:08X}")]
    InvalidMagic { found: u32 },

    /// Unsupported wire version.
    #[error("unsupported wire version: {found}")]
    UnsupportedVersion { found: u16 },

    /// Unknown message tag encountered.
    #[error("unknown message tag: {tag}")]
    UnknownTag { tag: u8 },

    /// Reserved header byte was not zero.
    #[error("reserved header byte must be zero, found 0x{found:02X}")]
    ReservedNonZero { found: u8 },

    /// Payload length mismatch.
    #[error("payload length mismatch: header {header_len} bytes but {actual_len} available")]
    PayloadLengthMismatch { header_len: u32, actual_len: usize },

    /// A frame carried a different message than the caller asked for.
    #[error("expected {expected} message, found {found}")]
    UnexpectedTag {
        expected: MessageTag,
        found: MessageTag,
    },

    /// Limits exceeded.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Message body had bytes left over after the last field.
    #[error("{tag} body has {remaining} trailing bytes")]
    TrailingBytes { tag: MessageTag, remaining: usize },

    /// Field-level decode failure inside a message body.
    #[error("field error: {0}")]
    Field(#[from] fields::FieldError),
}

/// Specific wire limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FrameBytes,
    BlockCount,
    StringBytes,
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("buffer too small: need {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    #[error("field error: {0}")]
    Field(#[from] fields::FieldError),
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrameBytes => "frame bytes",
            Self::BlockCount => "block count",
            Self::StringBytes => "string bytes",
        };
        write!(f, "{name}")
    }
}
