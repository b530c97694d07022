//! Frame header types and constants.

use std::fmt;

use crate::error::DecodeError;

/// Magic number identifying world map frames.
///
/// This value is fixed and must never change across versions.
pub const MAGIC: u32 = 0x504D_4D57; // "WMMP" in ASCII

/// Current wire format version.
pub const VERSION: u16 = 1;

/// Header size in bytes (12 total).
pub const HEADER_SIZE: usize = 4 + 2 + 1 + 1 + 4;

/// Message tags carried in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[repr(u8)]
pub enum MessageTag {
    MapItemRequest = 1,
    MapNameRequest = 2,
    MapBlockRequest = 3,
    MapBlockReply = 4,
    MapItemReply = 5,
}

impl MessageTag {
    /// Parses a message tag from a raw byte.
    pub const fn parse(tag: u8) -> Result<Self, DecodeError> {
        match tag {
            1 => Ok(Self::MapItemRequest),
            2 => Ok(Self::MapNameRequest),
            3 => Ok(Self::MapBlockRequest),
            4 => Ok(Self::MapBlockReply),
            5 => Ok(Self::MapItemReply),
            _ => Err(DecodeError::UnknownTag { tag }),
        }
    }

    /// Returns `true` for messages a client sends rather than receives.
    #[must_use]
    pub const fn is_request(self) -> bool {
        matches!(
            self,
            Self::MapItemRequest | Self::MapNameRequest | Self::MapBlockRequest
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MapItemRequest => "MapItemRequest",
            Self::MapNameRequest => "MapNameRequest",
            Self::MapBlockRequest => "MapBlockRequest",
            Self::MapBlockReply => "MapBlockReply",
            Self::MapItemReply => "MapItemReply",
        }
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frame header.
///
/// This struct represents the header fields *after* the magic number.
/// The magic number is validated separately during decoding and is not
/// stored in this struct. The reserved byte is always written as zero.
///
/// See `WIRE_FORMAT.md` for the complete layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Wire format version.
    pub version: u16,
    /// Message carried by this frame.
    pub tag: MessageTag,
    /// Payload length in bytes.
    pub payload_len: u32,
}

impl FrameHeader {
    /// Creates a current-version header for `tag`.
    #[must_use]
    pub const fn new(tag: MessageTag, payload_len: u32) -> Self {
        Self {
            version: VERSION,
            tag,
            payload_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_spells_wmmp() {
        assert_eq!(&MAGIC.to_be_bytes(), b"PMMW");
        assert_eq!(&MAGIC.to_le_bytes(), b"WMMP");
    }

    #[test]
    fn tag_parse_all_known() {
        for raw in 1u8..=5 {
            let tag = MessageTag::parse(raw).unwrap();
            assert_eq!(tag as u8, raw);
        }
    }

    #[test]
    fn tag_parse_unknown() {
        assert_eq!(
            MessageTag::parse(0).unwrap_err(),
            DecodeError::UnknownTag { tag: 0 }
        );
        assert!(MessageTag::parse(6).is_err());
    }

    #[test]
    fn request_tags() {
        assert!(MessageTag::MapItemRequest.is_request());
        assert!(MessageTag::MapNameRequest.is_request());
        assert!(MessageTag::MapBlockRequest.is_request());
        assert!(!MessageTag::MapBlockReply.is_request());
        assert!(!MessageTag::MapItemReply.is_request());
    }

    #[test]
    fn tag_display_uses_name() {
        assert_eq!(MessageTag::MapBlockReply.to_string(), "MapBlockReply");
    }

    #[test]
    fn header_new_uses_current_version() {
        let header = FrameHeader::new(MessageTag::MapNameRequest, 9);
        assert_eq!(header.version, VERSION);
        assert_eq!(header.payload_len, 9);
    }
}
