//! Frame decoding and encoding.

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::header::{FrameHeader, MessageTag, HEADER_SIZE, MAGIC, VERSION};
use crate::limits::Limits;

/// A decoded frame: header plus a borrowed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub header: FrameHeader,
    pub payload: &'a [u8],
}

impl Frame<'_> {
    #[must_use]
    pub const fn tag(&self) -> MessageTag {
        self.header.tag
    }
}

/// Decodes a frame into header + payload slice.
pub fn decode_frame<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<Frame<'a>> {
    if buf.len() < HEADER_SIZE {
        return Err(DecodeError::FrameTooSmall {
            actual: buf.len(),
            required: HEADER_SIZE,
        });
    }
    if buf.len() > limits.max_frame_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: limits.max_frame_bytes,
            actual: buf.len(),
        });
    }

    let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic != MAGIC {
        return Err(DecodeError::InvalidMagic { found: magic });
    }

    let version = u16::from_le_bytes([buf[4], buf[5]]);
    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion { found: version });
    }

    let tag = MessageTag::parse(buf[6])?;
    if buf[7] != 0 {
        return Err(DecodeError::ReservedNonZero { found: buf[7] });
    }

    let payload_len = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    let actual_payload_len = buf.len() - HEADER_SIZE;
    if payload_len as usize != actual_payload_len {
        return Err(DecodeError::PayloadLengthMismatch {
            header_len: payload_len,
            actual_len: actual_payload_len,
        });
    }

    Ok(Frame {
        header: FrameHeader {
            version,
            tag,
            payload_len,
        },
        payload: &buf[HEADER_SIZE..],
    })
}

/// Encodes a frame header into the provided output buffer.
pub fn encode_header(header: &FrameHeader, out: &mut [u8]) -> Result<usize, EncodeError> {
    if out.len() < HEADER_SIZE {
        return Err(EncodeError::BufferTooSmall {
            needed: HEADER_SIZE,
            available: out.len(),
        });
    }

    out[0..4].copy_from_slice(&MAGIC.to_le_bytes());
    out[4..6].copy_from_slice(&header.version.to_le_bytes());
    out[6] = header.tag as u8;
    out[7] = 0;
    out[8..12].copy_from_slice(&header.payload_len.to_le_bytes());

    Ok(HEADER_SIZE)
}

/// Wraps `payload` in a current-version frame for `tag`.
pub fn encode_frame(
    tag: MessageTag,
    payload: &[u8],
    limits: &Limits,
) -> Result<Vec<u8>, EncodeError> {
    let total = HEADER_SIZE + payload.len();
    if total > limits.max_frame_bytes {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: limits.max_frame_bytes,
            actual: total,
        });
    }
    let payload_len = u32::try_from(payload.len()).map_err(|_| EncodeError::LimitsExceeded {
        kind: LimitKind::FrameBytes,
        limit: u32::MAX as usize,
        actual: payload.len(),
    })?;

    let mut out = vec![0u8; total];
    encode_header(&FrameHeader::new(tag, payload_len), &mut out)?;
    out[HEADER_SIZE..].copy_from_slice(payload);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header(tag: u8, reserved: u8, payload_len: u32) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        buf[4..6].copy_from_slice(&VERSION.to_le_bytes());
        buf[6] = tag;
        buf[7] = reserved;
        buf[8..12].copy_from_slice(&payload_len.to_le_bytes());
        buf
    }

    #[test]
    fn encode_header_roundtrip_empty_payload() {
        let header = FrameHeader::new(MessageTag::MapBlockReply, 0);
        let mut buf = [0u8; HEADER_SIZE];
        let written = encode_header(&header, &mut buf).unwrap();
        assert_eq!(written, HEADER_SIZE);

        let frame = decode_frame(&buf, &Limits::for_testing()).unwrap();
        assert_eq!(frame.header, header);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn encode_header_buffer_too_small() {
        let header = FrameHeader::new(MessageTag::MapBlockReply, 0);
        let mut buf = [0u8; 4];
        let err = encode_header(&header, &mut buf).unwrap_err();
        assert!(matches!(err, EncodeError::BufferTooSmall { needed: 12, .. }));
    }

    #[test]
    fn encode_frame_carries_payload() {
        let frame_bytes =
            encode_frame(MessageTag::MapNameRequest, &[1, 2, 3], &Limits::for_testing()).unwrap();
        let frame = decode_frame(&frame_bytes, &Limits::for_testing()).unwrap();
        assert_eq!(frame.tag(), MessageTag::MapNameRequest);
        assert_eq!(frame.payload, &[1, 2, 3]);
    }

    #[test]
    fn encode_frame_enforces_limit() {
        let limits = Limits {
            max_frame_bytes: HEADER_SIZE + 2,
            ..Limits::for_testing()
        };
        let err = encode_frame(MessageTag::MapNameRequest, &[1, 2, 3], &limits).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::LimitsExceeded {
                kind: LimitKind::FrameBytes,
                ..
            }
        ));
    }

    #[test]
    fn decode_rejects_short_frame() {
        let err = decode_frame(&[0u8; 5], &Limits::for_testing()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FrameTooSmall {
                actual: 5,
                required: HEADER_SIZE
            }
        );
    }

    #[test]
    fn decode_rejects_invalid_magic() {
        let mut buf = raw_header(4, 0, 0);
        buf[0..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        let err = decode_frame(&buf, &Limits::for_testing()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidMagic { .. }));
    }

    #[test]
    fn decode_rejects_unsupported_version() {
        let mut buf = raw_header(4, 0, 0);
        buf[4..6].copy_from_slice(&0u16.to_le_bytes());
        let err = decode_frame(&buf, &Limits::for_testing()).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVersion { found: 0 }));
    }

    #[test]
    fn decode_rejects_unknown_tag() {
        let buf = raw_header(99, 0, 0);
        let err = decode_frame(&buf, &Limits::for_testing()).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTag { tag: 99 });
    }

    #[test]
    fn decode_rejects_reserved_byte() {
        let buf = raw_header(4, 1, 0);
        let err = decode_frame(&buf, &Limits::for_testing()).unwrap_err();
        assert_eq!(err, DecodeError::ReservedNonZero { found: 1 });
    }

    #[test]
    fn decode_payload_length_mismatch() {
        let buf = raw_header(4, 0, 10);
        let err = decode_frame(&buf, &Limits::for_testing()).unwrap_err();
        assert!(matches!(err, DecodeError::PayloadLengthMismatch { .. }));
    }

    #[test]
    fn decode_payload_length_mismatch_with_extra_bytes() {
        let mut buf = raw_header(4, 0, 0).to_vec();
        buf.extend_from_slice(&[0, 0, 0, 0]);
        let err = decode_frame(&buf, &Limits::for_testing()).unwrap_err();
        assert!(matches!(err, DecodeError::PayloadLengthMismatch { .. }));
    }

    #[test]
    fn decode_enforces_frame_limit() {
        let mut buf = raw_header(4, 0, 8).to_vec();
        buf.extend_from_slice(&[0u8; 8]);
        let limits = Limits {
            max_frame_bytes: HEADER_SIZE + 4,
            ..Limits::for_testing()
        };
        let err = decode_frame(&buf, &limits).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LimitsExceeded {
                kind: LimitKind::FrameBytes,
                ..
            }
        ));
    }
}
