//! Frame layout and message codecs for world map region lookups.
//!
//! This crate handles the binary wire format: frame headers, the five
//! message layouts and limit enforcement. It does not know what a client
//! does with a reply, only how the reply is laid out.
//!
//! # Design Principles
//!
//! - **Stable wire format** - The format is versioned and changes are documented.
//! - **Bounded decoding** - Block counts and string lengths are validated against limits before iteration.
//! - **No correlation logic** - Matching replies to requests lives in the `resolver` crate.
//!
//! See `WIRE_FORMAT.md` for the complete layout.

mod error;
mod frame;
mod header;
mod limits;
mod messages;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use frame::{decode_frame, encode_frame, encode_header, Frame};
pub use header::{FrameHeader, MessageTag, HEADER_SIZE, MAGIC, VERSION};
pub use limits::Limits;
pub use messages::{
    decode_message, AgentData, MapBlockData, MapBlockReply, MapBlockRequest, MapItemData,
    MapItemReply, MapItemRequest, MapNameRequest, Message, ReplyAgentData, WireMessage,
    LAYER_FLAG, NONEXISTENT_FLAG,
};
pub use uuid::Uuid;
