//! Message layouts for world map requests and replies.
//!
//! Every message is a fixed sequence of blocks. Repeated blocks are
//! prefixed with a varint count that is checked against [`Limits`]
//! before iteration.

use fields::{FieldError, FieldReader, FieldWriter};

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::frame::{decode_frame, encode_frame, Frame};
use crate::header::MessageTag;
use uuid::Uuid;
use crate::limits::Limits;

/// The only map layer this client ever requests, and the only one a
/// block reply may carry.
pub const LAYER_FLAG: u32 = 2;

/// Request flag asking the simulator to also report empty grid cells.
pub const NONEXISTENT_FLAG: u32 = 0x10000;

/// A message with a fixed tag and body layout.
pub trait WireMessage: Sized {
    /// Tag written into the frame header.
    const TAG: MessageTag;

    /// Writes the message body (no frame header).
    fn encode_body(&self, writer: &mut FieldWriter, limits: &Limits) -> Result<(), EncodeError>;

    /// Reads the message body (no frame header).
    fn decode_body(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<Self>;

    /// Encodes the message into a complete frame.
    fn encode(&self, limits: &Limits) -> Result<Vec<u8>, EncodeError> {
        let mut writer = FieldWriter::new();
        self.encode_body(&mut writer, limits)?;
        encode_frame(Self::TAG, &writer.finish(), limits)
    }

    /// Decodes a complete frame, requiring it to carry this message.
    fn decode(buf: &[u8], limits: &Limits) -> WireResult<Self> {
        let frame = decode_frame(buf, limits)?;
        Self::from_frame(&frame, limits)
    }

    /// Decodes the body of an already-validated frame.
    fn from_frame(frame: &Frame<'_>, limits: &Limits) -> WireResult<Self> {
        if frame.tag() != Self::TAG {
            return Err(DecodeError::UnexpectedTag {
                expected: Self::TAG,
                found: frame.tag(),
            });
        }
        let mut reader = FieldReader::new(frame.payload);
        let message = Self::decode_body(&mut reader, limits)?;
        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes {
                tag: Self::TAG,
                remaining: reader.remaining(),
            });
        }
        Ok(message)
    }
}

/// Agent block prefixed to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentData {
    pub agent_id: Uuid,
    pub session_id: Uuid,
    pub flags: u32,
    /// Filled in by the simulator; clients send 0.
    pub estate_id: u32,
    /// Filled in by the simulator; clients send `false`.
    pub godlike: bool,
}

impl AgentData {
    /// Builds the agent block a client sends with the given request flags.
    #[must_use]
    pub const fn request(agent_id: Uuid, session_id: Uuid, flags: u32) -> Self {
        Self {
            agent_id,
            session_id,
            flags,
            estate_id: 0,
            godlike: false,
        }
    }

    fn encode(&self, writer: &mut FieldWriter) {
        write_uuid(writer, self.agent_id);
        write_uuid(writer, self.session_id);
        writer.write_u32(self.flags);
        writer.write_u32(self.estate_id);
        writer.write_bool(self.godlike);
    }

    fn decode(reader: &mut FieldReader<'_>) -> WireResult<Self> {
        Ok(Self {
            agent_id: read_uuid(reader)?,
            session_id: read_uuid(reader)?,
            flags: reader.read_u32()?,
            estate_id: reader.read_u32()?,
            godlike: reader.read_bool()?,
        })
    }
}

/// Agent block carried by replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplyAgentData {
    pub agent_id: Uuid,
    pub flags: u32,
}

impl ReplyAgentData {
    fn encode(self, writer: &mut FieldWriter) {
        write_uuid(writer, self.agent_id);
        writer.write_u32(self.flags);
    }

    fn decode(reader: &mut FieldReader<'_>) -> WireResult<Self> {
        Ok(Self {
            agent_id: read_uuid(reader)?,
            flags: reader.read_u32()?,
        })
    }
}

/// Points-of-interest query for one item layer of one region.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapItemRequest {
    pub agent: AgentData,
    pub item_type: u32,
    /// Zero lets the simulator use the agent's current region.
    pub region_handle: u64,
}

impl WireMessage for MapItemRequest {
    const TAG: MessageTag = MessageTag::MapItemRequest;

    fn encode_body(&self, writer: &mut FieldWriter, _limits: &Limits) -> Result<(), EncodeError> {
        self.agent.encode(writer);
        writer.write_u32(self.item_type);
        writer.write_u64(self.region_handle);
        Ok(())
    }

    fn decode_body(reader: &mut FieldReader<'_>, _limits: &Limits) -> WireResult<Self> {
        Ok(Self {
            agent: AgentData::decode(reader)?,
            item_type: reader.read_u32()?,
            region_handle: reader.read_u64()?,
        })
    }
}

/// Region lookup by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapNameRequest {
    pub agent: AgentData,
    pub name: String,
}

impl WireMessage for MapNameRequest {
    const TAG: MessageTag = MessageTag::MapNameRequest;

    fn encode_body(&self, writer: &mut FieldWriter, limits: &Limits) -> Result<(), EncodeError> {
        self.agent.encode(writer);
        write_string(writer, &self.name, limits)
    }

    fn decode_body(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<Self> {
        Ok(Self {
            agent: AgentData::decode(reader)?,
            name: read_string(reader, limits)?,
        })
    }
}

/// Region lookup by inclusive grid bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBlockRequest {
    pub agent: AgentData,
    pub min_x: u16,
    pub min_y: u16,
    pub max_x: u16,
    pub max_y: u16,
}

impl MapBlockRequest {
    /// Request flags for a bounding-box query.
    #[must_use]
    pub const fn flags_for(include_nonexistent: bool) -> u32 {
        LAYER_FLAG | if include_nonexistent { NONEXISTENT_FLAG } else { 0 }
    }

    /// Returns `true` if empty grid cells were asked for.
    #[must_use]
    pub const fn includes_nonexistent(&self) -> bool {
        self.agent.flags & NONEXISTENT_FLAG != 0
    }

    /// Returns `true` if the box covers exactly one grid cell.
    #[must_use]
    pub const fn is_single_cell(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }
}

impl WireMessage for MapBlockRequest {
    const TAG: MessageTag = MessageTag::MapBlockRequest;

    fn encode_body(&self, writer: &mut FieldWriter, _limits: &Limits) -> Result<(), EncodeError> {
        self.agent.encode(writer);
        writer.write_u16(self.min_x);
        writer.write_u16(self.min_y);
        writer.write_u16(self.max_x);
        writer.write_u16(self.max_y);
        Ok(())
    }

    fn decode_body(reader: &mut FieldReader<'_>, _limits: &Limits) -> WireResult<Self> {
        Ok(Self {
            agent: AgentData::decode(reader)?,
            min_x: reader.read_u16()?,
            min_y: reader.read_u16()?,
            max_x: reader.read_u16()?,
            max_y: reader.read_u16()?,
        })
    }
}

/// One region in a block reply. Coordinates are grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBlockData {
    pub x: u16,
    pub y: u16,
    pub name: String,
    pub access: u8,
    pub region_flags: u32,
    pub image_id: Uuid,
}

impl MapBlockData {
    fn encode(&self, writer: &mut FieldWriter, limits: &Limits) -> Result<(), EncodeError> {
        writer.write_u16(self.x);
        writer.write_u16(self.y);
        write_string(writer, &self.name, limits)?;
        writer.write_u8(self.access);
        writer.write_u32(self.region_flags);
        write_uuid(writer, self.image_id);
        Ok(())
    }

    fn decode(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<Self> {
        Ok(Self {
            x: reader.read_u16()?,
            y: reader.read_u16()?,
            name: read_string(reader, limits)?,
            access: reader.read_u8()?,
            region_flags: reader.read_u32()?,
            image_id: read_uuid(reader)?,
        })
    }
}

/// Batched region reply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBlockReply {
    pub agent: ReplyAgentData,
    pub blocks: Vec<MapBlockData>,
}

impl WireMessage for MapBlockReply {
    const TAG: MessageTag = MessageTag::MapBlockReply;

    fn encode_body(&self, writer: &mut FieldWriter, limits: &Limits) -> Result<(), EncodeError> {
        self.agent.encode(writer);
        write_count(writer, self.blocks.len(), limits)?;
        for block in &self.blocks {
            block.encode(writer, limits)?;
        }
        Ok(())
    }

    fn decode_body(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<Self> {
        let agent = ReplyAgentData::decode(reader)?;
        let count = read_count(reader, limits)?;
        let mut blocks = Vec::with_capacity(count);
        for _ in 0..count {
            blocks.push(MapBlockData::decode(reader, limits)?);
        }
        Ok(Self { agent, blocks })
    }
}

/// One point of interest in an item reply. Coordinates are world units.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapItemData {
    pub x: u32,
    pub y: u32,
    pub name: String,
    pub id: Uuid,
    pub extra: i32,
    pub extra2: i32,
}

impl MapItemData {
    fn encode(&self, writer: &mut FieldWriter, limits: &Limits) -> Result<(), EncodeError> {
        writer.write_u32(self.x);
        writer.write_u32(self.y);
        write_string(writer, &self.name, limits)?;
        write_uuid(writer, self.id);
        writer.write_i32(self.extra);
        writer.write_i32(self.extra2);
        Ok(())
    }

    fn decode(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<Self> {
        Ok(Self {
            x: reader.read_u32()?,
            y: reader.read_u32()?,
            name: read_string(reader, limits)?,
            id: read_uuid(reader)?,
            extra: reader.read_i32()?,
            extra2: reader.read_i32()?,
        })
    }
}

/// Batched point-of-interest reply. `item_type` applies to every item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapItemReply {
    pub agent: ReplyAgentData,
    pub item_type: u32,
    pub items: Vec<MapItemData>,
}

impl WireMessage for MapItemReply {
    const TAG: MessageTag = MessageTag::MapItemReply;

    fn encode_body(&self, writer: &mut FieldWriter, limits: &Limits) -> Result<(), EncodeError> {
        self.agent.encode(writer);
        writer.write_u32(self.item_type);
        write_count(writer, self.items.len(), limits)?;
        for item in &self.items {
            item.encode(writer, limits)?;
        }
        Ok(())
    }

    fn decode_body(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<Self> {
        let agent = ReplyAgentData::decode(reader)?;
        let item_type = reader.read_u32()?;
        let count = read_count(reader, limits)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(MapItemData::decode(reader, limits)?);
        }
        Ok(Self {
            agent,
            item_type,
            items,
        })
    }
}

/// Any world map message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "message"))]
pub enum Message {
    MapItemRequest(MapItemRequest),
    MapNameRequest(MapNameRequest),
    MapBlockRequest(MapBlockRequest),
    MapBlockReply(MapBlockReply),
    MapItemReply(MapItemReply),
}

impl Message {
    #[must_use]
    pub const fn tag(&self) -> MessageTag {
        match self {
            Self::MapItemRequest(_) => MessageTag::MapItemRequest,
            Self::MapNameRequest(_) => MessageTag::MapNameRequest,
            Self::MapBlockRequest(_) => MessageTag::MapBlockRequest,
            Self::MapBlockReply(_) => MessageTag::MapBlockReply,
            Self::MapItemReply(_) => MessageTag::MapItemReply,
        }
    }

    /// Encodes the message into a complete frame.
    pub fn encode(&self, limits: &Limits) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::MapItemRequest(message) => message.encode(limits),
            Self::MapNameRequest(message) => message.encode(limits),
            Self::MapBlockRequest(message) => message.encode(limits),
            Self::MapBlockReply(message) => message.encode(limits),
            Self::MapItemReply(message) => message.encode(limits),
        }
    }

    /// Decodes the body of a frame according to its tag.
    pub fn from_frame(frame: &Frame<'_>, limits: &Limits) -> WireResult<Self> {
        Ok(match frame.tag() {
            MessageTag::MapItemRequest => {
                Self::MapItemRequest(MapItemRequest::from_frame(frame, limits)?)
            }
            MessageTag::MapNameRequest => {
                Self::MapNameRequest(MapNameRequest::from_frame(frame, limits)?)
            }
            MessageTag::MapBlockRequest => {
                Self::MapBlockRequest(MapBlockRequest::from_frame(frame, limits)?)
            }
            MessageTag::MapBlockReply => {
                Self::MapBlockReply(MapBlockReply::from_frame(frame, limits)?)
            }
            MessageTag::MapItemReply => {
                Self::MapItemReply(MapItemReply::from_frame(frame, limits)?)
            }
        })
    }
}

/// Decodes any world map message from a complete frame.
pub fn decode_message(buf: &[u8], limits: &Limits) -> WireResult<Message> {
    let frame = decode_frame(buf, limits)?;
    Message::from_frame(&frame, limits)
}

fn write_uuid(writer: &mut FieldWriter, id: Uuid) {
    writer.write_bytes(id.as_bytes());
}

fn read_uuid(reader: &mut FieldReader<'_>) -> WireResult<Uuid> {
    Ok(Uuid::from_bytes(reader.read_array()?))
}

fn write_string(writer: &mut FieldWriter, value: &str, limits: &Limits) -> Result<(), EncodeError> {
    if value.len() > limits.max_string_bytes {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::StringBytes,
            limit: limits.max_string_bytes,
            actual: value.len(),
        });
    }
    writer.write_str(value)?;
    Ok(())
}

fn read_string(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<String> {
    match reader.read_str(limits.max_string_bytes) {
        Ok(value) => Ok(value.to_owned()),
        Err(FieldError::StringTooLong { len, max }) => Err(DecodeError::LimitsExceeded {
            kind: LimitKind::StringBytes,
            limit: max,
            actual: len,
        }),
        Err(err) => Err(err.into()),
    }
}

fn write_count(writer: &mut FieldWriter, count: usize, limits: &Limits) -> Result<(), EncodeError> {
    if count > limits.max_blocks {
        return Err(EncodeError::LimitsExceeded {
            kind: LimitKind::BlockCount,
            limit: limits.max_blocks,
            actual: count,
        });
    }
    let count = u32::try_from(count).map_err(|_| FieldError::LengthOverflow { length: count })?;
    writer.write_varu32(count);
    Ok(())
}

fn read_count(reader: &mut FieldReader<'_>, limits: &Limits) -> WireResult<usize> {
    let count = reader.read_varu32()? as usize;
    if count > limits.max_blocks {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::BlockCount,
            limit: limits.max_blocks,
            actual: count,
        });
    }
    Ok(count)
}
