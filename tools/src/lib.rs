//! Inspection and decoding tools for world map frames.
//!
//! - Summarize a frame's header and body without interpreting it
//! - Decode a frame into JSON, including the region or item records a
//!   client would hand to its indices

use anyhow::{Context, Result};
use resolver::{decode_block_reply, decode_item_reply, ItemRecord, RegionRecord, ResolverError};
use serde::Serialize;
use wire::{decode_frame, FrameHeader, Limits, Message, MessageTag};

/// Structural summary of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub header: FrameHeader,
    pub frame_len: usize,
    /// Agent flags for requests and block replies.
    pub flags: u32,
    /// Repeated block count, for replies.
    pub block_count: Option<usize>,
}

/// Decodes the frame header and body and reports their shape.
pub fn inspect_frame(bytes: &[u8], limits: &Limits) -> Result<InspectReport> {
    let frame = decode_frame(bytes, limits).context("decode frame header")?;
    let header = frame.header;
    let message = Message::from_frame(&frame, limits)
        .with_context(|| format!("decode {} body", frame.tag()))?;
    let (flags, block_count) = match &message {
        Message::MapItemRequest(request) => (request.agent.flags, None),
        Message::MapNameRequest(request) => (request.agent.flags, None),
        Message::MapBlockRequest(request) => (request.agent.flags, None),
        Message::MapBlockReply(reply) => (reply.agent.flags, Some(reply.blocks.len())),
        Message::MapItemReply(reply) => (reply.agent.flags, Some(reply.items.len())),
    };
    Ok(InspectReport {
        header,
        frame_len: bytes.len(),
        flags,
        block_count,
    })
}

/// Decoded frame plus the records a client would derive from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodeOutput {
    pub tag: MessageTag,
    pub message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<RegionRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemRecord>>,
    /// Why a client would discard this reply, if it would.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<String>,
}

/// Decodes a frame into structured output.
pub fn decode_frame_json(bytes: &[u8], limits: &Limits) -> Result<DecodeOutput> {
    let message = wire::decode_message(bytes, limits).context("decode frame")?;
    let mut output = DecodeOutput {
        tag: message.tag(),
        message,
        regions: None,
        items: None,
        rejected: None,
    };
    match &output.message {
        Message::MapBlockReply(reply) => match decode_block_reply(reply) {
            Ok(records) => output.regions = Some(records),
            Err(err @ ResolverError::UnexpectedLayer { .. }) => {
                output.rejected = Some(err.to_string());
            }
            Err(err) => return Err(err).context("decode block reply"),
        },
        Message::MapItemReply(reply) => output.items = Some(decode_item_reply(reply)),
        _ => {}
    }
    Ok(output)
}

/// Renders decoded output as indented plain text.
#[must_use]
pub fn format_decode_pretty(output: &DecodeOutput) -> String {
    let mut out = String::new();
    out.push_str(&format!("message: {}\n", output.tag));
    match &output.message {
        Message::MapItemRequest(request) => {
            out.push_str(&format!("  flags: 0x{:08x}\n", request.agent.flags));
            out.push_str(&format!("  item_type: {}\n", request.item_type));
            out.push_str(&format!("  region_handle: 0x{:016x}\n", request.region_handle));
        }
        Message::MapNameRequest(request) => {
            out.push_str(&format!("  flags: 0x{:08x}\n", request.agent.flags));
            out.push_str(&format!("  name: {:?}\n", request.name));
        }
        Message::MapBlockRequest(request) => {
            out.push_str(&format!("  flags: 0x{:08x}\n", request.agent.flags));
            out.push_str(&format!(
                "  box: ({}, {})..=({}, {})\n",
                request.min_x, request.min_y, request.max_x, request.max_y
            ));
        }
        Message::MapBlockReply(reply) => {
            out.push_str(&format!("  flags: 0x{:08x}\n", reply.agent.flags));
        }
        Message::MapItemReply(reply) => {
            out.push_str(&format!("  item_type: {}\n", reply.item_type));
        }
    }
    if let Some(reason) = &output.rejected {
        out.push_str(&format!("  rejected: {reason}\n"));
    }
    if let Some(regions) = &output.regions {
        out.push_str(&format!("  regions: {}\n", regions.len()));
        for region in regions {
            out.push_str(&format!(
                "    {:?} at {} access={} flags=0x{:x} image={}\n",
                region.name,
                region.handle(),
                region.access.raw(),
                region.region_flags,
                region.image_id
            ));
        }
    }
    if let Some(items) = &output.items {
        out.push_str(&format!("  items: {}\n", items.len()));
        for item in items {
            out.push_str(&format!(
                "    {:?} at ({}, {}) id={} extra={} extra2={}\n",
                item.name, item.world_x, item.world_y, item.id, item.extra, item.extra2
            ));
        }
    }
    out
}
