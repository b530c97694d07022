//! World map client: request encoding and reply dispatch.

use wire::{
    decode_frame, AgentData, Limits, MapBlockReply, MapBlockRequest, MapItemReply,
    MapItemRequest, MapNameRequest, MessageTag, Uuid, WireMessage, LAYER_FLAG,
};

use crate::block_reply::{apply_block_reply, decode_block_reply, BlockReplySummary};
use crate::coords::WorldHandle;
use crate::error::{ResolverError, ResolverResult};
use crate::handlers::{ItemIndex, ReplyHandlers, Transport};
use crate::item_reply::{apply_item_reply, decode_item_reply};
use crate::records::ItemType;
use crate::tracker::{ResolutionTarget, ResolutionTracker, ResolvedRegion};

/// Identity stamped on every outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentContext {
    pub agent_id: Uuid,
    pub session_id: Uuid,
}

impl AgentContext {
    #[must_use]
    pub const fn new(agent_id: Uuid, session_id: Uuid) -> Self {
        Self {
            agent_id,
            session_id,
        }
    }
}

/// What an inbound message turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Regions(BlockReplySummary),
    Items { count: usize },
}

/// Owns the pending resolution and the outbound transport.
///
/// All request and reply handling goes through `&mut self`, so a reply is
/// always applied to completion before the next request can arm the
/// tracker.
#[derive(Debug)]
pub struct WorldMapClient<T> {
    agent: AgentContext,
    transport: T,
    tracker: ResolutionTracker,
    limits: Limits,
}

impl<T: Transport> WorldMapClient<T> {
    /// Creates a client with default wire limits.
    pub fn new(agent: AgentContext, transport: T) -> Self {
        Self::with_limits(agent, transport, Limits::default())
    }

    pub fn with_limits(agent: AgentContext, transport: T, limits: Limits) -> Self {
        Self {
            agent,
            transport,
            tracker: ResolutionTracker::new(),
            limits,
        }
    }

    #[must_use]
    pub const fn agent(&self) -> &AgentContext {
        &self.agent
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub const fn tracker(&self) -> &ResolutionTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Requests the points of interest of one item layer.
    ///
    /// A zero `handle` asks the simulator for the agent's current region.
    pub fn request_items(&mut self, item_type: ItemType, handle: WorldHandle) -> ResolverResult<()> {
        log::debug!("requesting items of type {} in {handle}", item_type.raw());
        let request = MapItemRequest {
            agent: self.agent_data(LAYER_FLAG),
            item_type: item_type.raw(),
            region_handle: handle.raw(),
        };
        self.send(&request)
    }

    /// Looks a region up by name without arming the tracker.
    ///
    /// Names longer than the string limit are rejected, not truncated.
    pub fn request_named_region(&mut self, name: &str) -> ResolverResult<()> {
        let frame = self.encode_named_region(name)?;
        self.transport.send_reliable(frame);
        Ok(())
    }

    /// Looks a region up by name and fires `callback` when a block reply
    /// carries a region with that name, compared case-insensitively.
    ///
    /// Replaces any pending resolution. If the request cannot be encoded the
    /// tracker is left as it was.
    pub fn request_named_region_with_callback<F>(
        &mut self,
        name: &str,
        callback: F,
        url: impl Into<String>,
        teleport: bool,
    ) -> ResolverResult<()>
    where
        F: FnOnce(ResolvedRegion) + 'static,
    {
        let frame = self.encode_named_region(name)?;
        self.tracker.arm(
            ResolutionTarget::Name(name.to_owned()),
            Box::new(callback),
            url.into(),
            teleport,
        );
        self.transport.send_reliable(frame);
        Ok(())
    }

    /// Looks a region up by handle and fires `callback` when a block reply
    /// carries the region at that handle.
    ///
    /// The handle is reduced to a single grid cell and requested with
    /// nonexistent regions included, so an empty cell still answers.
    pub fn request_handle_region_with_callback<F>(
        &mut self,
        handle: WorldHandle,
        callback: F,
        url: impl Into<String>,
        teleport: bool,
    ) -> ResolverResult<()>
    where
        F: FnOnce(ResolvedRegion) + 'static,
    {
        let (grid_x, grid_y) = handle.grid();
        let frame = self.encode_block(grid_x, grid_y, grid_x, grid_y, true)?;
        self.tracker.arm(
            ResolutionTarget::Handle(handle),
            Box::new(callback),
            url.into(),
            teleport,
        );
        self.transport.send_reliable(frame);
        Ok(())
    }

    /// Requests every region inside an inclusive grid bounding box.
    pub fn request_block(
        &mut self,
        min_x: u16,
        min_y: u16,
        max_x: u16,
        max_y: u16,
        include_nonexistent: bool,
    ) -> ResolverResult<()> {
        let frame = self.encode_block(min_x, min_y, max_x, max_y, include_nonexistent)?;
        self.transport.send_reliable(frame);
        Ok(())
    }

    /// Applies a block reply frame.
    ///
    /// The frame is fully decoded and validated before any collaborator is
    /// touched; on error nothing has changed.
    pub fn handle_block_reply(
        &mut self,
        frame: &[u8],
        handlers: &mut ReplyHandlers<'_>,
    ) -> ResolverResult<BlockReplySummary> {
        let reply = MapBlockReply::decode(frame, &self.limits)?;
        self.apply_blocks(&reply, handlers)
    }

    /// Applies an item reply frame.
    pub fn handle_item_reply(
        &mut self,
        frame: &[u8],
        index: &mut dyn ItemIndex,
    ) -> ResolverResult<usize> {
        let reply = MapItemReply::decode(frame, &self.limits)?;
        Ok(apply_item_reply(decode_item_reply(&reply), index))
    }

    /// Dispatches any inbound frame by its tag.
    ///
    /// Request tags are rejected with [`ResolverError::UnexpectedMessage`].
    pub fn handle_message(
        &mut self,
        bytes: &[u8],
        handlers: &mut ReplyHandlers<'_>,
    ) -> ResolverResult<ReplyOutcome> {
        let frame = decode_frame(bytes, &self.limits)?;
        match frame.tag() {
            MessageTag::MapBlockReply => {
                let reply = MapBlockReply::from_frame(&frame, &self.limits)?;
                self.apply_blocks(&reply, handlers).map(ReplyOutcome::Regions)
            }
            MessageTag::MapItemReply => {
                let reply = MapItemReply::from_frame(&frame, &self.limits)?;
                let count = apply_item_reply(decode_item_reply(&reply), handlers.items);
                Ok(ReplyOutcome::Items { count })
            }
            tag => {
                log::warn!("dropping inbound {tag}");
                Err(ResolverError::UnexpectedMessage { tag })
            }
        }
    }

    fn apply_blocks(
        &mut self,
        reply: &MapBlockReply,
        handlers: &mut ReplyHandlers<'_>,
    ) -> ResolverResult<BlockReplySummary> {
        let records = decode_block_reply(reply)?;
        Ok(apply_block_reply(&records, &mut self.tracker, handlers))
    }

    fn agent_data(&self, flags: u32) -> AgentData {
        AgentData::request(self.agent.agent_id, self.agent.session_id, flags)
    }

    fn encode_named_region(&self, name: &str) -> ResolverResult<Vec<u8>> {
        log::debug!("requesting region named {name:?}");
        let request = MapNameRequest {
            agent: self.agent_data(LAYER_FLAG),
            name: name.to_owned(),
        };
        Ok(request.encode(&self.limits)?)
    }

    fn encode_block(
        &self,
        min_x: u16,
        min_y: u16,
        max_x: u16,
        max_y: u16,
        include_nonexistent: bool,
    ) -> ResolverResult<Vec<u8>> {
        log::debug!(
            "requesting blocks ({min_x}, {min_y})..=({max_x}, {max_y}), nonexistent = {include_nonexistent}"
        );
        let request = MapBlockRequest {
            agent: self.agent_data(MapBlockRequest::flags_for(include_nonexistent)),
            min_x,
            min_y,
            max_x,
            max_y,
        };
        Ok(request.encode(&self.limits)?)
    }

    fn send<M: WireMessage>(&mut self, message: &M) -> ResolverResult<()> {
        let frame = message.encode(&self.limits)?;
        self.transport.send_reliable(frame);
        Ok(())
    }
}
