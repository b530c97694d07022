//! Block reply handling: validate, decode, then apply.
//!
//! Decoding produces plain [`RegionRecord`]s without touching any
//! collaborator. Applying walks those records in arrival order and, for
//! each one, inserts it, refreshes the tracked location and checks the
//! pending resolution.

use wire::{MapBlockReply, LAYER_FLAG};

use crate::coords::WorldHandle;
use crate::error::{ResolverError, ResolverResult};
use crate::handlers::ReplyHandlers;
use crate::records::RegionRecord;
use crate::tracker::ResolutionTracker;

/// Outcome of applying one block reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockReplySummary {
    /// Number of region records applied.
    pub regions: usize,
    /// Whether any record was reported back as a null region.
    pub found_null_sim: bool,
    /// Handle of the region that satisfied the pending resolution, if any.
    pub resolved: Option<WorldHandle>,
}

/// Validates a block reply and converts its blocks to region records.
///
/// A reply for any layer other than [`LAYER_FLAG`] is logged and rejected
/// as a whole.
pub fn decode_block_reply(reply: &MapBlockReply) -> ResolverResult<Vec<RegionRecord>> {
    let flags = reply.agent.flags;
    if flags != LAYER_FLAG {
        log::warn!("invalid map image type returned, layer = {flags}");
        return Err(ResolverError::UnexpectedLayer { flags });
    }
    Ok(reply.blocks.iter().map(RegionRecord::from_block).collect())
}

pub(crate) fn apply_block_reply(
    records: &[RegionRecord],
    tracker: &mut ResolutionTracker,
    handlers: &mut ReplyHandlers<'_>,
) -> BlockReplySummary {
    let mut summary = BlockReplySummary {
        regions: records.len(),
        ..BlockReplySummary::default()
    };

    for record in records {
        let handle = record.handle();
        log::trace!("region {:?} at {handle}", record.name);

        if !handlers.regions.insert_region(record) {
            summary.found_null_sim = true;
        }

        refresh_tracking(handlers);

        if let Some((callback, resolved)) =
            tracker.take_match(&record.name, handle, record.image_id)
        {
            log::debug!("resolved {:?} at {handle}", record.name);
            summary.resolved = Some(handle);
            callback(resolved);
        }
    }

    handlers.ui.update_regions(summary.found_null_sim);
    summary
}

/// Re-asserts a valid tracked location, travelling there first if it was
/// picked with a double click. Runs for every applied record.
fn refresh_tracking(handlers: &mut ReplyHandlers<'_>) {
    if !handlers.location.is_tracking_valid_location() {
        return;
    }
    let position = handlers.location.tracked_position_global();
    if handlers.location.is_tracking_double_click() {
        handlers.travel.go_to(position);
    }
    handlers.location.track_location(position);
}
