//! Collaborator traits the client drives.
//!
//! The client never reaches for a global: every collaborator is handed in
//! explicitly, either at construction ([`Transport`]) or per reply
//! ([`ReplyHandlers`]).

use crate::coords::GlobalPosition;
use crate::records::{ItemRecord, RegionRecord};

/// Reliable outbound message channel. Sending never blocks.
pub trait Transport {
    /// Queues a complete frame for reliable delivery.
    fn send_reliable(&mut self, frame: Vec<u8>);
}

/// Region store fed by block replies.
pub trait RegionIndex {
    /// Inserts or refreshes a region.
    ///
    /// Returns `false` when the record describes a null (nonexistent) region.
    fn insert_region(&mut self, record: &RegionRecord) -> bool;
}

/// Point-of-interest store fed by item replies.
pub trait ItemIndex {
    fn insert_item(&mut self, record: ItemRecord);
}

/// Location currently tracked on the map.
pub trait LocationTracker {
    fn is_tracking_valid_location(&self) -> bool;

    /// Returns `true` if the tracked location was picked with a double
    /// click, meaning "go there as soon as it resolves".
    fn is_tracking_double_click(&self) -> bool;

    fn tracked_position_global(&self) -> GlobalPosition;

    /// Re-asserts the tracked location to the user-facing tracker.
    fn track_location(&mut self, position: GlobalPosition);
}

/// Immediate travel to a global position.
pub trait TravelAction {
    fn go_to(&mut self, position: GlobalPosition);
}

/// Map view notified once per block reply.
pub trait MapUi {
    fn update_regions(&mut self, found_null_sim: bool);
}

/// Borrowed collaborators used while applying one reply.
pub struct ReplyHandlers<'a> {
    pub regions: &'a mut dyn RegionIndex,
    pub items: &'a mut dyn ItemIndex,
    pub location: &'a mut dyn LocationTracker,
    pub travel: &'a mut dyn TravelAction,
    pub ui: &'a mut dyn MapUi,
}

impl<'a> ReplyHandlers<'a> {
    pub fn new(
        regions: &'a mut dyn RegionIndex,
        items: &'a mut dyn ItemIndex,
        location: &'a mut dyn LocationTracker,
        travel: &'a mut dyn TravelAction,
        ui: &'a mut dyn MapUi,
    ) -> Self {
        Self {
            regions,
            items,
            location,
            travel,
            ui,
        }
    }
}

impl Transport for Vec<Vec<u8>> {
    fn send_reliable(&mut self, frame: Vec<u8>) {
        self.push(frame);
    }
}

impl ItemIndex for Vec<ItemRecord> {
    fn insert_item(&mut self, record: ItemRecord) {
        self.push(record);
    }
}
