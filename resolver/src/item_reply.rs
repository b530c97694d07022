//! Item reply handling.

use wire::MapItemReply;

use crate::handlers::ItemIndex;
use crate::records::{ItemRecord, ItemType};

/// Converts every item in the reply, stamping each with the reply's item type.
#[must_use]
pub fn decode_item_reply(reply: &MapItemReply) -> Vec<ItemRecord> {
    let item_type = ItemType::new(reply.item_type);
    reply
        .items
        .iter()
        .map(|item| ItemRecord::from_item(item, item_type))
        .collect()
}

/// Inserts records into the index in order. Returns how many were inserted.
pub fn apply_item_reply(records: Vec<ItemRecord>, index: &mut dyn ItemIndex) -> usize {
    let count = records.len();
    for record in records {
        log::trace!("item {:?} at ({}, {})", record.name, record.world_x, record.world_y);
        index.insert_item(record);
    }
    count
}
