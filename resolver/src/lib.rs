//! Region lookups for the world map.
//!
//! [`WorldMapClient`] encodes outbound map queries and applies inbound
//! replies to caller-owned indices. It also holds a single pending
//! resolution: a region lookup by name or handle whose callback fires the
//! first time a block reply carries the matching region.
//!
//! Only the most recently armed resolution can fire. There is no timeout.
//!
//! ```
//! use resolver::{AgentContext, WorldHandle, WorldMapClient};
//!
//! let mut client = WorldMapClient::new(AgentContext::default(), Vec::<Vec<u8>>::new());
//! client
//!     .request_handle_region_with_callback(
//!         WorldHandle::from_grid(1000, 1000),
//!         |resolved| println!("resolved {}", resolved.handle),
//!         "secondlife://Ahern/128/128",
//!         false,
//!     )
//!     .unwrap();
//! assert!(client.tracker().is_armed());
//! assert_eq!(client.transport().len(), 1);
//! ```

mod block_reply;
mod client;
mod coords;
mod error;
mod handlers;
mod item_reply;
mod records;
mod tracker;

pub use block_reply::{decode_block_reply, BlockReplySummary};
pub use client::{AgentContext, ReplyOutcome, WorldMapClient};
pub use coords::{to_grid, to_world, GlobalPosition, WorldHandle, REGION_WIDTH_UNITS};
pub use error::{ResolverError, ResolverResult};
pub use handlers::{
    ItemIndex, LocationTracker, MapUi, RegionIndex, ReplyHandlers, Transport, TravelAction,
};
pub use item_reply::{apply_item_reply, decode_item_reply};
pub use records::{AccessCode, ItemRecord, ItemType, RegionRecord};
pub use tracker::{ResolutionCallback, ResolutionTarget, ResolutionTracker, ResolvedRegion};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = REGION_WIDTH_UNITS;
        let _ = WorldHandle::ZERO;
        let _ = ItemType::LAND_FOR_SALE;
        let _ = AccessCode::NON_EXISTENT;
        let _ = ResolutionTracker::new();
        let _: ResolverResult<()> = Ok(());
    }
}
