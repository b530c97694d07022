//! Decoded region and item records handed to the indices.

use wire::{MapBlockData, MapItemData, Uuid};

use crate::coords::{to_world, WorldHandle};

/// Map item layer requested by an item query and echoed by its reply.
///
/// Unknown values pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemType(u32);

impl ItemType {
    pub const TELEHUB: Self = Self(1);
    pub const PG_EVENT: Self = Self(2);
    pub const MATURE_EVENT: Self = Self(3);
    pub const AGENT_LOCATIONS: Self = Self(6);
    pub const LAND_FOR_SALE: Self = Self(7);
    pub const CLASSIFIED: Self = Self(8);
    pub const ADULT_EVENT: Self = Self(9);
    pub const LAND_FOR_SALE_ADULT: Self = Self(10);

    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemType {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Region maturity / availability code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccessCode(u8);

impl AccessCode {
    pub const PG: Self = Self(13);
    pub const MATURE: Self = Self(21);
    pub const ADULT: Self = Self(42);
    pub const DOWN: Self = Self(254);
    pub const NON_EXISTENT: Self = Self(255);

    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` for the code a simulator uses for an empty grid cell.
    #[must_use]
    pub const fn is_non_existent(self) -> bool {
        self.0 == Self::NON_EXISTENT.0
    }
}

/// One region decoded from a block reply, in world coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionRecord {
    pub world_x: u32,
    pub world_y: u32,
    pub name: String,
    pub image_id: Uuid,
    pub access: AccessCode,
    pub region_flags: u32,
}

impl RegionRecord {
    /// Builds a record from a wire block, converting grid to world units.
    #[must_use]
    pub fn from_block(block: &MapBlockData) -> Self {
        let (world_x, world_y) = to_world(block.x, block.y);
        Self {
            world_x,
            world_y,
            name: block.name.clone(),
            image_id: block.image_id,
            access: AccessCode::new(block.access),
            region_flags: block.region_flags,
        }
    }

    #[must_use]
    pub const fn handle(&self) -> WorldHandle {
        WorldHandle::from_world(self.world_x, self.world_y)
    }
}

/// One point of interest decoded from an item reply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord {
    pub world_x: u32,
    pub world_y: u32,
    pub name: String,
    pub id: Uuid,
    pub item_type: ItemType,
    pub extra: i32,
    pub extra2: i32,
}

impl ItemRecord {
    /// Builds a record from a wire block and the reply's shared item type.
    #[must_use]
    pub fn from_item(item: &MapItemData, item_type: ItemType) -> Self {
        Self {
            world_x: item.x,
            world_y: item.y,
            name: item.name.clone(),
            id: item.id,
            item_type,
            extra: item.extra,
            extra2: item.extra2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_record_converts_grid_to_world() {
        let block = MapBlockData {
            x: 1000,
            y: 1002,
            name: "Ahern".to_owned(),
            access: 13,
            region_flags: 0x10,
            image_id: Uuid::from_u128(3),
        };
        let record = RegionRecord::from_block(&block);
        assert_eq!((record.world_x, record.world_y), (256_000, 256_512));
        assert_eq!(record.access, AccessCode::PG);
        assert_eq!(record.handle(), WorldHandle::from_grid(1000, 1002));
    }

    #[test]
    fn item_record_keeps_world_units() {
        let item = MapItemData {
            x: 256_010,
            y: 256_020,
            name: "Hub".to_owned(),
            id: Uuid::from_u128(4),
            extra: -1,
            extra2: 2,
        };
        let record = ItemRecord::from_item(&item, ItemType::TELEHUB);
        assert_eq!((record.world_x, record.world_y), (256_010, 256_020));
        assert_eq!(record.item_type, ItemType::TELEHUB);
        assert_eq!((record.extra, record.extra2), (-1, 2));
    }

    #[test]
    fn unknown_item_type_passes_through() {
        assert_eq!(ItemType::from(4242).raw(), 4242);
    }

    #[test]
    fn access_non_existent() {
        assert!(AccessCode::new(255).is_non_existent());
        assert!(!AccessCode::MATURE.is_non_existent());
    }
}
