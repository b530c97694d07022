//! Conversions between region handles, world coordinates and grid cells.

use std::fmt;

/// Width of one region along either axis, in world units.
pub const REGION_WIDTH_UNITS: u32 = 256;

/// Converts grid-cell coordinates to the world coordinates of the cell origin.
#[must_use]
pub const fn to_world(grid_x: u16, grid_y: u16) -> (u32, u32) {
    (
        grid_x as u32 * REGION_WIDTH_UNITS,
        grid_y as u32 * REGION_WIDTH_UNITS,
    )
}

/// Converts world coordinates to the grid cell containing them.
///
/// The fractional part of a region is dropped, so only region origins
/// convert back exactly.
///
/// Grid cells are 16 bits wide. World coordinates at or beyond
/// `65536 * REGION_WIDTH_UNITS` wrap around to low cells, so a handle that
/// far out cannot be looked up by cell.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn to_grid(world_x: u32, world_y: u32) -> (u16, u16) {
    (
        (world_x / REGION_WIDTH_UNITS) as u16,
        (world_y / REGION_WIDTH_UNITS) as u16,
    )
}

/// A region handle: the world origin of a region packed into 64 bits.
///
/// The high word is the world x coordinate, the low word the world y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldHandle(u64);

impl WorldHandle {
    /// The zero handle. In an item request it means "the agent's region".
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Packs world coordinates into a handle.
    #[must_use]
    pub const fn from_world(world_x: u32, world_y: u32) -> Self {
        Self(((world_x as u64) << 32) | world_y as u64)
    }

    /// Packs the origin of a grid cell into a handle.
    #[must_use]
    pub const fn from_grid(grid_x: u16, grid_y: u16) -> Self {
        let (world_x, world_y) = to_world(grid_x, grid_y);
        Self::from_world(world_x, world_y)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Unpacks the handle into world coordinates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn world(self) -> (u32, u32) {
        ((self.0 >> 32) as u32, self.0 as u32)
    }

    /// Grid cell holding this handle's origin.
    #[must_use]
    pub const fn grid(self) -> (u16, u16) {
        let (world_x, world_y) = self.world();
        to_grid(world_x, world_y)
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for WorldHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<WorldHandle> for u64 {
    fn from(handle: WorldHandle) -> Self {
        handle.0
    }
}

impl fmt::Display for WorldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.world();
        write!(f, "({x}, {y})")
    }
}

/// A position in global world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl GlobalPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
