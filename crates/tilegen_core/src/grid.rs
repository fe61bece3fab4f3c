//! Grid coordinates and the per-cell tile reference.

use serde::{Deserialize, Serialize};

/// An integer grid coordinate. Origin is top-left; +y is downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Coord {
    fn from(value: (u32, u32)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// A layer index. Two values are reserved by convention; see
/// [`crate::COLLISION_LAYER`] and [`crate::COVER_LAYER`].
pub type LayerIndex = u32;

/// The shape a [`TileRef`] occupies on its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Footprint {
    /// A single-cell tile.
    Unit,
    /// A multi-cell object. `anchor` is the top-left cell; every other cell
    /// in `[anchor.x, anchor.x+w) x [anchor.y, anchor.y+h)` is a reservation
    /// pointing back at `anchor`.
    Object { anchor: Coord, w: u32, h: u32 },
}

/// What occupies a single cell of the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRef {
    /// Stable string id referencing a loaded texture.
    pub resource_id: String,
    /// The descriptor group this cell's tile was drawn from.
    pub source_group_id: String,
    pub footprint: Footprint,
    pub collision: bool,
    pub cover: bool,
    /// If set, this cell participates in blob47 neighborhood resolution
    /// with other cells sharing the same family on the same layer.
    pub auto_tile_family: Option<String>,
    /// The resolved blob47 local index (0..47), filled in by the auto-tile
    /// resolution pass at export time. `None` until that pass runs, even
    /// for cells with `auto_tile_family` set.
    pub auto_tile_index: Option<u32>,
}

impl TileRef {
    /// A unit tile reference with no auto-tile family.
    pub fn unit(resource_id: impl Into<String>, source_group_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            source_group_id: source_group_id.into(),
            footprint: Footprint::Unit,
            collision: false,
            cover: false,
            auto_tile_family: None,
            auto_tile_index: None,
        }
    }

    pub fn with_collision(mut self, collision: bool) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_cover(mut self, cover: bool) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_auto_tile_family(mut self, family: impl Into<String>) -> Self {
        self.auto_tile_family = Some(family.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_from_tuple() {
        let c: Coord = (3, 4).into();
        assert_eq!(c, Coord::new(3, 4));
    }

    #[test]
    fn tile_ref_builder_chain() {
        let t = TileRef::unit("grass", "ground")
            .with_collision(true)
            .with_auto_tile_family("water");
        assert!(t.collision);
        assert_eq!(t.auto_tile_family.as_deref(), Some("water"));
        assert_eq!(t.footprint, Footprint::Unit);
    }
}
