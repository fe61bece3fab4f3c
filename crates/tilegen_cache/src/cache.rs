//! The Map Cache: a layered grid with placement primitives and trial/commit
//! semantics. This is the component every generator ultimately mutates.

use rand::rngs::SmallRng;
use tilegen_core::{Coord, Footprint, GroupMember, LayerIndex, TileRef, TilegenError};
use tilegen_noise::{child_seed, seeded_rng, weighted_choice};

/// What a single grid slot holds: nothing, a renderable tile/object anchor,
/// or a reservation pointing back at an object's anchor cell. Reservations
/// are not surfaced through [`MapCache::get_layer`] — only the anchor/unit
/// cell carries a `TileRef`.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Tile(TileRef),
    Reservation { anchor: Coord },
}

/// One layer's flat, row-major grid storage — the same `Vec<Option<T>>`
/// shape as a conventional tile layer, generalized to carry either a tile
/// or a footprint reservation.
#[derive(Debug, Clone)]
struct LayerGrid {
    cells: Vec<Option<Slot>>,
}

impl LayerGrid {
    fn empty(w: u32, h: u32) -> Self {
        Self {
            cells: vec![None; (w as usize) * (h as usize)],
        }
    }
}

/// The layered grid built during a single build cycle.
///
/// See spec invariants 1-5: no per-layer overlap, object footprint
/// integrity, in-bounds cells, RNG determinism from seed, and trial
/// isolation via [`MapCache::create_copy`]/[`MapCache::assign`].
#[derive(Debug, Clone)]
pub struct MapCache {
    width: u32,
    height: u32,
    layer_count: u32,
    seed: u64,
    rng: SmallRng,
    layers: Vec<LayerGrid>,
}

impl MapCache {
    pub fn new(width: u32, height: u32, layer_count: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            layer_count,
            seed,
            rng: seeded_rng(seed),
            layers: (0..layer_count).map(|_| LayerGrid::empty(width, height)).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layer_count(&self) -> u32 {
        self.layer_count
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn layer(&self, layer: LayerIndex) -> Option<&LayerGrid> {
        self.layers.get(layer as usize)
    }

    fn layer_mut(&mut self, layer: LayerIndex) -> Option<&mut LayerGrid> {
        self.layers.get_mut(layer as usize)
    }

    /// Places a unit tile. Succeeds iff the cell is in-bounds and empty.
    /// Never raises; failure just leaves the cache untouched.
    pub fn drop_tile(&mut self, x: u32, y: u32, layer: LayerIndex, tile: TileRef) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let Some(grid) = self.layer_mut(layer) else {
            return false;
        };
        if grid.cells[idx].is_some() {
            return false;
        }
        grid.cells[idx] = Some(Slot::Tile(tile));
        true
    }

    /// For each position, draws a member from `group` by weighted choice
    /// and attempts `drop_tile`; collisions are silently skipped, matching
    /// the contract. If the drawn member is an auto-tile, the placed cell's
    /// `auto_tile_family` is tagged to the auto-tile's resource id rather
    /// than storing a concrete blob47 variant (resolution is deferred to
    /// export, see `tilegen_autotile`).
    pub fn drop_tiles_from_tilegroup(
        &mut self,
        group_id: &str,
        members: &[GroupMember],
        positions: &[Coord],
        layer: LayerIndex,
    ) -> Result<(), TilegenError> {
        for pos in positions {
            let member = weighted_choice(&mut self.rng, members, |m| m.rate())?;
            let tile = match member {
                GroupMember::Tile(t) => TileRef::unit(&t.resource_id, group_id)
                    .with_collision(t.collision)
                    .with_cover(t.cover),
                GroupMember::AutoTile(a) => TileRef::unit(&a.resource_id, group_id)
                    .with_collision(a.collision)
                    .with_cover(a.cover)
                    .with_auto_tile_family(&a.resource_id),
                GroupMember::Object(_) => {
                    return Err(TilegenError::HeterogeneousGroup {
                        group: group_id.to_string(),
                    })
                }
            };
            // Collision with an already-occupied cell is an expected,
            // silently-skipped outcome per the contract, not an error.
            self.drop_tile(pos.x, pos.y, layer, tile);
        }
        Ok(())
    }

    /// Places an object anchored at `(x, y)`. Succeeds iff every footprint
    /// cell is in-bounds and empty on this layer, and (if the object has
    /// `collision = true`) also empty on the collision layer. On success,
    /// writes the anchor's full `TileRef` plus a reservation per remaining
    /// footprint cell; on failure, no state changes at all.
    pub fn drop_object(
        &mut self,
        x: u32,
        y: u32,
        layer: LayerIndex,
        collision_layer: LayerIndex,
        resource_id: &str,
        group_id: &str,
        w: u32,
        h: u32,
        collision: bool,
        cover: bool,
    ) -> bool {
        if w == 0 || h == 0 {
            return false;
        }
        if x.checked_add(w).map(|e| e > self.width).unwrap_or(true) {
            return false;
        }
        if y.checked_add(h).map(|e| e > self.height).unwrap_or(true) {
            return false;
        }
        let Some(_) = self.layer(layer) else {
            return false;
        };

        for dy in 0..h {
            for dx in 0..w {
                if self.check_exists(x + dx, y + dy, layer) {
                    return false;
                }
                if collision && self.check_exists(x + dx, y + dy, collision_layer) {
                    return false;
                }
            }
        }

        let anchor = Coord::new(x, y);
        let tile = TileRef {
            resource_id: resource_id.to_string(),
            source_group_id: group_id.to_string(),
            footprint: Footprint::Object { anchor, w, h },
            collision,
            cover,
            auto_tile_family: None,
            auto_tile_index: None,
        };

        for dy in 0..h {
            for dx in 0..w {
                let idx = self.index(x + dx, y + dy);
                let slot = if dx == 0 && dy == 0 {
                    Slot::Tile(tile.clone())
                } else {
                    Slot::Reservation { anchor }
                };
                self.layer_mut(layer).unwrap().cells[idx] = Some(slot);
            }
        }
        true
    }

    /// True iff the cell is non-empty: an anchor, a unit tile, or a
    /// footprint reservation.
    pub fn check_exists(&self, x: u32, y: u32, layer: LayerIndex) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.layer(layer)
            .and_then(|grid| grid.cells[idx].as_ref())
            .is_some()
    }

    /// Yields only anchor/unit cells (never reservations), in row-major
    /// order.
    pub fn get_layer(&self, layer: LayerIndex) -> Vec<(Coord, &TileRef)> {
        let Some(grid) = self.layer(layer) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                if let Some(Slot::Tile(tile_ref)) = &grid.cells[idx] {
                    out.push((Coord::new(x, y), tile_ref));
                }
            }
        }
        out
    }

    /// Deep copy of the grid and anchor state, with the RNG reseeded as a
    /// deterministic function of `(seed, seed_offset)` so speculative
    /// branches diverge from each other without disturbing the original's
    /// RNG stream.
    pub fn create_copy(&self, seed_offset: u64) -> Self {
        let mut copy = self.clone();
        copy.rng = seeded_rng(child_seed(self.seed, seed_offset));
        copy
    }

    /// Overwrites `self`'s grid, anchors and RNG state from `other`.
    /// Dimensions and layer count must match.
    pub fn assign(&mut self, other: &Self) -> Result<(), TilegenError> {
        if self.width != other.width || self.height != other.height || self.layer_count != other.layer_count {
            return Err(TilegenError::ShapeMismatch {
                expected: (self.width, self.height, self.layer_count),
                actual: (other.width, other.height, other.layer_count),
            });
        }
        self.layers = other.layers.clone();
        self.rng = other.rng.clone();
        Ok(())
    }

    /// The resource id an auto-tile-tagged cell belongs to, if any, used by
    /// the blob47 resolution pass to determine family membership.
    pub fn auto_tile_family_at(&self, x: u32, y: u32, layer: LayerIndex) -> Option<&str> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let idx = self.index(x, y);
        match self.layer(layer)?.cells[idx].as_ref()? {
            Slot::Tile(tile_ref) => tile_ref.auto_tile_family.as_deref(),
            Slot::Reservation { .. } => None,
        }
    }

    /// Writes the resolved blob47 local index onto an auto-tile-tagged
    /// cell. Called once per cell by the auto-tile resolution pass; no-op
    /// if the cell isn't a unit/anchor tile.
    pub fn set_auto_tile_index(&mut self, x: u32, y: u32, layer: LayerIndex, index: u32) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        if let Some(grid) = self.layer_mut(layer) {
            if let Some(Slot::Tile(tile_ref)) = grid.cells[idx].as_mut() {
                tile_ref.auto_tile_index = Some(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegen_core::TileDescriptor;

    fn grass_member() -> GroupMember {
        GroupMember::Tile(TileDescriptor {
            resource_id: "grass".to_string(),
            image_path: "grass.png".to_string(),
            rate: 1.0,
            collision: false,
            cover: false,
        })
    }

    #[test]
    fn single_grass_fill_scenario() {
        // Scenario 1 from the spec: W=4, H=2, L=1, seed=1.
        let mut cache = MapCache::new(4, 2, 1, 1);
        let members = vec![grass_member()];
        let positions: Vec<Coord> = (0..2)
            .flat_map(|y| (0..4).map(move |x| Coord::new(x, y)))
            .collect();
        cache
            .drop_tiles_from_tilegroup("ground", &members, &positions, 0)
            .unwrap();
        let layer = cache.get_layer(0);
        assert_eq!(layer.len(), 8);
        assert!(layer.iter().all(|(_, t)| t.resource_id == "grass"));
    }

    #[test]
    fn drop_tile_rejects_occupied_cell() {
        let mut cache = MapCache::new(4, 4, 1, 0);
        assert!(cache.drop_tile(1, 1, 0, TileRef::unit("a", "g")));
        assert!(!cache.drop_tile(1, 1, 0, TileRef::unit("b", "g")));
    }

    #[test]
    fn object_rejection_scenario() {
        // Scenario 3 from the spec.
        let mut cache = MapCache::new(20, 20, 4, 1);
        assert!(cache.drop_object(5, 5, 2, 8, "house", "buildings", 3, 2, true, false));
        assert!(!cache.drop_object(6, 5, 2, 8, "shed", "buildings", 2, 2, true, false));
    }

    #[test]
    fn object_boundary_fit() {
        let mut cache = MapCache::new(10, 10, 1, 0);
        assert!(cache.drop_object(7, 8, 0, 0, "o", "g", 3, 2, false, false));
        let mut cache2 = MapCache::new(10, 10, 1, 0);
        assert!(!cache2.drop_object(8, 8, 0, 0, "o", "g", 3, 2, false, false));
    }

    #[test]
    fn trial_commit_isolation() {
        // Scenario 4 from the spec.
        let cache = MapCache::new(10, 10, 4, 5);
        let mut copy = cache.create_copy(0);
        assert!(copy.drop_object(2, 2, 2, 8, "rock", "props", 2, 2, false, false));
        assert!(cache.get_layer(2).is_empty());

        let mut cache = cache;
        cache.assign(&copy).unwrap();
        assert_eq!(cache.get_layer(2).len(), 1);
    }

    #[test]
    fn assign_rejects_shape_mismatch() {
        let mut a = MapCache::new(10, 10, 4, 1);
        let b = MapCache::new(12, 10, 4, 1);
        let err = a.assign(&b).unwrap_err();
        assert!(matches!(err, TilegenError::ShapeMismatch { .. }));
    }

    #[test]
    fn determinism_across_fresh_caches() {
        let members = vec![
            GroupMember::Tile(TileDescriptor {
                resource_id: "a".into(),
                image_path: "a.png".into(),
                rate: 1.0,
                collision: false,
                cover: false,
            }),
            GroupMember::Tile(TileDescriptor {
                resource_id: "b".into(),
                image_path: "b.png".into(),
                rate: 1.0,
                collision: false,
                cover: false,
            }),
        ];
        let positions: Vec<Coord> = (0..5).map(|x| Coord::new(x, 0)).collect();

        let run = |seed: u64| -> Vec<String> {
            let mut cache = MapCache::new(5, 1, 1, seed);
            cache
                .drop_tiles_from_tilegroup("g", &members, &positions, 0)
                .unwrap();
            cache
                .get_layer(0)
                .into_iter()
                .map(|(_, t)| t.resource_id.clone())
                .collect()
        };

        assert_eq!(run(42), run(42));
    }
}
