//! Built-in Collision and Cover passes.
//!
//! Unlike a user [`crate::Element`], these do not declare descriptor groups
//! or consume loaded assets — they scan the *already-populated* cache and
//! derive a reserved layer from properties already attached to placed
//! tiles/objects, per spec steps 5-6 of the build pipeline.

use tilegen_cache::MapCache;
use tilegen_core::{Footprint, TilegenError};

/// Obstacle tile resource id written to `COLLISION_LAYER`.
pub const COLLISION_RESOURCE_ID: &str = "builtin:collision_obstacle";
/// Obstacle tile resource id written to `COVER_LAYER`.
pub const COVER_RESOURCE_ID: &str = "builtin:cover_obstacle";

fn run_pass(
    cache: &mut MapCache,
    derived_layer: u32,
    select: impl Fn(&tilegen_core::TileRef) -> bool,
    resource_id: &str,
    group_id: &str,
) -> Result<(), TilegenError> {
    // Collect before mutating: `get_layer` borrows the cache immutably, and
    // the derived layer itself must never be scanned back into itself.
    let mut obstacles = Vec::new();
    for layer in 0..cache.layer_count() {
        if layer == derived_layer {
            continue;
        }
        for (coord, tile_ref) in cache.get_layer(layer) {
            if !select(tile_ref) {
                continue;
            }
            match tile_ref.footprint {
                Footprint::Unit => obstacles.push((coord.x, coord.y)),
                Footprint::Object { anchor, w, h } => {
                    for dy in 0..h {
                        for dx in 0..w {
                            obstacles.push((anchor.x + dx, anchor.y + dy));
                        }
                    }
                }
            }
        }
    }

    for (x, y) in obstacles {
        // Already-marked cells (e.g. two overlapping footprints feeding the
        // same obstacle layer position) are a silent no-op, same as any
        // other `drop_tile` collision.
        cache.drop_tile(
            x,
            y,
            derived_layer,
            tilegen_core::TileRef::unit(resource_id, group_id),
        );
    }

    Ok(())
}

/// Scans every non-reserved layer for `collision = true` cells and drops an
/// obstacle unit tile at every one of their occupied cells (the anchor
/// cell and every footprint cell for multi-cell objects) on
/// `collision_layer`.
pub fn run_collision_pass(cache: &mut MapCache, collision_layer: u32) -> Result<(), TilegenError> {
    log::debug!("running built-in collision pass on layer {collision_layer}");
    run_pass(
        cache,
        collision_layer,
        |tile_ref| tile_ref.collision,
        COLLISION_RESOURCE_ID,
        "builtin:collision",
    )
}

/// Analogous to [`run_collision_pass`], using `cover = true` and
/// `cover_layer`.
pub fn run_cover_pass(cache: &mut MapCache, cover_layer: u32) -> Result<(), TilegenError> {
    log::debug!("running built-in cover pass on layer {cover_layer}");
    run_pass(
        cache,
        cover_layer,
        |tile_ref| tile_ref.cover,
        COVER_RESOURCE_ID,
        "builtin:cover",
    )
}
