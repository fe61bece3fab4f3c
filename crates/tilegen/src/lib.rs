//! Facade crate re-exporting the public surface of the tilegen procedural
//! map construction pipeline for downstream generator crates.

pub use tilegen_autotile::{blob47_lookup, calculate_bitmask, neighbors, optimize_bitmask};
pub use tilegen_builder::{BuiltMap, Builder, LayerSchema, MapSchema, TilesetSchema};
pub use tilegen_cache::MapCache;
pub use tilegen_core::{
    AutoTileDescriptor, Coord, Footprint, Function, GroupMember, LayerIndex, LayerTemplate,
    MapTemplate, ObjectDescriptor, ResourceGroup, TileDescriptor, TileRef, TilegenError,
    COLLISION_LAYER, COVER_LAYER, DEFAULT_LAYER_COUNT, DEFAULT_TILE_SIZE,
};
pub use tilegen_elements::{fill_missing_groups, Element, LoadedResource, LoadedResources};
pub use tilegen_noise::{child_seed, double_perlin, perlin, seeded_rng, weighted_choice};
