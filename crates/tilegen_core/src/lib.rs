//! Core data types for the tilegen procedural map construction pipeline:
//! grid coordinates, resource descriptors, the shared error enum, and the
//! fully-resolved map template external collaborators hand to a Builder.

mod descriptor;
mod error;
mod grid;
mod template;

pub use descriptor::{
    AutoTileDescriptor, Function, GroupMember, ObjectDescriptor, ResourceGroup, TileDescriptor,
};
pub use error::TilegenError;
pub use grid::{Coord, Footprint, LayerIndex, TileRef};
pub use template::{LayerTemplate, MapTemplate};

/// Default layer count for a map unless the template overrides it.
pub const DEFAULT_LAYER_COUNT: u32 = 10;

/// Reserved layer index that the built-in Collision element writes to.
pub const COLLISION_LAYER: LayerIndex = DEFAULT_LAYER_COUNT - 2;

/// Reserved layer index that the built-in Cover element writes to.
pub const COVER_LAYER: LayerIndex = DEFAULT_LAYER_COUNT - 1;

/// Default tile pixel dimensions for the exported map schema.
pub const DEFAULT_TILE_SIZE: u32 = 32;
