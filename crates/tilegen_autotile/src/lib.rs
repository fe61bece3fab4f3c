//! Auto-Tile Resolver: maps 8-neighbor adjacency to a blob47 tile index.
//!
//! Resolution is lazy by design — generators only tag a cell as belonging
//! to an auto-tile family; [`resolve`] is run once over the finished grid
//! during export so placement order never matters.

mod blob47;

pub use blob47::{blob47_lookup, calculate_bitmask, neighbors, optimize_bitmask, resolve};
