//! Builder & Exporter: orchestrates elements against a fresh Map Cache and
//! serializes the result to the editor-compatible map schema.

mod builder;
mod export;
mod loader;
mod resolve;

pub use builder::{BuiltMap, Builder};
pub use export::{export_map, LayerSchema, MapSchema, TilesetSchema};
pub use loader::load_resources;
pub use resolve::resolve_auto_tiles;

pub use tilegen_cache::MapCache;
