//! Error kinds shared across the tilegen workspace.

use thiserror::Error;

/// Errors surfaced by the map construction pipeline.
///
/// None of these are retried internally; a cache operation that would
/// violate an invariant instead returns `false` and lets the caller decide
/// (see `MapCache`'s placement methods in `tilegen_cache`).
#[derive(Debug, Error)]
pub enum TilegenError {
    #[error("duplicate resource id `{0}` within group `{1}`")]
    DuplicateResource(String, String),

    #[error("group `{group}` mixes descriptor kinds; a group must be all-tile, all-auto-tile, or all-object")]
    HeterogeneousGroup { group: String },

    #[error("element `{element}` referenced resource `{resource}` which was not loaded")]
    MissingResource { element: String, resource: String },

    #[error("weighted choice over an empty or all-zero-rate distribution")]
    EmptyDistribution,

    #[error("cache assign failed: shape mismatch ({expected:?} vs {actual:?})")]
    ShapeMismatch {
        expected: (u32, u32, u32),
        actual: (u32, u32, u32),
    },

    #[error("failed to resolve asset path `{path}`")]
    AssetLoadFailed { path: String },

    #[error("element `{element}` aborted the build: {cause}")]
    BuildAborted { element: String, cause: String },

    #[error("internal invariant violated: {0}")]
    InvariantViolated(String),
}
