//! Map Cache: the layered grid generators mutate during a build, with
//! trial/commit semantics via `create_copy`/`assign`.

mod cache;

pub use cache::MapCache;
