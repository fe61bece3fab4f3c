//! Element Protocol: the setup/build lifecycle contract for generators, and
//! the built-in Collision/Cover passes the Builder runs after every
//! user-supplied element has run.

mod element;
mod passes;
mod resources;

pub use element::{fill_missing_groups, Element};
pub use passes::{run_collision_pass, run_cover_pass, COLLISION_RESOURCE_ID, COVER_RESOURCE_ID};
pub use resources::{LoadedResource, LoadedResources};
