//! Random Substrate: the deterministic seeded RNG, weighted choice, and
//! Perlin/double-Perlin noise fields that every other component in the
//! pipeline builds on.

mod perlin;
mod rng;

pub use perlin::{double_perlin, perlin};
pub use rng::{child_seed, seeded_rng, weighted_choice};
