//! Seeded RNG and weighted choice — the deterministic substrate every other
//! component in the pipeline builds on.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tilegen_core::TilegenError;

/// Construct a deterministic RNG from a seed. `SmallRng` is used (rather
/// than the platform default) so that invariant 4 of the map cache
/// (determinism) holds across toolchain upgrades as long as the algorithm
/// itself is unchanged.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Combine a base seed with an offset to produce a divergent child seed, for
/// `MapCache::create_copy`'s speculative-branch reseeding.
pub fn child_seed(seed: u64, offset: u64) -> u64 {
    // A cheap, stable mix; does not need to be cryptographic, only
    // deterministic and well-distributed enough to avoid short cycles.
    seed.wrapping_mul(0x9E3779B97F4A7C15).wrapping_add(offset)
}

/// Draw one item from `items` by weight, per the contract in spec §4.A:
/// compute the total rate `S`, draw `u` in `[0, S)`, and return the first
/// item whose prefix sum of rates is `>= u`. Ties (equal rates) break by
/// insertion order because the scan is left-to-right and strict.
///
/// Fails with [`TilegenError::EmptyDistribution`] if every rate is zero (or
/// `items` is empty).
pub fn weighted_choice<'a, T>(
    rng: &mut impl Rng,
    items: &'a [T],
    weight_fn: impl Fn(&T) -> f64,
) -> Result<&'a T, TilegenError> {
    let total: f64 = items.iter().map(&weight_fn).sum();
    if total <= 0.0 {
        return Err(TilegenError::EmptyDistribution);
    }
    let mut pick = rng.gen_range(0.0..total);
    for item in items {
        let weight = weight_fn(item);
        if pick < weight {
            return Ok(item);
        }
        pick -= weight;
    }
    // Floating point rounding can leave `pick` just shy of the last
    // boundary; fall back to the last item rather than panicking.
    Ok(items.last().expect("total > 0.0 implies non-empty"))
}
