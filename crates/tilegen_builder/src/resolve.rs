//! The auto-tile resolution pass (spec §4.C, pipeline step 7): runs once
//! over the finished grid so that cells tagged with an auto-tile family,
//! placed in any order by any element, converge to the correct blob47
//! rendering.

use tilegen_cache::MapCache;
use tilegen_core::TilegenError;

pub fn resolve_auto_tiles(cache: &mut MapCache) -> Result<(), TilegenError> {
    let w = cache.width();
    let h = cache.height();

    for layer in 0..cache.layer_count() {
        // Snapshot family membership up front: `resolve` below needs to
        // query neighbors while we're simultaneously about to mutate this
        // same layer's `auto_tile_index`, and membership itself never
        // changes during this pass.
        let families: Vec<(u32, u32, String)> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter_map(|(x, y)| {
                cache
                    .auto_tile_family_at(x, y, layer)
                    .map(|family| (x, y, family.to_string()))
            })
            .collect();

        if families.is_empty() {
            continue;
        }

        for (x, y, family) in &families {
            let is_same_family = |nx: i64, ny: i64| -> bool {
                if nx < 0 || ny < 0 {
                    return false;
                }
                cache
                    .auto_tile_family_at(nx as u32, ny as u32, layer)
                    .map(|f| f == family)
                    .unwrap_or(false)
            };
            let index = tilegen_autotile::resolve(*x as i64, *y as i64, w, h, is_same_family);
            cache.set_auto_tile_index(*x, *y, layer, index);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegen_core::TileRef;

    #[test]
    fn blob47_edge_scenario() {
        // Scenario 2 from the spec: W=3, H=3, L=1, a plus-shape of cells
        // tagged family "f". Center (1,1) has all four cardinals set and
        // no diagonals; edge cell (1,0) treats out-of-bounds N as occupied.
        let mut cache = MapCache::new(3, 3, 1, 1);
        for (x, y) in [(1, 0), (0, 1), (1, 1), (1, 2), (2, 1)] {
            cache.drop_tile(x, y, 0, TileRef::unit("grass", "ground").with_auto_tile_family("f"));
        }

        resolve_auto_tiles(&mut cache).unwrap();

        let center = cache
            .get_layer(0)
            .into_iter()
            .find(|(c, _)| (c.x, c.y) == (1, 1))
            .unwrap()
            .1;
        use tilegen_autotile::neighbors::{E, N, S, W};
        let expected = tilegen_autotile::blob47_lookup(N | E | S | W);
        assert_eq!(center.auto_tile_index, Some(expected));
    }
}
