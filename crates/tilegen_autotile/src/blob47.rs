//! 8-neighbor adjacency -> blob47 index resolution.
//!
//! The bitmask layout and diagonal-reduction rule mirror the classic
//! blob-autotile convention; the one deliberate deviation from that
//! convention used elsewhere in this corpus is that out-of-bounds
//! neighbors here count as *occupied* rather than *not occupied*, so a
//! family painted up to the map edge renders as uninterrupted interior
//! instead of acquiring a spurious border.

use std::sync::OnceLock;

/// Neighbor bit positions, N first and proceeding clockwise.
pub mod neighbors {
    pub const N: u8 = 0b0000_0001;
    pub const NE: u8 = 0b0000_0010;
    pub const E: u8 = 0b0000_0100;
    pub const SE: u8 = 0b0000_1000;
    pub const S: u8 = 0b0001_0000;
    pub const SW: u8 = 0b0010_0000;
    pub const W: u8 = 0b0100_0000;
    pub const NW: u8 = 0b1000_0000;
}

/// Zero out a diagonal bit unless both of its adjacent cardinal bits are
/// also set. Reduces the 256 raw masks down to the 47 canonical cases.
pub fn optimize_bitmask(bitmask: u8) -> u8 {
    use neighbors::*;
    let mut result = bitmask & (N | E | S | W);

    if bitmask & NE == NE && bitmask & N == N && bitmask & E == E {
        result |= NE;
    }
    if bitmask & SE == SE && bitmask & S == S && bitmask & E == E {
        result |= SE;
    }
    if bitmask & SW == SW && bitmask & S == S && bitmask & W == W {
        result |= SW;
    }
    if bitmask & NW == NW && bitmask & N == N && bitmask & W == W {
        result |= NW;
    }

    result
}

/// Compute the raw 8-neighbor adjacency bitmask for `(x, y)` on a grid of
/// size `w x h`, given a predicate for whether `(nx, ny)` is occupied by the
/// same family. Out-of-bounds neighbors are treated as occupied.
pub fn calculate_bitmask(
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    is_same_family: impl Fn(i64, i64) -> bool,
) -> u8 {
    use neighbors::*;

    let occupied = |dx: i64, dy: i64| -> bool {
        let nx = x + dx;
        let ny = y + dy;
        if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
            true
        } else {
            is_same_family(nx, ny)
        }
    };

    let mut mask = 0u8;
    if occupied(0, -1) {
        mask |= N;
    }
    if occupied(1, -1) {
        mask |= NE;
    }
    if occupied(1, 0) {
        mask |= E;
    }
    if occupied(1, 1) {
        mask |= SE;
    }
    if occupied(0, 1) {
        mask |= S;
    }
    if occupied(-1, 1) {
        mask |= SW;
    }
    if occupied(-1, 0) {
        mask |= W;
    }
    if occupied(-1, -1) {
        mask |= NW;
    }
    mask
}

fn canonical_masks() -> &'static [u8; 47] {
    static TABLE: OnceLock<[u8; 47]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut distinct: Vec<u8> = (0u16..256)
            .map(|raw| optimize_bitmask(raw as u8))
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        distinct.sort_unstable();
        distinct
            .try_into()
            .expect("blob47 reduction always yields exactly 47 distinct canonical masks")
    })
}

/// Map a reduced (already-`optimize_bitmask`'d) mask to its canonical index
/// in `[0, 47)`. Per the resolved Open Question on mask=0: the fully
/// isolated cell gets index 0, not a distinct singleton sprite, since 0 is
/// the smallest canonical mask value.
pub fn blob47_lookup(reduced_mask: u8) -> u32 {
    canonical_masks()
        .binary_search(&reduced_mask)
        .expect("reduced_mask must be a value produced by optimize_bitmask") as u32
}

/// Full pipeline: 8-neighbor adjacency -> reduction -> canonical index.
pub fn resolve(
    x: i64,
    y: i64,
    w: u32,
    h: u32,
    is_same_family: impl Fn(i64, i64) -> bool,
) -> u32 {
    let raw = calculate_bitmask(x, y, w, h, is_same_family);
    blob47_lookup(optimize_bitmask(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_exactly_47_distinct_entries() {
        assert_eq!(canonical_masks().len(), 47);
    }

    #[test]
    fn isolated_cell_is_index_zero() {
        assert_eq!(blob47_lookup(0), 0);
    }

    #[test]
    fn diagonal_without_both_cardinals_is_dropped() {
        use neighbors::*;
        // NE set but E missing: NE should not survive the reduction.
        let raw = N | NE;
        let reduced = optimize_bitmask(raw);
        assert_eq!(reduced, N);
    }

    #[test]
    fn diagonal_with_both_cardinals_survives() {
        use neighbors::*;
        let raw = N | E | NE;
        let reduced = optimize_bitmask(raw);
        assert_eq!(reduced, N | E | NE);
    }

    #[test]
    fn out_of_bounds_neighbors_count_as_occupied() {
        // Top-left corner of a 3x3 grid with nothing else in the family:
        // N, W, NW are all out-of-bounds and must read as occupied.
        let mask = calculate_bitmask(0, 0, 3, 3, |_, _| false);
        use neighbors::*;
        assert_eq!(mask & N, N);
        assert_eq!(mask & W, W);
        assert_eq!(mask & NW, NW);
        // E and S are in-bounds and the predicate says false (empty).
        assert_eq!(mask & E, 0);
        assert_eq!(mask & S, 0);
    }

    #[test]
    fn cross_shape_reduces_to_cardinals_only() {
        // Scenario 2 from the spec: a plus-shape of 5 cells on a 3x3 grid,
        // center cell (1,1) sees N+E+S+W all occupied and no diagonals.
        let family = |x: i64, y: i64| matches!((x, y), (1, 0) | (0, 1) | (1, 1) | (1, 2) | (2, 1));
        let raw = calculate_bitmask(1, 1, 3, 3, family);
        use neighbors::*;
        assert_eq!(raw, N | E | S | W);
        assert_eq!(optimize_bitmask(raw), N | E | S | W);
    }
}
