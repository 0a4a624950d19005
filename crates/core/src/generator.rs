//! Tile generation - refilling vacated cells
//!
//! Cells are filled column by column, left to right, and bottom to top within
//! a column, so the neighbors below and to the left are already settled when a
//! cell is picked. A new tile never shares a kind with any occupied
//! orthogonal neighbor at the moment it is placed. That keeps a refill from
//! trivially recreating a match; it does not rule out matches formed later
//! by gravity, which the cascade loop resolves as usual.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::grid::Grid;
use crate::types::{Direction, Kind};

/// Choose a kind for the cell at (x, y) out of `[0, kind_count)`.
///
/// Kinds held by occupied up/right/down/left neighbors are excluded; if that
/// leaves nothing, the full kind set is used instead. `kind_count` must be non-zero.
pub fn pick<R: Rng>(grid: &Grid, x: i32, y: i32, kind_count: u8, rng: &mut R) -> Kind {
    let neighbors: ArrayVec<Kind, 4> = Direction::ALL
        .iter()
        .filter_map(|dir| {
            let (dx, dy) = dir.delta();
            grid.kind_at(x + dx, y + dy)
        })
        .collect();

    let candidates: Vec<Kind> = (0..kind_count)
        .map(Kind::new)
        .filter(|kind| !neighbors.contains(kind))
        .collect();

    if candidates.is_empty() {
        return Kind::new(rng.random_range(0..kind_count));
    }
    candidates[rng.random_range(0..candidates.len())]
}

/// Fill every empty cell of a compacted grid.
///
/// Returns the kinds spawned into each column, bottom-most first, which is
/// the order they enter the board from above.
pub fn fill<R: Rng>(grid: &mut Grid, kind_count: u8, rng: &mut R) -> Vec<Vec<Kind>> {
    let mut slots = vec![Vec::new(); grid.width()];
    for x in 0..grid.width() as i32 {
        for y in (0..grid.height() as i32).rev() {
            if !grid.is_empty_at(x, y) {
                continue;
            }
            let kind = pick(grid, x, y, kind_count, rng);
            // (x, y) was just checked to be on the board.
            let _ = grid.set(x, y, Some(kind));
            slots[x as usize].push(kind);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SessionRng;

    #[test]
    fn test_pick_avoids_all_neighbors() {
        let grid = Grid::from_ascii(&[".0.", "1.2", ".3."]).unwrap();
        let mut rng = SessionRng::new(7);
        for _ in 0..200 {
            let kind = pick(&grid, 1, 1, 5, &mut rng);
            assert_eq!(kind, Kind::new(4));
        }
    }

    #[test]
    fn test_pick_falls_back_when_every_kind_is_excluded() {
        // Only two kinds; the four neighbors cover both.
        let grid = Grid::from_ascii(&[".0.", "1.0", ".1."]).unwrap();
        let mut rng = SessionRng::new(3);
        for _ in 0..50 {
            let kind = pick(&grid, 1, 1, 2, &mut rng);
            assert!(kind.index() < 2);
        }
    }

    #[test]
    fn test_fill_reports_slots_bottom_first() {
        let mut grid = Grid::from_ascii(&["..", ".0", "10"]).unwrap();
        let mut rng = SessionRng::new(11);
        let slots = fill(&mut grid, 5, &mut rng);

        assert!(grid.is_full());
        assert_eq!(slots[0].len(), 2);
        assert_eq!(slots[1].len(), 1);
        // Column 0 filled from row 1 upward.
        assert_eq!(grid.kind_at(0, 1), Some(slots[0][0]));
        assert_eq!(grid.kind_at(0, 0), Some(slots[0][1]));
        assert_eq!(grid.kind_at(1, 0), Some(slots[1][0]));
    }

    #[test]
    fn test_filled_tiles_differ_from_their_neighbors() {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut rng = SessionRng::new(2024);
        fill(&mut grid, 5, &mut rng);

        for x in 0..8 {
            for y in 0..8 {
                let kind = grid.kind_at(x, y);
                assert!(kind.is_some());
                for dir in Direction::ALL {
                    let (dx, dy) = dir.delta();
                    assert_ne!(kind, grid.kind_at(x + dx, y + dy));
                }
            }
        }
    }
}
