//! Move validation - swap adjacency, swap legality, and stuck-board detection

use crate::error::{EngineError, EngineResult};
use crate::grid::Grid;
use crate::matcher::has_match;
use crate::types::{Coord, Direction, Tile};

/// The eight arrangements that are one swap away from a run of three.
///
/// Each entry lists three `(dx, dy)` offsets from a scan origin where two
/// identical tiles and the tile to be swapped in must sit. Checking each
/// pattern as written and with `dx`/`dy` exchanged covers both orientations.
///
/// Using `+` for the origin, the first pattern is
///
/// ```text
/// + B C
/// A
/// ```
///
/// where `A` swaps up into `+` to complete `A B C`.
pub const ONE_OFF_PATTERNS: [[(i32, i32); 3]; 8] = [
    [(0, 1), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 0)],
    [(0, 0), (1, 1), (2, 0)],
    [(0, 1), (1, 0), (2, 1)],
    [(0, 0), (1, 0), (2, 1)],
    [(0, 0), (1, 1), (2, 1)],
    [(0, 0), (0, 2), (0, 3)],
    [(0, 0), (0, 1), (0, 3)],
];

/// Directions `a` and `b` travel to trade places, or `None` unless they are
/// exactly one orthogonal step apart.
pub fn is_adjacent(a: Coord, b: Coord) -> Option<(Direction, Direction)> {
    if a.manhattan(b) != 1 {
        return None;
    }
    // One step apart, so neither difference can overflow.
    let towards_b = match (b.x - a.x, b.y - a.y) {
        (-1, 0) => Direction::Left,
        (1, 0) => Direction::Right,
        (0, -1) => Direction::Up,
        (0, 1) => Direction::Down,
        _ => return None,
    };
    Some((towards_b, towards_b.opposite()))
}

/// The two tiles of a swap, each tagged with the direction it slides.
///
/// Fails if either coordinate is off the board or they are not adjacent.
/// Returns `None` when one of the cells is empty.
pub fn swapping_tiles(grid: &Grid, a: Coord, b: Coord) -> EngineResult<Option<(Tile, Tile)>> {
    grid.check_bounds(a)?;
    grid.check_bounds(b)?;
    let (dir_a, dir_b) = is_adjacent(a, b).ok_or(EngineError::IllegalSwap { a, b })?;

    let (Some(kind_a), Some(kind_b)) = (grid.kind_at(a.x, a.y), grid.kind_at(b.x, b.y)) else {
        return Ok(None);
    };
    Ok(Some((
        Tile::on_board(a.x as usize, a.y as usize, kind_a).moving(dir_a),
        Tile::on_board(b.x as usize, b.y as usize, kind_b).moving(dir_b),
    )))
}

/// Would swapping `a` and `b` produce at least one run? The grid is not modified.
pub fn is_legal_swap(grid: &Grid, a: Coord, b: Coord) -> EngineResult<bool> {
    grid.check_bounds(a)?;
    grid.check_bounds(b)?;
    if is_adjacent(a, b).is_none() {
        return Err(EngineError::IllegalSwap { a, b });
    }

    let mut trial = grid.clone();
    trial.swap(a, b)?;
    Ok(has_match(&trial))
}

/// True if any swap anywhere on the board would produce a run.
///
/// A read-only scan of every cell against [`ONE_OFF_PATTERNS`] in both
/// orientations; no swap is performed.
pub fn has_any_legal_move(grid: &Grid) -> bool {
    let same = |cells: [(i32, i32); 3]| {
        let first = grid.kind_at(cells[0].0, cells[0].1);
        first.is_some()
            && cells[1..]
                .iter()
                .all(|&(x, y)| grid.kind_at(x, y) == first)
    };

    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            for &pattern in &ONE_OFF_PATTERNS {
                let as_written = pattern.map(|(dx, dy)| (x + dx, y + dy));
                let transposed = pattern.map(|(dx, dy)| (x + dy, y + dx));
                if same(as_written) || same(transposed) {
                    return true;
                }
            }
        }
    }
    false
}
