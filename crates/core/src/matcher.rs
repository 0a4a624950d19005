//! Match detection - runs of three or more identical adjacent tiles
//!
//! Every maximal horizontal and vertical run is reported exactly once per
//! orientation, however long it is. A tile shared by a horizontal and a
//! vertical run (L and T shapes) appears in both sets; [`cleared_cells`]
//! folds the sets into the cells to empty, each listed once.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Coord, Kind, MIN_RUN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// One maximal run of same-kind tiles, coordinates in board order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSet {
    pub kind: Kind,
    pub orientation: Orientation,
    pub coords: Vec<Coord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.coords.contains(&at)
    }
}

/// Scan the whole grid for runs.
///
/// Cells are visited column by column, top to bottom; at each cell the
/// horizontal run starting there is checked before the vertical one. A walk
/// only starts on the first cell of a run, so a run of five is one set of
/// five rather than three overlapping triplets.
pub fn find_matches(grid: &Grid) -> Vec<MatchSet> {
    let mut found = Vec::new();
    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                if let Some(set) = run_starting_at(grid, x, y, orientation) {
                    found.push(set);
                }
            }
        }
    }
    found
}

/// True if at least one run exists; stops at the first one.
pub fn has_match(grid: &Grid) -> bool {
    (0..grid.width() as i32).any(|x| {
        (0..grid.height() as i32).any(|y| {
            let Some(kind) = grid.kind_at(x, y) else {
                return false;
            };
            [Orientation::Horizontal, Orientation::Vertical]
                .into_iter()
                .any(|o| {
                    let (dx, dy) = o.step();
                    grid.kind_at(x + dx, y + dy) == Some(kind)
                        && grid.kind_at(x + 2 * dx, y + 2 * dy) == Some(kind)
                })
        })
    })
}

fn run_starting_at(grid: &Grid, x: i32, y: i32, orientation: Orientation) -> Option<MatchSet> {
    let kind = grid.kind_at(x, y)?;
    let (dx, dy) = orientation.step();

    // Interior cells of a run already reported from its first cell.
    if grid.kind_at(x - dx, y - dy) == Some(kind) {
        return None;
    }

    let mut coords = Vec::with_capacity(MIN_RUN);
    let mut at = Coord::new(x, y);
    while grid.kind_at(at.x, at.y) == Some(kind) {
        coords.push(at);
        at = at.offset(dx, dy);
    }

    (coords.len() >= MIN_RUN).then_some(MatchSet {
        kind,
        orientation,
        coords,
    })
}

/// Union of all matched coordinates, each exactly once, in board order.
pub fn cleared_cells(matches: &[MatchSet]) -> Vec<Coord> {
    matches
        .iter()
        .flat_map(|set| set.coords.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_cells_do_not_restart_runs() {
        let grid = Grid::from_ascii(&["11110"]).unwrap();
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].len(), 4);
        assert_eq!(matches[0].coords[0], Coord::new(0, 0));
    }

    #[test]
    fn test_two_pairs_are_not_a_run() {
        let grid = Grid::from_ascii(&["1101", "0010", "1100"]).unwrap();
        assert!(find_matches(&grid).is_empty());
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_empty_cells_never_match() {
        let grid = Grid::from_ascii(&["...", "...", "..."]).unwrap();
        assert!(find_matches(&grid).is_empty());
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_cleared_cells_dedups_intersection() {
        // T shape: row 0 run and column 1 run share (1, 0).
        let grid = Grid::from_ascii(&["222", "320", "424"]).unwrap();
        let matches = find_matches(&grid);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.contains(Coord::new(1, 0))));

        let cleared = cleared_cells(&matches);
        assert_eq!(cleared.len(), 5);
    }
}
