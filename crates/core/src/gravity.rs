//! Gravity - compacting columns downward
//!
//! Each column is handled on its own: tiles keep their top-to-bottom order
//! and slide down over the gaps beneath them, leaving every empty cell at the
//! top of the column. Tiles never change column.

use crate::grid::Grid;
use crate::types::{Cell, Coord, Kind};

/// A tile that lands lower in its column once gravity applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub kind: Kind,
    pub from_row: usize,
    pub to_row: usize,
}

impl Fall {
    pub fn distance(&self) -> usize {
        self.to_row - self.from_row
    }
}

/// What gravity does to one column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDrop {
    pub column: usize,
    /// Tiles that move, bottom-most first. Tiles already resting are omitted.
    pub falls: Vec<Fall>,
    /// Empty cells left at the top, i.e. how many new tiles the column needs.
    pub missing: usize,
}

impl ColumnDrop {
    /// `(from, to)` coordinates of each falling tile.
    pub fn moves(&self) -> impl Iterator<Item = (Coord, Coord, Kind)> + '_ {
        let x = self.column as i32;
        self.falls.iter().map(move |fall| {
            (
                Coord::new(x, fall.from_row as i32),
                Coord::new(x, fall.to_row as i32),
                fall.kind,
            )
        })
    }
}

/// Tiles of every column, top to bottom, with gaps removed.
pub fn settled_columns(grid: &Grid) -> Vec<Vec<Kind>> {
    (0..grid.width())
        .map(|x| {
            (0..grid.height())
                .filter_map(|y| grid.kind_at(x as i32, y as i32))
                .collect()
        })
        .collect()
}

/// Plan gravity without touching the grid.
pub fn compute_drops(grid: &Grid) -> Vec<ColumnDrop> {
    let height = grid.height();
    (0..grid.width())
        .map(|x| {
            let mut falls = Vec::new();
            // Walk bottom-up; `landing` is the next free row from the bottom.
            let mut landing = height;
            for y in (0..height).rev() {
                if let Some(kind) = grid.kind_at(x as i32, y as i32) {
                    landing -= 1;
                    if landing != y {
                        falls.push(Fall {
                            kind,
                            from_row: y,
                            to_row: landing,
                        });
                    }
                }
            }
            ColumnDrop {
                column: x,
                falls,
                missing: landing,
            }
        })
        .collect()
}

/// Apply gravity in place. Returns how many cells each column is missing.
pub fn compact(grid: &mut Grid) -> Vec<usize> {
    let height = grid.height();
    settled_columns(grid)
        .into_iter()
        .enumerate()
        .map(|(x, tiles)| {
            let missing = height - tiles.len();
            let column: Vec<Cell> = std::iter::repeat(None)
                .take(missing)
                .chain(tiles.into_iter().map(Some))
                .collect();
            grid.write_column(x, &column);
            missing
        })
        .collect()
}
