//! Grid module - the board's cell storage
//!
//! The grid is a `width x height` matrix where each cell is empty or holds a tile kind.
//! Uses a flat vector in row-major order (`y * width + x`) for cache locality.
//! Coordinates: `x` ranges `0..width` (left to right), `y` ranges `0..height` (top to bottom).
//! Tiles fall toward increasing `y`.

use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::types::{Cell, Coord, Kind};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new all-empty grid
    pub fn new(width: usize, height: usize) -> EngineResult<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "board dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Build a grid from rows listed top to bottom.
    ///
    /// Every row must have the same non-zero length.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> EngineResult<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(EngineError::InvalidConfiguration(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            let start = y * width;
            grid.cells[start..start + width].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Build a grid from text rows: `'0'..='9'` are kinds, `'.'` is empty.
    ///
    /// ```
    /// use veggie_saga_core::Grid;
    ///
    /// let grid = Grid::from_ascii(&["01.", "210"]).unwrap();
    /// assert_eq!(grid.width(), 3);
    /// assert_eq!(grid.height(), 2);
    /// assert_eq!(grid.get(2, 0), Some(None));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> EngineResult<Self> {
        let parsed = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '.' => Ok(None),
                        '0'..='9' => Ok(Some(Kind::new(c as u8 - b'0'))),
                        other => Err(EngineError::InvalidConfiguration(format!(
                            "unexpected board character {other:?}"
                        ))),
                    })
                    .collect::<EngineResult<Vec<Cell>>>()
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Self::from_rows(&parsed)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    pub fn contains(&self, at: Coord) -> bool {
        !self.is_out_of_bounds(at.x, at.y)
    }

    /// Fail with `OutOfBounds` unless `at` is on the board.
    pub fn check_bounds(&self, at: Coord) -> EngineResult<()> {
        if self.contains(at) {
            Ok(())
        } else {
            Err(self.out_of_bounds(at.x, at.y))
        }
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> EngineError {
        EngineError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds, `Some(None)` for an empty cell
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Kind at (x, y), folding "off the board" and "empty" into `None`.
    #[inline(always)]
    pub fn kind_at(&self, x: i32, y: i32) -> Option<Kind> {
        self.get(x, y).flatten()
    }

    pub fn cell(&self, at: Coord) -> Option<Cell> {
        self.get(at.x, at.y)
    }

    /// Set cell at position (x, y)
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> EngineResult<()> {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                Ok(())
            }
            None => Err(self.out_of_bounds(x, y)),
        }
    }

    pub fn set_cell(&mut self, at: Coord, cell: Cell) -> EngineResult<()> {
        self.set(at.x, at.y, cell)
    }

    /// Exchange the contents of two cells. Neither cell changes unless both are on the board.
    pub fn swap(&mut self, a: Coord, b: Coord) -> EngineResult<()> {
        let ia = self.index(a.x, a.y).ok_or_else(|| self.out_of_bounds(a.x, a.y))?;
        let ib = self.index(b.x, b.y).ok_or_else(|| self.out_of_bounds(b.x, b.y))?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Check if position is empty (within bounds and holding no tile)
    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Number of empty cells on the board
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Column `x` top to bottom, or `None` when `x` is off the board.
    pub fn column(&self, x: usize) -> Option<Vec<Cell>> {
        if x >= self.width {
            return None;
        }
        Some((0..self.height).map(|y| self.cells[y * self.width + x]).collect())
    }

    /// Overwrite column `x` top to bottom; `column` must be exactly `height` long.
    pub(crate) fn write_column(&mut self, x: usize, column: &[Cell]) {
        debug_assert_eq!(column.len(), self.height);
        for (y, cell) in column.iter().enumerate() {
            self.cells[y * self.width + x] = *cell;
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row slices top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Largest kind index stored on the board, if any tile is present.
    pub fn max_kind(&self) -> Option<Kind> {
        self.cells.iter().flatten().copied().max()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                match cell {
                    Some(kind) if kind.index() < 10 => write!(f, "{}", kind)?,
                    Some(_) => write!(f, "#")?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}
