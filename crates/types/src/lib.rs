//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no game logic, so they can be shared by the
//! rules engine, a presentation layer, or anything that records games.
//!
//! # Coordinates
//!
//! - **x**: column, 0 at the left edge
//! - **y**: row, 0 at the top edge; tiles fall toward increasing `y`
//!
//! Coordinates are signed so that neighbor and pattern offsets can step off
//! the board without wrapping; the grid treats anything outside
//! `[0, width) x [0, height)` as off-board.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 8 | Columns on a standard board |
//! | `DEFAULT_HEIGHT` | 8 | Rows on a standard board |
//! | `DEFAULT_KIND_COUNT` | 7 | Distinct tile kinds |
//! | `MIN_KIND_COUNT` | 5 | Fewest kinds the refill rule can work with |
//! | `DEFAULT_MAX_MOVES` | 100 | Committed swaps before a forced game over |
//!
//! # Examples
//!
//! ```
//! use veggie_saga_types::{Coord, Direction, Kind, TileRow};
//!
//! let a = Coord::new(3, 4);
//! let b = a.step(Direction::Right);
//! assert_eq!(b, Coord::new(4, 4));
//! assert_eq!(a.manhattan(b), 1);
//!
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert_eq!(Kind::new(2).index(), 2);
//! assert_eq!(TileRow::OnBoard(5).row(), Some(5));
//! assert_eq!(TileRow::Pending.row(), None);
//! ```

use std::fmt;

use serde::Serialize;

/// Board width in cells (8 columns)
pub const DEFAULT_WIDTH: usize = 8;

/// Board height in cells (8 rows)
pub const DEFAULT_HEIGHT: usize = 8;

/// Number of distinct tile kinds on a standard board
pub const DEFAULT_KIND_COUNT: u8 = 7;

/// Minimum number of kinds.
///
/// A refilled cell excludes up to four neighbor kinds, so five kinds always
/// leave at least one candidate.
pub const MIN_KIND_COUNT: u8 = 5;

/// Committed swaps allowed before the game is forced to end
pub const DEFAULT_MAX_MOVES: u32 = 100;

/// Shortest run that counts as a match
pub const MIN_RUN: usize = 3;

/// Points for a run of exactly `MIN_RUN` tiles
pub const BASE_RUN_SCORE: u32 = 10;

/// Points for every tile in a run beyond `MIN_RUN`
pub const EXTRA_TILE_SCORE: u32 = 10;

/// A tile kind (type/colour/species), an integer tag in `[0, kind_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Kind(u8);

impl Kind {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(Kind)`: Cell holding a tile of that kind
pub type Cell = Option<Kind>;

/// A board coordinate (column `x`, row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighboring coordinate one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Grid distance; saturates at `u32::MAX` for coordinates far off the board.
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal movement direction of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step `(dx, dy)`; `Up` decreases `y`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Vertical placement of a transient tile.
///
/// `Pending` is a tile queued above the board, about to enter row 0 moving
/// down. It never names a committed grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileRow {
    OnBoard(usize),
    Pending,
}

impl TileRow {
    pub fn row(self) -> Option<usize> {
        match self {
            TileRow::OnBoard(row) => Some(row),
            TileRow::Pending => None,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, TileRow::Pending)
    }
}

/// A tile in motion, used to describe swaps and spawns to a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub x: usize,
    pub row: TileRow,
    pub kind: Kind,
    pub direction: Option<Direction>,
}

impl Tile {
    pub fn on_board(x: usize, y: usize, kind: Kind) -> Self {
        Self {
            x,
            row: TileRow::OnBoard(y),
            kind,
            direction: None,
        }
    }

    /// A tile waiting above column `x`, headed down.
    pub fn pending(x: usize, kind: Kind) -> Self {
        Self {
            x,
            row: TileRow::Pending,
            kind,
            direction: Some(Direction::Down),
        }
    }

    pub fn moving(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// One discrete board change, in the order a renderer should animate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardDelta {
    /// A matched run was removed; `score` is what this run alone awarded.
    TileCleared { coords: Vec<Coord>, score: u32 },
    /// An existing tile moved from one cell to another (swap or gravity).
    TileMoved { from: Coord, to: Coord, kind: Kind },
    /// A new tile entered column `column` from above and settled at `landing_row`.
    TileSpawned {
        column: usize,
        kind: Kind,
        landing_row: usize,
    },
}

impl BoardDelta {
    /// The spawned tile as it looks before entering the board.
    pub fn spawned_tile(&self) -> Option<Tile> {
        match *self {
            BoardDelta::TileSpawned { column, kind, .. } => Some(Tile::pending(column, kind)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardDelta::TileCleared { .. } => "tile_cleared",
            BoardDelta::TileMoved { .. } => "tile_moved",
            BoardDelta::TileSpawned { .. } => "tile_spawned",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_board_defaults() {
        assert_eq!(DEFAULT_WIDTH, 8);
        assert_eq!(DEFAULT_HEIGHT, 8);
        assert_eq!(DEFAULT_KIND_COUNT, 7);
        assert_eq!(MIN_KIND_COUNT, 5);
        assert_eq!(DEFAULT_MAX_MOVES, 100);
    }

    #[test]
    fn direction_steps_and_opposites() {
        let origin = Coord::new(2, 2);
        for dir in Direction::ALL {
            let there = origin.step(dir);
            assert_eq!(origin.manhattan(there), 1);
            assert_eq!(there.step(dir.opposite()), origin);
        }
        assert_eq!(origin.step(Direction::Up), Coord::new(2, 1));
    }

    #[test]
    fn manhattan_saturates_far_off_board() {
        let far = Coord::new(i32::MIN, i32::MIN);
        assert_eq!(Coord::new(i32::MAX, i32::MAX).manhattan(far), u32::MAX);
        assert_eq!(Coord::new(i32::MAX, 0).manhattan(Coord::new(i32::MIN, 0)), u32::MAX);
    }

    #[test]
    fn pending_tile_has_no_row() {
        let tile = Tile::pending(3, Kind::new(1));
        assert!(tile.row.is_pending());
        assert_eq!(tile.row.row(), None);
        assert_eq!(tile.direction, Some(Direction::Down));
    }

    #[test]
    fn spawn_delta_exposes_pending_tile() {
        let delta = BoardDelta::TileSpawned {
            column: 4,
            kind: Kind::new(2),
            landing_row: 1,
        };
        assert_eq!(delta.spawned_tile(), Some(Tile::pending(4, Kind::new(2))));
        assert_eq!(delta.as_str(), "tile_spawned");

        let cleared = BoardDelta::TileCleared {
            coords: vec![],
            score: 10,
        };
        assert_eq!(cleared.spawned_tile(), None);
    }
}
