//! Core rules engine - pure, deterministic, and testable
//!
//! This crate holds the match-3 board rules with **no I/O**: given a seed it
//! always produces the same boards, which makes it easy to test and to
//! replay games.
//!
//! # Module Structure
//!
//! - [`grid`]: `width x height` cell storage and bounds arithmetic
//! - [`matcher`]: detection of maximal horizontal and vertical runs
//! - [`gravity`]: column compaction and the per-column fall plan
//! - [`generator`]: constrained random refill of vacated cells
//! - [`moves`]: swap adjacency, swap legality, and the stuck-board check
//! - [`scoring`]: points for cleared runs
//! - [`rng`]: the seedable random source
//!
//! # Example
//!
//! ```
//! use veggie_saga_core::{find_matches, gravity, has_any_legal_move, Grid};
//!
//! let mut grid = Grid::from_ascii(&[
//!     "0123",
//!     "1111",
//!     "2301",
//! ]).unwrap();
//!
//! let matches = find_matches(&grid);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].len(), 4);
//!
//! for at in &matches[0].coords {
//!     grid.set_cell(*at, None).unwrap();
//! }
//! let missing = gravity::compact(&mut grid);
//! assert_eq!(missing, vec![1, 1, 1, 1]);
//! assert_eq!(grid.to_string(), "....\n0123\n2301");
//! assert!(!has_any_legal_move(&grid));
//! ```

pub mod error;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod moves;
pub mod rng;
pub mod scoring;

pub use veggie_saga_types as types;

// Re-export commonly used types for convenience
pub use error::{EngineError, EngineResult};
pub use gravity::{compact, compute_drops, ColumnDrop, Fall};
pub use grid::Grid;
pub use matcher::{cleared_cells, find_matches, has_match, MatchSet, Orientation};
pub use moves::{has_any_legal_move, is_adjacent, is_legal_swap, swapping_tiles};
pub use rng::SessionRng;
pub use scoring::{run_score, score_pass, PassScore};
