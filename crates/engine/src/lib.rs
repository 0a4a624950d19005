//! Cascade engine - game sessions built on the core rules
//!
//! A [`GameSession`] owns one board, a score, a move counter and a random
//! source. The presentation layer asks it to swap two cells and gets back a
//! [`SwapOutcome`]: either the swap was reverted, or it committed and the
//! board resolved through one or more [`CascadePass`]es, each carrying the
//! [`BoardDelta`](crate::types::BoardDelta)s needed to animate it.
//!
//! # Example
//!
//! ```
//! use veggie_saga_engine::{GameConfig, GameSession, Phase};
//!
//! let mut game = GameSession::new(GameConfig::default().with_seed(7)).unwrap();
//! let opening: Vec<_> = game.take_opening().collect();
//! assert_eq!(opening.len(), 64);
//!
//! assert!(game.grid().is_full());
//! assert!(matches!(game.phase(), Phase::Idle | Phase::GameOver { .. }));
//! ```

pub mod config;
pub mod delta;
pub mod session;
pub mod snapshot;

pub use veggie_saga_core as core;
pub use veggie_saga_types as types;

pub use config::GameConfig;
pub use delta::DeltaStream;
pub use session::{CascadePass, GameOverReason, GameSession, Phase, SwapOutcome, MAX_LAYOUT_ATTEMPTS};
pub use snapshot::GameSnapshot;
