use thiserror::Error;

use crate::types::Coord;

/// Errors reported by the rules engine.
///
/// Every error is local to the failing call: no board state changes when one
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("cells {a} and {b} are not orthogonally adjacent")]
    IllegalSwap { a: Coord, b: Coord },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("game is over (final score {final_score})")]
    GameOver { final_score: u32 },
}

impl EngineError {
    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::OutOfBounds { .. } => "out_of_bounds",
            EngineError::IllegalSwap { .. } => "illegal_swap",
            EngineError::InvalidConfiguration(_) => "invalid_configuration",
            EngineError::GameOver { .. } => "game_over",
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
