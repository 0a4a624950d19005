use serde::Serialize;

use crate::core::Grid;
use crate::session::GameOverReason;

/// Read-only copy of a session for rendering or recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Rows top to bottom; `None` is an empty cell.
    pub cells: Vec<Vec<Option<u8>>>,
    pub score: u32,
    pub moves_made: u32,
    pub max_moves: u32,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub episode_id: u32,
    pub seed: Option<u64>,
    pub has_legal_move: bool,
}

impl GameSnapshot {
    pub(crate) fn board_rows(grid: &Grid) -> Vec<Vec<Option<u8>>> {
        grid.rows()
            .map(|row| row.iter().map(|cell| cell.map(|k| k.index())).collect())
            .collect()
    }

    pub fn moves_left(&self) -> u32 {
        self.max_moves.saturating_sub(self.moves_made)
    }
}
