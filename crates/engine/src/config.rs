//! Game configuration recognized at game creation

use serde::Serialize;

use crate::core::{EngineError, EngineResult};
use crate::types::{
    DEFAULT_HEIGHT, DEFAULT_KIND_COUNT, DEFAULT_MAX_MOVES, DEFAULT_WIDTH, MIN_KIND_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub kind_count: u8,
    /// Committed swaps before the game is forced to end.
    pub max_moves: u32,
    /// Fixed seed for reproducible games; `None` draws one at creation.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            kind_count: DEFAULT_KIND_COUNT,
            max_moves: DEFAULT_MAX_MOVES,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_kind_count(mut self, kind_count: u8) -> Self {
        self.kind_count = kind_count;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(EngineError::InvalidConfiguration(format!(
                "board dimensions {}x{} are too large",
                self.width, self.height
            )));
        }
        if self.kind_count < MIN_KIND_COUNT {
            return Err(EngineError::InvalidConfiguration(format!(
                "need at least {MIN_KIND_COUNT} tile kinds, got {}",
                self.kind_count
            )));
        }
        if self.max_moves == 0 {
            return Err(EngineError::InvalidConfiguration(
                "max_moves must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
