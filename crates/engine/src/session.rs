//! Game session - the cascade state machine
//!
//! A session owns one board. A swap request runs to completion inside one
//! call: the swap is tried on a clone of the board, and if it matches
//! nothing the clone is dropped and [`SwapOutcome::Reverted`] comes back.
//! Otherwise the clone is committed and resolved pass by pass until a pass
//! finds no matches; each pass is reported as a [`CascadePass`]. Afterwards
//! the session checks the move limit and whether any legal swap remains;
//! either one failing moves it to [`Phase::GameOver`].
//!
//! Sessions share nothing, so any number of games can run side by side.

use rand::RngCore;
use serde::Serialize;

use crate::config::GameConfig;
use crate::core::{
    cleared_cells, compact, compute_drops, find_matches, generator, has_any_legal_move, moves,
    score_pass, EngineError, EngineResult, Grid, MatchSet, SessionRng,
};
use crate::delta::DeltaStream;
use crate::snapshot::GameSnapshot;
use crate::types::{BoardDelta, Coord, Kind};

/// How many fresh layouts a new game tries before accepting a stuck board.
pub const MAX_LAYOUT_ATTEMPTS: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// No swap anywhere on the board would produce a match.
    NoMovesLeft,
    /// The committed-swap limit was reached.
    MoveLimitReached,
}

/// Whether the session accepts swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Awaiting a swap request.
    Idle,
    /// Terminal; every further swap is refused.
    GameOver { final_score: u32, reason: GameOverReason },
}

/// One clear -> gravity -> refill pass of a cascade.
#[derive(Debug, Clone, Serialize)]
pub struct CascadePass {
    pub index: u32,
    pub matches: Vec<MatchSet>,
    pub score: u32,
    pub deltas: DeltaStream,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SwapOutcome {
    /// The swap made no match; the board is unchanged.
    Reverted { a: Coord, b: Coord },
    /// The swap matched and the board resolved to a stable state.
    Committed {
        /// The two tiles trading places.
        swap: DeltaStream,
        passes: Vec<CascadePass>,
        score_gained: u32,
        game_over: Option<GameOverReason>,
    },
}

impl SwapOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, SwapOutcome::Committed { .. })
    }

    pub fn score_gained(&self) -> u32 {
        match self {
            SwapOutcome::Reverted { .. } => 0,
            SwapOutcome::Committed { score_gained, .. } => *score_gained,
        }
    }

    /// Every delta in animation order: the swap, then each pass in turn.
    pub fn into_deltas(self) -> DeltaStream {
        match self {
            SwapOutcome::Reverted { .. } => DeltaStream::default(),
            SwapOutcome::Committed { swap, passes, .. } => {
                let all: Vec<BoardDelta> = swap
                    .chain(passes.into_iter().flat_map(|pass| pass.deltas))
                    .collect();
                DeltaStream::new(all)
            }
        }
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession<R = SessionRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    seed: Option<u64>,
    score: u32,
    moves_made: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    phase: Phase,
    /// Deltas of the initial fill, until taken.
    opening: DeltaStream,
}

impl GameSession<SessionRng> {
    /// Start a game on a freshly generated board.
    pub fn new(config: GameConfig) -> EngineResult<Self> {
        config.validate()?;
        let rng = Self::seeded_rng(&config);
        let seed = Some(rng.seed());
        let mut session = Self::empty(config, rng, seed)?;
        session.populate();
        Ok(session)
    }

    /// Start a game on a given board. Empty cells are filled, and any runs
    /// already on the board are resolved before play begins without scoring.
    pub fn from_grid(config: GameConfig, grid: Grid) -> EngineResult<Self> {
        config.validate()?;
        let rng = Self::seeded_rng(&config);
        let seed = Some(rng.seed());
        Self::adopt(config, grid, rng, seed)
    }

    fn seeded_rng(config: &GameConfig) -> SessionRng {
        config
            .seed
            .map(SessionRng::new)
            .unwrap_or_else(SessionRng::from_random)
    }
}

impl<R: RngCore> GameSession<R> {
    /// Start a game drawing tiles from a caller-supplied random source.
    pub fn with_rng(config: GameConfig, rng: R) -> EngineResult<Self> {
        config.validate()?;
        let mut session = Self::empty(config, rng, None)?;
        session.populate();
        Ok(session)
    }

    /// [`GameSession::from_grid`] with a caller-supplied random source.
    pub fn from_grid_with_rng(config: GameConfig, grid: Grid, rng: R) -> EngineResult<Self> {
        config.validate()?;
        Self::adopt(config, grid, rng, None)
    }

    fn empty(config: GameConfig, rng: R, seed: Option<u64>) -> EngineResult<Self> {
        Ok(Self {
            grid: Grid::new(config.width, config.height)?,
            config,
            rng,
            seed,
            score: 0,
            moves_made: 0,
            episode_id: 0,
            phase: Phase::Idle,
            opening: DeltaStream::default(),
        })
    }

    fn adopt(config: GameConfig, grid: Grid, rng: R, seed: Option<u64>) -> EngineResult<Self> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(EngineError::InvalidConfiguration(format!(
                "board is {}x{} but the configuration expects {}x{}",
                grid.width(),
                grid.height(),
                config.width,
                config.height
            )));
        }
        if let Some(kind) = grid.max_kind().filter(|k| k.index() >= config.kind_count) {
            return Err(EngineError::InvalidConfiguration(format!(
                "board holds kind {kind} but only {} kinds are configured",
                config.kind_count
            )));
        }

        let mut session = Self::empty(config, rng, seed)?;
        session.grid = grid;

        let mut opening = session.refill();
        let leftovers = find_matches(&session.grid);
        for pass in session.resolve(leftovers) {
            opening.extend(pass.deltas);
        }
        session.score = 0;
        session.opening = DeltaStream::new(opening);
        session.settle();
        Ok(session)
    }

    /// Fill the all-empty board, retrying layouts that start out stuck.
    fn populate(&mut self) {
        let mut opening = Vec::new();
        for _ in 0..MAX_LAYOUT_ATTEMPTS {
            self.grid.clear();
            opening = self.refill();
            if has_any_legal_move(&self.grid) {
                break;
            }
        }
        self.opening = DeltaStream::new(opening);
        self.settle();
    }

    /// Begin a new game with the same configuration.
    ///
    /// The random source carries on from where it was, so a seeded session
    /// replays the same sequence of games. Returns the deltas of the new fill.
    pub fn restart(&mut self) -> DeltaStream {
        self.score = 0;
        self.moves_made = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::Idle;
        self.populate();
        self.take_opening()
    }

    /// Deltas that populated the board at game start. Empty once taken.
    pub fn take_opening(&mut self) -> DeltaStream {
        std::mem::take(&mut self.opening)
    }

    /// Try to swap the tiles at `a` and `b`.
    ///
    /// Out-of-board or non-adjacent coordinates are rejected without touching
    /// the board. A swap that makes no match is reverted and is not an error.
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> EngineResult<SwapOutcome> {
        if let Phase::GameOver { final_score, .. } = self.phase {
            return Err(EngineError::GameOver { final_score });
        }
        self.grid.check_bounds(a)?;
        self.grid.check_bounds(b)?;
        if moves::is_adjacent(a, b).is_none() {
            return Err(EngineError::IllegalSwap { a, b });
        }

        let mut trial = self.grid.clone();
        trial.swap(a, b)?;
        let matches = find_matches(&trial);

        if matches.is_empty() {
            return Ok(SwapOutcome::Reverted { a, b });
        }

        let swap = self.swap_deltas(a, b);
        self.grid = trial;
        self.moves_made += 1;

        let score_before = self.score;
        let passes = self.resolve(matches);
        let game_over = self.settle();

        Ok(SwapOutcome::Committed {
            swap: DeltaStream::new(swap),
            passes,
            score_gained: self.score - score_before,
            game_over,
        })
    }

    fn swap_deltas(&self, a: Coord, b: Coord) -> Vec<BoardDelta> {
        let moved = |from: Coord, to: Coord| {
            self.grid
                .kind_at(from.x, from.y)
                .map(|kind| BoardDelta::TileMoved { from, to, kind })
        };
        moved(a, b).into_iter().chain(moved(b, a)).collect()
    }

    /// Clear, drop and refill until a pass finds nothing.
    ///
    /// Refilled tiles never match their neighbors when placed, so passes
    /// continue only while gravity lines up existing tiles.
    fn resolve(&mut self, mut matches: Vec<MatchSet>) -> Vec<CascadePass> {
        let mut passes = Vec::new();
        let mut index = 0;

        while !matches.is_empty() {
            let awards = score_pass(&matches);
            let mut deltas: Vec<BoardDelta> = matches
                .iter()
                .zip(&awards.per_run)
                .map(|(set, score)| BoardDelta::TileCleared {
                    coords: set.coords.clone(),
                    score: *score,
                })
                .collect();

            for at in cleared_cells(&matches) {
                // Matched coordinates come from this grid.
                let _ = self.grid.set_cell(at, None);
            }
            deltas.extend(self.refill());
            self.score = self.score.saturating_add(awards.total);

            let next = find_matches(&self.grid);
            passes.push(CascadePass {
                index,
                matches: std::mem::replace(&mut matches, next),
                score: awards.total,
                deltas: DeltaStream::new(deltas),
            });
            index += 1;
        }
        passes
    }

    /// Gravity then refill, as deltas: falls bottom-most first per column,
    /// then spawns per column in the order they enter.
    fn refill(&mut self) -> Vec<BoardDelta> {
        let drops = compute_drops(&self.grid);
        let mut deltas: Vec<BoardDelta> = drops
            .iter()
            .flat_map(|plan| plan.moves())
            .map(|(from, to, kind)| BoardDelta::TileMoved { from, to, kind })
            .collect();

        compact(&mut self.grid);
        let slots = generator::fill(&mut self.grid, self.config.kind_count, &mut self.rng);

        for (plan, spawned) in drops.iter().zip(slots) {
            deltas.extend(spawned.into_iter().enumerate().map(|(i, kind)| {
                BoardDelta::TileSpawned {
                    column: plan.column,
                    kind,
                    landing_row: plan.missing - 1 - i,
                }
            }));
        }
        deltas
    }

    /// Enter `Idle`, or `GameOver` if the move limit is spent or the board is stuck.
    fn settle(&mut self) -> Option<GameOverReason> {
        let reason = if self.moves_made >= self.config.max_moves {
            Some(GameOverReason::MoveLimitReached)
        } else if !has_any_legal_move(&self.grid) {
            Some(GameOverReason::NoMovesLeft)
        } else {
            None
        };
        self.phase = match reason {
            Some(reason) => Phase::GameOver {
                final_score: self.score,
                reason,
            },
            None => Phase::Idle,
        };
        reason
    }

    /// Whether any swap on the current board would make a match.
    pub fn has_legal_move(&self) -> bool {
        has_any_legal_move(&self.grid)
    }

    /// Read-only view of the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn kind_at(&self, at: Coord) -> Option<Kind> {
        self.grid.kind_at(at.x, at.y)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let reason = match self.phase {
            Phase::GameOver { reason, .. } => Some(reason),
            _ => None,
        };
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            cells: GameSnapshot::board_rows(&self.grid),
            score: self.score,
            moves_made: self.moves_made,
            max_moves: self.config.max_moves,
            game_over: reason.is_some(),
            game_over_reason: reason,
            episode_id: self.episode_id,
            seed: self.seed,
            has_legal_move: self.has_legal_move(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn moves_left(&self) -> u32 {
        self.config.max_moves.saturating_sub(self.moves_made)
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Seed of the session's own random source; `None` for injected sources.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default().with_seed(12345)
    }

    #[test]
    fn test_new_game_is_full_and_stable() {
        let session = GameSession::new(config()).unwrap();
        assert!(session.grid().is_full());
        assert!(find_matches(session.grid()).is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves_made(), 0);
        assert_eq!(session.seed(), Some(12345));
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = GameSession::new(config()).unwrap();
        let b = GameSession::new(config()).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_opening_deltas_spawn_every_cell_once() {
        let mut session = GameSession::new(config()).unwrap();
        let opening: Vec<_> = session.take_opening().collect();
        assert_eq!(opening.len(), 64);
        assert!(opening
            .iter()
            .all(|d| matches!(d, BoardDelta::TileSpawned { .. })));
        assert!(session.take_opening().is_exhausted());
    }

    #[test]
    fn test_restart_bumps_episode_and_resets_counters() {
        let mut session = GameSession::new(config()).unwrap();
        let first = session.grid().clone();
        let opening = session.restart();
        assert_eq!(opening.len(), 64);
        assert_eq!(session.episode_id(), 1);
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves_made(), 0);
        assert_ne!(session.grid(), &first);
    }

    #[test]
    fn test_invalid_config_fails_before_any_board_exists() {
        let err = GameSession::new(GameConfig::default().with_kind_count(3)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_grid_rejects_mismatched_board() {
        let grid = Grid::new(4, 4).unwrap();
        let err = GameSession::from_grid(config(), grid).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));

        let grid = Grid::from_ascii(&["99999", "99999", "99999", "99999", "99999"]).unwrap();
        let err = GameSession::from_grid(config().with_size(5, 5), grid).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }
}
