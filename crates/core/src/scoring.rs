//! Scoring module - points awarded for cleared runs
//!
//! A run of three scores `BASE_RUN_SCORE`; each tile beyond three adds
//! `EXTRA_TILE_SCORE`. Every reported run scores on its own, so an L or T
//! shape earns both of its runs even though the shared tile is cleared once.

use crate::matcher::MatchSet;
use crate::types::{BASE_RUN_SCORE, EXTRA_TILE_SCORE, MIN_RUN};

/// Score for clearing one run of `len` tiles; runs shorter than three score nothing.
pub fn run_score(len: usize) -> u32 {
    if len < MIN_RUN {
        return 0;
    }
    let extra = (len - MIN_RUN) as u32;
    BASE_RUN_SCORE.saturating_add(EXTRA_TILE_SCORE.saturating_mul(extra))
}

/// Score for one resolution pass, split per run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassScore {
    /// Award of each run, in the order the runs were reported.
    pub per_run: Vec<u32>,
    pub total: u32,
}

pub fn score_pass(matches: &[MatchSet]) -> PassScore {
    let per_run: Vec<u32> = matches.iter().map(|set| run_score(set.len())).collect();
    let total = per_run.iter().fold(0u32, |acc, s| acc.saturating_add(*s));
    PassScore { per_run, total }
}
