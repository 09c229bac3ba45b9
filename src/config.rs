use crate::evaluation::Weights;
use clap::ValueEnum;
use std::time::Duration;

/// Depth the engines never search beyond, however fast they answer.
pub const ABSOLUTE_MAX_DEPTH: u16 = 20;

pub const DEFAULT_DIFFICULTY_RATE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Plain minimax, random choice among equally scored best moves
    Minimax,
    /// Alpha-beta pruned minimax, random choice among equally scored best moves
    AlphaBeta,
    /// Picks a move at a percentile of the root move scores given by the difficulty rate
    Adaptive,
}

/// Where the difficulty rate of an adaptive engine comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Difficulty {
    /// Follow the rate tracked from the opponent's moves
    Adaptive,
    /// Always play at this rate, 0 (weakest) to 100 (strongest)
    Fixed(f32),
}

/// Bounds of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u16,
    /// Checked cooperatively between sibling moves; `None` searches to full depth.
    pub time_budget: Option<Duration>,
}

impl SearchLimits {
    pub fn depth(max_depth: u16) -> Self {
        SearchLimits {
            max_depth,
            time_budget: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub algorithm: Algorithm,
    pub initial_depth: u16,
    pub time_budget: Option<Duration>,
    /// Answering faster than this (without capturing) makes the engine search one ply deeper.
    pub min_thinking_time: Duration,
    /// Answering slower than this makes the engine search one ply shallower.
    pub max_thinking_time: Duration,
    pub difficulty: Difficulty,
    pub weights: Weights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            algorithm: Algorithm::Adaptive,
            initial_depth: 4,
            time_budget: Some(Duration::from_secs(3)),
            min_thinking_time: Duration::from_millis(500),
            max_thinking_time: Duration::from_secs(2),
            difficulty: Difficulty::Adaptive,
            weights: Weights::default(),
        }
    }
}

impl EngineConfig {
    pub fn limits(&self, max_depth: u16) -> SearchLimits {
        SearchLimits {
            max_depth,
            time_budget: self.time_budget,
        }
    }
}
