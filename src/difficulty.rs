use crate::algorithms::distinct_scores;
use crate::config::DEFAULT_DIFFICULTY_RATE;
use crate::moves::{Move, ScoredMove};

// -------------------------------------
// Difficulty tracking
// ------------------------------------
//
// Every move of the tracked player is ranked among the distinct scores of
// all moves that were available to them. The ranks (as percentiles) are
// averaged with weights growing linearly with recency, so the engine follows
// the player's current strength.

/// Ranks `chosen` among `root` and returns the updated difficulty rate.
/// The rate stays unchanged, and `history` untouched, if the move is not
/// found in `root` or if every root move has the same score.
pub fn update_difficulty_rate(
    chosen: &Move,
    root: &[ScoredMove],
    rate: f32,
    history: &mut Vec<f32>,
) -> f32 {
    let score = match root
        .iter()
        .find(|m| m.mv.as_ref().map_or(false, |mv| mv.same_squares(chosen)))
    {
        Some(m) => m.score,
        None => return rate,
    };

    let distinct = distinct_scores(root);
    if distinct.len() < 2 {
        return rate;
    }
    let rank = match distinct.iter().position(|s| *s == score) {
        Some(rank) => rank,
        None => return rate,
    };

    history.push(rank as f32 * 100.0 / (distinct.len() - 1) as f32);
    recency_weighted_mean(history)
}

// The i-th percentile (counting from 1) is weighted by i.
fn recency_weighted_mean(history: &[f32]) -> f32 {
    let (weighted, total) = history
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(weighted, total), (i, percentile)| {
            let weight = (i + 1) as f32;
            (weighted + percentile * weight, total + weight)
        });
    weighted / total
}

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyTracker {
    initial_rate: f32,
    rate: f32,
    history: Vec<f32>,
}

impl Default for DifficultyTracker {
    fn default() -> Self {
        DifficultyTracker::new(DEFAULT_DIFFICULTY_RATE)
    }
}

impl DifficultyTracker {
    pub fn new(initial_rate: f32) -> Self {
        DifficultyTracker {
            initial_rate,
            rate: initial_rate,
            history: Vec::new(),
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Percentiles of the tracked moves, oldest first.
    pub fn history(&self) -> &[f32] {
        &self.history
    }

    pub fn update(&mut self, chosen: &Move, root: &[ScoredMove]) -> f32 {
        self.rate = update_difficulty_rate(chosen, root, self.rate, &mut self.history);
        self.rate
    }

    pub fn reset(&mut self) {
        self.rate = self.initial_rate;
        self.history.clear();
    }
}
