use crate::algorithms::*;
use crate::boards::Board;
use crate::config::{Algorithm, SearchLimits};
use crate::evaluation::{Heuristic, Weights};
use crate::moves::ScoredMove;
use crate::pieces::Side;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

// -------------------------------------
// Engine
// ------------------------------------

/// Runs searches of one algorithm with a position evaluator and owns the
/// random source used to break ties.
pub struct Engine<S: DraughtsSearch = Heuristic> {
    search: S,
    algorithm: Algorithm,
    rng: SmallRng,
}

impl Engine<Heuristic> {
    pub fn new(algorithm: Algorithm, weights: Weights) -> Self {
        Engine::with_search(Heuristic::new(weights), algorithm, SmallRng::from_entropy())
    }

    /// Reproducible engine, the same seed always plays the same moves.
    pub fn with_seed(algorithm: Algorithm, weights: Weights, seed: u64) -> Self {
        Engine::with_search(
            Heuristic::new(weights),
            algorithm,
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<S: DraughtsSearch> Engine<S> {
    pub fn with_search(search: S, algorithm: Algorithm, rng: SmallRng) -> Self {
        Engine {
            search,
            algorithm,
            rng,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Picks a move for `side` on `board`. `difficulty_rate` is only used by
    /// the adaptive algorithm. The move is `None` if the game is over.
    pub fn choose_move(
        &mut self,
        board: &Board,
        side: Side,
        moves_to_draw: u8,
        limits: SearchLimits,
        difficulty_rate: f32,
    ) -> ScoredMove {
        let mut ctx = SearchContext::new(limits, &mut self.rng);
        let chosen = match self.algorithm {
            Algorithm::Minimax => {
                self.search
                    .random_best(board, side, moves_to_draw, false, &mut ctx)
            }
            Algorithm::AlphaBeta => {
                self.search
                    .random_best(board, side, moves_to_draw, true, &mut ctx)
            }
            Algorithm::Adaptive => {
                self.search
                    .adaptive(board, side, moves_to_draw, difficulty_rate, &mut ctx)
            }
        };
        debug!(
            algorithm = ?self.algorithm,
            depth = limits.max_depth,
            nodes = ctx.nodes(),
            elapsed = ?ctx.elapsed(),
            score = chosen.score,
            "search finished"
        );
        chosen
    }

    /// Scores of every move available to `side`, as used to rank the moves a
    /// player makes.
    pub fn root_moves(
        &mut self,
        board: &Board,
        side: Side,
        moves_to_draw: u8,
        limits: SearchLimits,
    ) -> Vec<ScoredMove> {
        let mut ctx = SearchContext::new(limits, &mut self.rng);
        let root = self
            .search
            .root_moves(board, side, moves_to_draw, true, &mut ctx);
        debug!(moves = root.len(), nodes = ctx.nodes(), "root moves scored");
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::MOVES_TO_DRAW;

    #[test]
    fn test_every_algorithm_finds_a_legal_move() {
        let b = Board::standard_setup(Side::Black);
        let legal = b.legal_moves();
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta, Algorithm::Adaptive] {
            let mut engine = Engine::with_seed(algorithm, Weights::default(), 1);
            let chosen = engine.choose_move(
                &b,
                Side::Black,
                MOVES_TO_DRAW,
                SearchLimits::depth(3),
                50.0,
            );
            assert!(legal.contains(chosen.mv.as_ref().unwrap()));
        }
    }

    #[test]
    fn test_seeded_engines_repeat_themselves() {
        let b = Board::standard_setup(Side::White);
        let mut first = Engine::with_seed(Algorithm::Adaptive, Weights::default(), 8);
        let mut second = Engine::with_seed(Algorithm::Adaptive, Weights::default(), 8);
        for rate in [0.0, 30.0, 100.0] {
            let limits = SearchLimits::depth(2);
            assert_eq!(
                first.choose_move(&b, Side::Black, MOVES_TO_DRAW, limits, rate),
                second.choose_move(&b, Side::Black, MOVES_TO_DRAW, limits, rate)
            );
        }
    }

    #[test]
    fn test_root_moves_cover_all_legal_moves() {
        let b = Board::standard_setup(Side::Black);
        let mut engine = Engine::with_seed(Algorithm::AlphaBeta, Weights::default(), 2);
        let root = engine.root_moves(&b, Side::Black, MOVES_TO_DRAW, SearchLimits::depth(2));
        assert_eq!(root.len(), b.legal_moves().len());
        assert!(engine
            .root_moves(&b, Side::Black, 0, SearchLimits::depth(2))
            .is_empty());
    }
}
