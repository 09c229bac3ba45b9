use crate::boards::Board;
use crate::config::SearchLimits;
use crate::evaluation::Heuristic;
use crate::moves::{Move, ScoredMove};
use crate::pieces::Side;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};
use tracing::trace;

/// Score of a position drawn by the move counter.
pub const DRAW_SCORE: f32 = 0.0;

/// The adaptive search never considers the lowest `1 / DISCARD_DIVISOR` of
/// the distinct root scores.
const DISCARD_DIVISOR: usize = 3;

/// Bookkeeping shared by all nodes of one search.
pub struct SearchContext<'r> {
    pub max_depth: u16,
    started: Instant,
    time_budget: Option<Duration>,
    nodes: u64,
    rng: &'r mut SmallRng,
}

impl<'r> SearchContext<'r> {
    pub fn new(limits: SearchLimits, rng: &'r mut SmallRng) -> Self {
        SearchContext {
            max_depth: limits.max_depth,
            started: Instant::now(),
            time_budget: limits.time_budget,
            nodes: 0,
            rng,
        }
    }

    pub fn out_of_time(&self) -> bool {
        self.time_budget
            .map_or(false, |budget| self.started.elapsed() > budget)
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

#[doc(hidden)]
pub enum Node {
    Leaf(ScoredMove),
    Inner(Vec<Move>),
}

fn worst(maximizing: bool) -> f32 {
    if maximizing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    }
}

fn improves(maximizing: bool, candidate: f32, best: f32) -> bool {
    if maximizing {
        candidate > best
    } else {
        candidate < best
    }
}

/// Distinct scores of `scored`, ascending.
pub fn distinct_scores(scored: &[ScoredMove]) -> Vec<f32> {
    let mut scores: Vec<f32> = scored.iter().map(|m| m.score).collect();
    scores.sort_by(|a, b| a.total_cmp(b));
    scores.dedup();
    scores
}

/// The score an adaptive engine aims for: the lowest third of the distinct
/// scores is dropped and `rate` (0 to 100) picks a percentile of the rest.
pub fn target_score(scored: &[ScoredMove], rate: f32) -> Option<f32> {
    let distinct = distinct_scores(scored);
    let kept = &distinct[distinct.len() / DISCARD_DIVISOR..];
    if kept.is_empty() {
        return None;
    }
    let rate = rate.clamp(0.0, 100.0);
    let idx = ((kept.len() - 1) as f32 * rate / 100.0).round() as usize;
    kept.get(idx).copied()
}

/// Game tree search over draughts positions. Scores are always seen from
/// `side`: nodes where `side` is to move maximize, the others minimize.
///
/// Only `score` must be provided, the searches come as default methods.
pub trait DraughtsSearch {
    fn score(&self, board: &Board, side: Side) -> f32;

    fn minimax(
        &self,
        board: &Board,
        side: Side,
        depth: u16,
        moves_to_draw: u8,
        ctx: &mut SearchContext,
    ) -> ScoredMove {
        let moves = match self.expand(board, side, depth, moves_to_draw, ctx) {
            Node::Leaf(leaf) => return leaf,
            Node::Inner(moves) => moves,
        };

        let maximizing = board.side_to_move() == side;
        let mut best = ScoredMove::leaf(worst(maximizing));
        for (i, mv) in moves.into_iter().enumerate() {
            if i > 0 && ctx.out_of_time() {
                break;
            }
            let child = board.after_move(&mv);
            let counter = board.moves_to_draw_after(&mv, moves_to_draw);
            let reply = self.minimax(&child, side, depth + 1, counter, ctx);
            if improves(maximizing, reply.score, best.score) {
                best = ScoredMove::new(mv, reply.score);
            }
        }
        best
    }

    /// Minimax with alpha-beta pruning. Returns the same score as `minimax`
    /// when called with the full window.
    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &self,
        board: &Board,
        side: Side,
        depth: u16,
        moves_to_draw: u8,
        mut alpha: f32,
        mut beta: f32,
        ctx: &mut SearchContext,
    ) -> ScoredMove {
        let moves = match self.expand(board, side, depth, moves_to_draw, ctx) {
            Node::Leaf(leaf) => return leaf,
            Node::Inner(moves) => moves,
        };

        let maximizing = board.side_to_move() == side;
        let mut best = ScoredMove::leaf(worst(maximizing));
        for (i, mv) in moves.into_iter().enumerate() {
            if i > 0 && ctx.out_of_time() {
                break;
            }
            let child = board.after_move(&mv);
            let counter = board.moves_to_draw_after(&mv, moves_to_draw);
            let reply = self.alphabeta(&child, side, depth + 1, counter, alpha, beta, ctx);
            if improves(maximizing, reply.score, best.score) {
                best = ScoredMove::new(mv, reply.score);
                if maximizing {
                    alpha = alpha.max(best.score);
                } else {
                    beta = beta.min(best.score);
                }
                if beta <= alpha {
                    break;
                }
            }
        }
        best
    }

    /// Every legal move at the root with its exact score. Empty if the game
    /// is already over.
    fn root_moves(
        &self,
        board: &Board,
        side: Side,
        moves_to_draw: u8,
        pruning: bool,
        ctx: &mut SearchContext,
    ) -> Vec<ScoredMove> {
        ctx.nodes += 1;
        if moves_to_draw == 0 {
            return Vec::new();
        }

        let moves = board.legal_moves();
        let mut res = Vec::with_capacity(moves.len());
        for (i, mv) in moves.into_iter().enumerate() {
            if i > 0 && ctx.out_of_time() {
                trace!(searched = i, "time budget exhausted at the root");
                break;
            }
            let child = board.after_move(&mv);
            let counter = board.moves_to_draw_after(&mv, moves_to_draw);
            let reply = if pruning {
                self.alphabeta(
                    &child,
                    side,
                    1,
                    counter,
                    f32::NEG_INFINITY,
                    f32::INFINITY,
                    ctx,
                )
            } else {
                self.minimax(&child, side, 1, counter, ctx)
            };
            res.push(ScoredMove::new(mv, reply.score));
        }
        res
    }

    /// Best move at the root, chosen uniformly among all moves sharing the
    /// best score.
    fn random_best(
        &self,
        board: &Board,
        side: Side,
        moves_to_draw: u8,
        pruning: bool,
        ctx: &mut SearchContext,
    ) -> ScoredMove {
        let scored = self.root_moves(board, side, moves_to_draw, pruning, ctx);
        let maximizing = board.side_to_move() == side;

        let mut ties: Vec<ScoredMove> = Vec::new();
        for candidate in scored {
            match ties.first().map(|best| best.score) {
                Some(best) if improves(maximizing, candidate.score, best) => {
                    ties.clear();
                    ties.push(candidate);
                }
                Some(best) if candidate.score == best => ties.push(candidate),
                Some(_) => {}
                None => ties.push(candidate),
            }
        }

        match ties.choose(&mut *ctx.rng) {
            Some(choice) => choice.clone(),
            None => self.game_over(board, side, moves_to_draw),
        }
    }

    /// Plays at a strength given by `difficulty_rate`, from 0 (weakest
    /// considered move) to 100 (best move). See `target_score`.
    fn adaptive(
        &self,
        board: &Board,
        side: Side,
        moves_to_draw: u8,
        difficulty_rate: f32,
        ctx: &mut SearchContext,
    ) -> ScoredMove {
        let scored = self.root_moves(board, side, moves_to_draw, true, ctx);
        let target = match target_score(&scored, difficulty_rate) {
            Some(target) => target,
            None => return self.game_over(board, side, moves_to_draw),
        };
        trace!(score = target, rate = difficulty_rate, "adaptive target score");

        let candidates: Vec<&ScoredMove> = scored.iter().filter(|m| m.score == target).collect();
        match candidates.choose(&mut *ctx.rng) {
            Some(choice) => (*choice).clone(),
            None => self.game_over(board, side, moves_to_draw),
        }
    }

    #[doc(hidden)]
    fn game_over(&self, board: &Board, side: Side, moves_to_draw: u8) -> ScoredMove {
        if moves_to_draw == 0 {
            ScoredMove::leaf(DRAW_SCORE)
        } else {
            ScoredMove::leaf(self.score(board, side))
        }
    }

    // The draw counter is looked at before the depth limit and before the
    // legal moves.
    #[doc(hidden)]
    fn expand(
        &self,
        board: &Board,
        side: Side,
        depth: u16,
        moves_to_draw: u8,
        ctx: &mut SearchContext,
    ) -> Node {
        ctx.nodes += 1;
        if moves_to_draw == 0 {
            return Node::Leaf(ScoredMove::leaf(DRAW_SCORE));
        }
        if depth >= ctx.max_depth {
            return Node::Leaf(ScoredMove::leaf(self.score(board, side)));
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Node::Leaf(ScoredMove::leaf(self.score(board, side)));
        }
        Node::Inner(moves)
    }
}

impl DraughtsSearch for Heuristic {
    fn score(&self, board: &Board, side: Side) -> f32 {
        self.evaluate(board, side)
    }
}
