use crate::boards::Board;
use crate::pieces::*;
use crate::positions::Position;
use std::collections::HashSet;

/// Score of a position in which the side to move has no legal move left.
pub const GAME_OVER_SCORE: f32 = 1000.0;

/// Weights of the terms of the static evaluation. Every term counts positive
/// for Black and negative for White.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub man: f32,
    pub king: f32,
    /// Per opposing piece the side to move can capture right now.
    pub threatened: f32,
    /// Per piece of the side to move that has at least one step or jump.
    pub movable: f32,
    /// Per man one row away from being crowned.
    pub almost_king: f32,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            man: 1.0,
            king: 3.0,
            threatened: 0.5,
            movable: 0.25,
            almost_king: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Heuristic {
    pub weights: Weights,
}

impl Heuristic {
    pub fn new(weights: Weights) -> Self {
        Heuristic { weights }
    }

    /// Scores `board` for `perspective`. Positions without legal moves are
    /// lost for the side to move.
    pub fn evaluate(&self, board: &Board, perspective: Side) -> f32 {
        if board.legal_moves().is_empty() {
            return if board.side_to_move() == perspective {
                -GAME_OVER_SCORE
            } else {
                GAME_OVER_SCORE
            };
        }

        let score: f32 = board
            .pieces()
            .map(|(pos, square)| self.piece_value(board, pos, square))
            .sum();

        match perspective {
            Side::Black => score,
            Side::White => -score,
        }
    }

    // Contribution of a single piece, signed by its side
    fn piece_value(&self, board: &Board, pos: Position, square: Square) -> f32 {
        let side = match square.get_side() {
            Some(side) => side,
            None => return 0.0,
        };
        let w = &self.weights;

        let jumps = board.piece_jumps(pos);
        let mut value = if square.is_king() { w.king } else { w.man };

        // Mobility and threats only count for the side to move.
        if side == board.side_to_move() {
            if !jumps.is_empty() || !board.piece_steps(pos).is_empty() {
                value += w.movable;
            }
            let threatened: HashSet<Position> =
                jumps.iter().flat_map(|m| m.captured.iter().copied()).collect();
            value += w.threatened * threatened.len() as f32;
        }

        if square.is_man() && board.is_near_promotion(pos, side) {
            value += w.almost_king;
        }

        side.sign() * value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use crate::utils::random_playout;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_starting_position_favours_side_to_move() {
        let h = Heuristic::default();
        let b = Board::standard_setup(Side::Black);
        // 12 men each, only Black's 4 movable front men count.
        assert_eq!(h.evaluate(&b, Side::Black), 1.0);
        assert_eq!(h.evaluate(&b, Side::White), -1.0);

        let w = Board::standard_setup(Side::White);
        assert_eq!(h.evaluate(&w, Side::Black), 1.0);
    }

    #[test]
    fn test_mobility_ignored_for_waiting_side() {
        let h = Heuristic::default();
        let b = board!(Side::White, Side::Black;
            "c3" => Square::BlackMan,
            "h8" => Square::WhiteKing
        );
        // Black man: 1, white king: 3 + movable 0.25
        assert_eq!(h.evaluate(&b, Side::White), 2.25);
    }

    #[test]
    fn test_material_and_kings() {
        let h = Heuristic::default();
        let b = board!(Side::Black, Side::Black;
            "c3" => Square::BlackKing,
            "a1" => Square::BlackMan,
            "h6" => Square::WhiteMan
        );
        // King 3 + movable 0.25, man 1 + movable 0.25, white man -1
        assert_eq!(h.evaluate(&b, Side::Black), 3.5);
        assert_eq!(h.evaluate(&b, Side::White), -3.5);
    }

    #[test]
    fn test_threat_and_near_promotion() {
        let h = Heuristic::default();
        let b = board!(Side::Black, Side::Black;
            "c3" => Square::BlackMan,
            "d4" => Square::WhiteMan,
            "b6" => Square::WhiteMan
        );
        // Black man: 1 + movable 0.25 + one threatened piece 0.5.
        // Each white man: 1. White could take c3 as well, but threats and
        // mobility only count for the side to move.
        assert_eq!(h.evaluate(&b, Side::Black), 1.75 - 2.0);

        let near = board!(Side::White, Side::Black;
            "c7" => Square::BlackMan,
            "d2" => Square::WhiteMan
        );
        // Both men are one row from being crowned, only White's counts as movable.
        assert_eq!(h.evaluate(&near, Side::Black), 1.25 - 1.5);
        assert_eq!(h.evaluate(&near, Side::White), 1.5 - 1.25);
    }

    #[test]
    fn test_terminal_positions() {
        let h = Heuristic::default();
        let blocked = board!(Side::White, Side::Black;
            "b8" => Square::WhiteMan,
            "a7" => Square::BlackMan,
            "c7" => Square::BlackMan,
            "d6" => Square::BlackMan
        );
        assert_eq!(h.evaluate(&blocked, Side::White), -GAME_OVER_SCORE);
        assert_eq!(h.evaluate(&blocked, Side::Black), GAME_OVER_SCORE);

        let wiped = board!(Side::Black, Side::Black; "c3" => Square::WhiteKing);
        assert_eq!(h.evaluate(&wiped, Side::Black), -GAME_OVER_SCORE);
    }

    #[test]
    fn test_perspective_flips_sign() {
        let h = Heuristic::default();
        let mut rng = SmallRng::seed_from_u64(3);
        for plies in 0..40 {
            let (b, _) = random_playout(&mut rng, plies);
            assert_eq!(h.evaluate(&b, Side::Black), -h.evaluate(&b, Side::White));
        }
    }
}
