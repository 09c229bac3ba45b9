#[cfg(test)]
use crate::boards::Board;
#[cfg(test)]
use crate::pieces::{Side, Square};
#[cfg(test)]
use crate::positions::Position;
#[cfg(test)]
use rand::seq::SliceRandom;
#[cfg(test)]
use rand::Rng;

// For testing purposes: Easily creates a board with pieces on the given squares.
//
//     board!(Side::Black, Side::Black; "c3" => Square::BlackMan, "d4" => Square::WhiteMan)
//
// The first side is the side to move, the second the home side.
#[macro_export]
macro_rules! board {
    ( $to_move:expr, $home:expr $(; $( $pos:expr => $square:expr ),* $(,)? )? ) => {
        {
            #[allow(unused_mut)]
            let mut base = $crate::boards::Board::empty($to_move, $home);
            $( $(
                base.add($pos.parse().expect("Invalid position in board!"), $square)
                    .expect("Invalid square in board!");
            )* )?
            base
        }
    };
}

/// Plays up to `plies` random legal moves from the standard setup and returns
/// the reached board together with the draw counter.
#[cfg(test)]
pub fn random_playout(rng: &mut impl Rng, plies: usize) -> (Board, u8) {
    let mut board = Board::standard_setup(if rng.gen() { Side::Black } else { Side::White });
    let mut moves_to_draw = crate::boards::MOVES_TO_DRAW;
    for _ in 0..plies {
        let moves = board.legal_moves();
        let mv = match moves.choose(rng) {
            Some(mv) => mv,
            None => break,
        };
        moves_to_draw = board.moves_to_draw_after(mv, moves_to_draw);
        board = board.after_move(mv);
    }
    (board, moves_to_draw)
}

/// A board with `pieces` randomly placed pieces of random kind. Men are never
/// put on their own promotion row.
#[cfg(test)]
pub fn random_sparse_board(rng: &mut impl Rng, pieces: usize) -> Board {
    const KINDS: [Square; 4] = [
        Square::BlackMan,
        Square::BlackKing,
        Square::WhiteMan,
        Square::WhiteKing,
    ];
    let to_move = if rng.gen() { Side::Black } else { Side::White };
    let mut board = Board::empty(to_move, Side::Black);
    let mut dark: Vec<Position> = Position::all_positions().filter(|p| p.is_dark()).collect();
    dark.shuffle(rng);

    let mut placed = 0;
    for pos in dark {
        if placed == pieces {
            break;
        }
        let square = KINDS[rng.gen_range(0..KINDS.len())];
        let crowned_here = square.is_man()
            && square
                .get_side()
                .map_or(false, |side| pos.row() == board.promotion_row(side));
        if crowned_here {
            continue;
        }
        if board.add(pos, square).is_ok() {
            placed += 1;
        }
    }
    board
}
