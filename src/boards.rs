use crate::draughts_errors::*;
use crate::moves::*;
use crate::pieces::*;
use crate::positions::*;
use array_init::array_init;
use std::fmt::{self, Display};
use std::ops;

// ---------------------------------------------
// Board Types
// ---------------------------------------------

/// Plies without a capture or a man move after which the game is drawn.
pub const MOVES_TO_DRAW: u8 = 20;

// Displays the first 64 items from an iterator in a board style:
//
//   a  b  c  d  e  f  g  h
// 8 i1 i2 i3 ...          8
// 7 ....
//
// Where i1,...i64 are the items of the iterator.
// It is required that the iterator has at least 64 items, else we will return with an error.
fn display_board_style<I, C>(it: &mut I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    I: Iterator<Item = C>,
    C: Display,
{
    write!(f, " ")?;
    for c in 'a'..'i' {
        write!(f, " {}", c)?;
    }
    for row in 0..BOARD_SIZE {
        write!(f, "\n{} ", 8 - row)?;
        for _col in 0..BOARD_SIZE {
            let i = it.next().ok_or(fmt::Error)?;
            write!(f, "{} ", i)?;
        }
        write!(f, "{}", 8 - row)?;
    }
    write!(f, "\n ")?;
    for c in 'a'..'i' {
        write!(f, " {}", c)?;
    }
    Ok(())
}

/// An 8x8 mailbox board plus whose turn it is.
///
/// `home_side` records once per game which side starts on the bottom edge
/// (rows 5 to 7) and therefore moves towards row 0. It never changes and is
/// copied into every derived board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [Square; 64],
    side_to_move: Side,
    home_side: Side,
}

impl Board {
    pub fn empty(side_to_move: Side, home_side: Side) -> Board {
        Board {
            squares: [Square::Empty; 64],
            side_to_move,
            home_side,
        }
    }

    /// Returns a board with twelve men per side on the dark squares of the
    /// three rows nearest their own edge. Black moves first.
    pub fn standard_setup(home_side: Side) -> Board {
        let away_side = home_side.opposite();
        let squares = array_init(|i: usize| {
            let pos = Position::from(i);
            match pos.row() {
                _ if !pos.is_dark() => Square::Empty,
                0..=2 => away_side.man(),
                5..=7 => home_side.man(),
                _ => Square::Empty,
            }
        });

        Board {
            squares,
            side_to_move: Side::Black,
            home_side,
        }
    }

    pub fn add(&mut self, pos: Position, square: Square) -> DraughtsResult<()> {
        if !pos.is_dark() {
            return Err(DraughtsError::LightSquare(pos));
        }
        let current = &mut self.squares[pos.index()];
        if current.is_empty() {
            *current = square;
            Ok(())
        } else {
            Err(DraughtsError::Occupied {
                pos,
                square: *current,
            })
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn home_side(&self) -> Side {
        self.home_side
    }

    pub fn flip_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Row direction in which the men of `side` advance.
    pub fn forward_rows(&self, side: Side) -> i8 {
        if side == self.home_side {
            -1
        } else {
            1
        }
    }

    /// The row farthest from the starting edge of `side`.
    pub fn promotion_row(&self, side: Side) -> u8 {
        if side == self.home_side {
            0
        } else {
            BOARD_SIZE - 1
        }
    }

    /// Whether the man of `side` on `pos` is one step away from being crowned.
    pub fn is_near_promotion(&self, pos: Position, side: Side) -> bool {
        let row = pos.row() as i16;
        row + self.forward_rows(side) as i16 == self.promotion_row(side) as i16
    }

    /// All occupied squares in position order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Square)> + '_ {
        Position::all_positions()
            .map(move |pos| (pos, self[pos]))
            .filter(|(_, square)| !square.is_empty())
    }

    pub fn count(&self, square: Square) -> usize {
        self.squares.iter().filter(|s| **s == square).count()
    }

    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }
}

// -------------------------------------
// Applying moves
// ------------------------------------

impl Board {
    /// Moves the piece from `m.start` to `m.end`, removes every captured
    /// piece and crowns a man that ends on its promotion row. The side to
    /// move is left unchanged.
    ///
    /// Only moves produced by the move generator for this board may be
    /// applied; anything else is a bug in the caller.
    pub fn make_move(&mut self, m: &Move) -> MoveEffects {
        let piece = self[m.start];
        debug_assert!(
            !piece.is_empty(),
            "\nMove illegal on board, {} is empty: {}\n{}",
            m.start,
            m,
            self
        );
        debug_assert!(
            m.end == m.start || self[m.end].is_empty(),
            "\nMove illegal on board, {} is occupied: {}\n{}",
            m.end,
            m,
            self
        );

        self.squares[m.start.index()] = Square::Empty;
        for captured in m.captured.iter() {
            debug_assert!(
                piece
                    .get_side()
                    .map_or(false, |side| self[*captured].belongs_to(side.opposite())),
                "\nCaptured square {} holds no opposing piece: {}\n{}",
                captured,
                m,
                self
            );
            self.squares[captured.index()] = Square::Empty;
        }

        let promoted = piece.is_man()
            && piece
                .get_side()
                .map_or(false, |side| m.end.row() == self.promotion_row(side));
        self.squares[m.end.index()] = if promoted { piece.crowned() } else { piece };

        MoveEffects {
            from: m.start,
            to: m.end,
            captured: m.captured.clone(),
            promoted,
        }
    }

    /// The board after `m` has been played, with the turn passed to the opponent.
    pub fn after_move(&self, m: &Move) -> Board {
        let mut child = *self;
        child.make_move(m);
        child.flip_turn();
        child
    }

    /// Draw counter after playing `m` on this board: any capture or man move
    /// resets it, a quiet king move uses one up.
    pub fn moves_to_draw_after(&self, m: &Move, current: u8) -> u8 {
        if m.is_capture() || self[m.start].is_man() {
            MOVES_TO_DRAW
        } else {
            current.saturating_sub(1)
        }
    }
}

impl ops::Index<Position> for Board {
    type Output = Square;

    fn index(&self, index: Position) -> &Square {
        &self.squares[index.index()]
    }
}

// Light squares are printed blank
struct Cell(Position, Square);

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_dark() {
            write!(f, "{}", self.1)
        } else {
            write!(f, " ")
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} to move", self.side_to_move)?;
        display_board_style(
            &mut Position::all_positions().map(|pos| Cell(pos, self[pos])),
            f,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;

    fn p(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_standard_setup() {
        let b = Board::standard_setup(Side::Black);
        assert_eq!(b.count(Square::BlackMan), 12);
        assert_eq!(b.count(Square::WhiteMan), 12);
        assert_eq!(b.piece_count(), 24);
        assert_eq!(b.side_to_move(), Side::Black);
        assert_eq!(b[p("a1")], Square::BlackMan);
        assert_eq!(b[p("c3")], Square::BlackMan);
        assert_eq!(b[p("b2")], Square::BlackMan);
        assert_eq!(b[p("b8")], Square::WhiteMan);
        assert_eq!(b[p("h6")], Square::WhiteMan);
        assert_eq!(b[p("a8")], Square::Empty);
        assert_eq!(b[p("b4")], Square::Empty);

        let w = Board::standard_setup(Side::White);
        assert_eq!(w[p("a1")], Square::WhiteMan);
        assert_eq!(w[p("b8")], Square::BlackMan);
        assert_eq!(w.side_to_move(), Side::Black);
    }

    #[test]
    fn test_orientation() {
        let b = Board::standard_setup(Side::Black);
        assert_eq!(b.forward_rows(Side::Black), -1);
        assert_eq!(b.forward_rows(Side::White), 1);
        assert_eq!(b.promotion_row(Side::Black), 0);
        assert_eq!(b.promotion_row(Side::White), 7);
        assert!(b.is_near_promotion(p("c7"), Side::Black));
        assert!(!b.is_near_promotion(p("c7"), Side::White));
        assert!(b.is_near_promotion(p("d2"), Side::White));
    }

    #[test]
    fn test_add_rejects_bad_squares() {
        let mut b = Board::empty(Side::Black, Side::Black);
        assert!(b.add(p("c3"), Square::BlackMan).is_ok());
        assert_eq!(
            b.add(p("c3"), Square::WhiteMan),
            Err(DraughtsError::Occupied {
                pos: p("c3"),
                square: Square::BlackMan
            })
        );
        assert_eq!(
            b.add(p("a8"), Square::WhiteMan),
            Err(DraughtsError::LightSquare(p("a8")))
        );
    }

    #[test]
    fn test_simple_move() {
        let mut b = Board::standard_setup(Side::Black);
        let prev = b;
        let effects = b.make_move(&Move::new(p("c3"), p("d4"), vec![]));
        assert_eq!(b[p("c3")], Square::Empty);
        assert_eq!(b[p("d4")], Square::BlackMan);
        assert_eq!(b.piece_count(), prev.piece_count());
        assert_eq!(b.side_to_move(), Side::Black);
        assert!(!effects.promoted);
        assert!(effects.captured.is_empty());
    }

    #[test]
    fn test_capture_removes_pieces() {
        let mut b = board!(Side::Black, Side::Black;
            "c3" => Square::BlackMan,
            "d4" => Square::WhiteMan,
            "d6" => Square::WhiteKing
        );
        let m = Move::new(p("c3"), p("c7"), vec![p("d4"), p("d6")]);
        let effects = b.make_move(&m);
        assert_eq!(b[p("c7")], Square::BlackMan);
        assert_eq!(b[p("d4")], Square::Empty);
        assert_eq!(b[p("d6")], Square::Empty);
        assert_eq!(b.piece_count(), 1);
        assert_eq!(effects.captured, vec![p("d4"), p("d6")]);
    }

    #[test]
    fn test_promotion_on_far_row() {
        let mut b = board!(Side::Black, Side::Black;
            "c7" => Square::BlackMan,
            "f2" => Square::WhiteMan
        );
        assert!(b.make_move(&Move::new(p("c7"), p("d8"), vec![])).promoted);
        assert_eq!(b[p("d8")], Square::BlackKing);
        assert!(b.make_move(&Move::new(p("f2"), p("e1"), vec![])).promoted);
        assert_eq!(b[p("e1")], Square::WhiteKing);

        // Home side White: White promotes on row 0 instead.
        let mut w = board!(Side::White, Side::White; "c7" => Square::WhiteMan);
        assert!(w.make_move(&Move::new(p("c7"), p("b8"), vec![])).promoted);
        assert_eq!(w[p("b8")], Square::WhiteKing);
    }

    #[test]
    fn test_kings_are_not_promoted_again() {
        let mut b = board!(Side::Black, Side::Black; "c7" => Square::BlackKing);
        assert!(!b.make_move(&Move::new(p("c7"), p("d8"), vec![])).promoted);
        assert_eq!(b[p("d8")], Square::BlackKing);
    }

    #[test]
    fn test_after_move_flips_turn() {
        let b = Board::standard_setup(Side::Black);
        let child = b.after_move(&Move::new(p("c3"), p("d4"), vec![]));
        assert_eq!(child.side_to_move(), Side::White);
        assert_eq!(child.home_side(), Side::Black);
        assert_eq!(b[p("c3")], Square::BlackMan);
    }

    #[test]
    fn test_moves_to_draw_counter() {
        let b = board!(Side::Black, Side::Black;
            "c3" => Square::BlackMan,
            "e3" => Square::BlackKing,
            "f4" => Square::WhiteMan
        );
        let man_move = Move::new(p("c3"), p("d4"), vec![]);
        let king_move = Move::new(p("e3"), p("d2"), vec![]);
        let king_capture = Move::new(p("e3"), p("g5"), vec![p("f4")]);
        assert_eq!(b.moves_to_draw_after(&man_move, 3), MOVES_TO_DRAW);
        assert_eq!(b.moves_to_draw_after(&king_move, 3), 2);
        assert_eq!(b.moves_to_draw_after(&king_move, 0), 0);
        assert_eq!(b.moves_to_draw_after(&king_capture, 3), MOVES_TO_DRAW);
    }

    #[test]
    fn test_display() {
        let s = Board::standard_setup(Side::Black).to_string();
        assert!(s.starts_with("Black to move"));
        assert_eq!(s.lines().count(), 11);
    }
}
