use crate::draughts_errors::*;
use std::fmt::{self, Display};
use std::ops;
use std::str::FromStr;

// Board positions on an 8x8 draughts board.
//
// Numbered as follows (only the dark squares, (row + col) odd, hold pieces):
//
//     a  b  c  d  e  f  g  h
//   ---------------------------
// 8 | 0  1  2  3  4  5  6  7  | 8
// 7 | 8  9  10 11 12 13 14 15 | 7
// 6 | 16 17 18 19 20 21 22 23 | 6
// 5 | 24 25 26 27 28 29 30 31 | 5
// 4 | 32 33 34 35 36 37 38 39 | 4
// 3 | 40 41 42 43 44 45 46 47 | 3
// 2 | 48 49 50 51 52 53 54 55 | 2
// 1 | 56 57 58 59 60 61 62 63 | 1
//   ---------------------------
//    a  b  c  d  e  f  g  h
//
// ---------------------------------------------
// Positions
// ---------------------------------------------

pub const BOARD_SIZE: u8 = 8;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl From<u8> for Position {
    fn from(u: u8) -> Self {
        debug_assert!(u < 64, "Invalid position: {}", u);
        Position(u)
    }
}

impl From<usize> for Position {
    fn from(u: usize) -> Self {
        (u as u8).into()
    }
}

impl FromStr for Position {
    type Err = DraughtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DraughtsError::InvalidPosition(s.to_string());
        let mut chars = s.trim().chars();

        let col = chars
            .next()
            .and_then(|c| ('a'..='h').position(|file| file == c.to_ascii_lowercase()))
            .ok_or_else(err)?;
        let rank = chars
            .next()
            .and_then(|r| r.to_digit(10))
            .filter(|r| (1..=8).contains(r))
            .ok_or_else(err)?;

        if chars.next().is_some() {
            return Err(err());
        }

        Ok(Position::from_row_col((8 - rank) as u8, col as u8))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_row_col();
        write!(
            f,
            "{}{}",
            ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'][col as usize],
            8 - row,
        )
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

pub struct PositionIterator(u8);

impl Iterator for PositionIterator {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > 63 {
            None
        } else {
            self.0 += 1;
            Some((self.0 - 1).into())
        }
    }
}

impl Position {
    /// Returns row and col from position.
    /// Example: Position 63 (h1) is mapped to (7,7)
    pub const fn to_row_col(self) -> (u8, u8) {
        (self.0 / 8, self.0 % 8)
    }

    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Need const fn for the diagonal tables. Unchecked position, as
    /// this is not allowed in const fns.
    pub const fn const_new(u: u8) -> Position {
        Position(u)
    }

    /// Transforms a row and a col to Position on the board.
    /// Row and col must correspond to a legal board position.
    pub fn from_row_col(row: u8, col: u8) -> Position {
        debug_assert!(Position::in_board(row as i16, col as i16));
        (row * BOARD_SIZE + col).into()
    }

    pub const fn const_from_row_col(row: u8, col: u8) -> Position {
        Self::const_new(row * BOARD_SIZE + col)
    }

    /// Checks if row and col belong to a legal board position.
    pub const fn in_board(row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && row < BOARD_SIZE as i16 && col < BOARD_SIZE as i16
    }

    /// Dark squares are the only ones pieces ever stand on.
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Allows to iterate over all positions on the board
    pub fn all_positions() -> PositionIterator {
        PositionIterator(0)
    }
}

/// Distance between two positions, in rows and columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Offset {
    pub rows: i8,
    pub cols: i8,
}

impl Offset {
    pub const fn new(rows: i8, cols: i8) -> Offset {
        Offset { rows, cols }
    }
}

impl_op_ex!(- |a: &Position, b: &Position| -> Offset {
    Offset::new(
        a.row() as i8 - b.row() as i8,
        a.col() as i8 - b.col() as i8,
    )
});

impl_op_ex!(* |a: &Offset, b: &i8| -> Offset { Offset::new(a.rows * b, a.cols * b) });

impl_op_ex!(+ |a: &Position, b: &Offset| -> Option<Position> {
    let row = a.row() as i16 + b.rows as i16;
    let col = a.col() as i16 + b.cols as i16;
    if Position::in_board(row, col) {
        Some(Position::from_row_col(row as u8, col as u8))
    } else {
        None
    }
});
