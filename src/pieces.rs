use std::fmt::{self, Display};

// ---------------------------------------------
// Pieces
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    Empty,
    BlackMan,
    BlackKing,
    WhiteMan,
    WhiteKing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Black,
    White,
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Square::*;
        let symbol = match self {
            WhiteMan => '\u{26c0}',
            WhiteKing => '\u{26c1}',
            BlackMan => '\u{26c2}',
            BlackKing => '\u{26c3}',
            Empty => '.',
        };
        write!(f, "{}", symbol)
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn man(self) -> Square {
        match self {
            Side::Black => Square::BlackMan,
            Side::White => Square::WhiteMan,
        }
    }

    pub fn king(self) -> Square {
        match self {
            Side::Black => Square::BlackKing,
            Side::White => Square::WhiteKing,
        }
    }

    /// Black counts positive in every score, White negative.
    pub fn sign(self) -> f32 {
        match self {
            Side::Black => 1.0,
            Side::White => -1.0,
        }
    }
}

impl Square {
    pub fn get_side(&self) -> Option<Side> {
        use Square::*;

        match self {
            BlackMan | BlackKing => Some(Side::Black),
            WhiteMan | WhiteKing => Some(Side::White),
            Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Square::Empty
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Square::BlackKing | Square::WhiteKing)
    }

    pub fn is_man(&self) -> bool {
        matches!(self, Square::BlackMan | Square::WhiteMan)
    }

    pub fn belongs_to(&self, side: Side) -> bool {
        self.get_side() == Some(side)
    }

    /// The king of the same side. Kings and empty squares are returned unchanged.
    pub fn crowned(&self) -> Square {
        match self {
            Square::BlackMan => Square::BlackKing,
            Square::WhiteMan => Square::WhiteKing,
            other => *other,
        }
    }
}
