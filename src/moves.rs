//! Describing the moves that can be done on a draughts board.
use crate::positions::*;
use std::fmt;

/// A single move: a step to an adjacent square, or a chain of jumps.
/// `captured` lists the jumped-over squares in the order they were jumped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Position,
    pub end: Position,
    pub captured: Vec<Position>,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.captured.is_empty() {
            return write!(f, "{}-{}", self.start, self.end);
        }
        let path = self.path();
        write!(f, "{}", path[0])?;
        for pos in path.iter().skip(1) {
            write!(f, "x{}", pos)?;
        }
        Ok(())
    }
}

impl Move {
    pub fn new(start: Position, end: Position, captured: Vec<Position>) -> Self {
        Move {
            start,
            end,
            captured,
        }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Every square the moving piece stands on, from start to end. For a
    /// capture chain these are the intermediate landing squares.
    pub fn path(&self) -> Vec<Position> {
        let mut path = vec![self.start];
        if !self.is_capture() {
            path.push(self.end);
            return path;
        }
        let mut at = self.start;
        for over in self.captured.iter() {
            match at + (*over - at) * 2i8 {
                Some(landing) => {
                    path.push(landing);
                    at = landing;
                }
                None => break,
            }
        }
        path
    }

    /// Same origin and destination. Distinct capture chains can share both.
    pub fn same_squares(&self, other: &Move) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// A move together with its score from the point of view of the side the
/// search was run for. `mv` is `None` for terminal positions and leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMove {
    pub mv: Option<Move>,
    pub score: f32,
}

impl ScoredMove {
    pub fn new(mv: Move, score: f32) -> Self {
        ScoredMove {
            mv: Some(mv),
            score,
        }
    }

    pub fn leaf(score: f32) -> Self {
        ScoredMove { mv: None, score }
    }
}

/// What changed on the board when a move was made, for whoever draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEffects {
    pub from: Position,
    pub to: Position,
    pub captured: Vec<Position>,
    pub promoted: bool,
}
