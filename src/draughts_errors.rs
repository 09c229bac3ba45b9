use crate::pieces::Square;
use crate::positions::Position;
use thiserror::Error;

// ---------------------------------------------
// Error Handling
// ---------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraughtsError {
    #[error("invalid board position {0:?}")]
    InvalidPosition(String),

    #[error("pieces only stand on dark squares, {0} is light")]
    LightSquare(Position),

    #[error("square {pos} is not empty but holds {square}")]
    Occupied { pos: Position, square: Square },

    #[error("no legal move from {start} to {end}")]
    IllegalMove { start: Position, end: Position },

    #[error("the game is already over")]
    GameOver,
}

pub type DraughtsResult<T> = std::result::Result<T, DraughtsError>;
