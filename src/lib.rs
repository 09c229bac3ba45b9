#[macro_use]
extern crate impl_ops;

pub mod agents;
pub mod algorithms;
pub mod boards;
pub mod config;
pub mod diagonals;
pub mod difficulty;
pub mod draughts_errors;
pub mod engine;
pub mod evaluation;
pub mod game;
pub mod game_state;
mod movegen;
pub mod moves;
pub mod pieces;
pub mod positions;
pub mod utils;

pub use boards::Board;
pub use draughts_errors::{DraughtsError, DraughtsResult};
pub use game_state::{GameState, Outcome};
pub use moves::{Move, ScoredMove};
pub use pieces::{Side, Square};
pub use positions::Position;
