use crate::boards::*;
use crate::difficulty::DifficultyTracker;
use crate::draughts_errors::*;
use crate::moves::*;
use crate::pieces::*;
use crate::positions::*;
use std::fmt::{self, Display};

// -------------------------------------
// GameState
// ------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// A running game: the board, the draw counter and the difficulty rate
/// tracked from the home player's moves.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    moves_to_draw: u8,
    turn_count: u16,
    tracker: DifficultyTracker,
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Turn: {}  Moves to draw: {}\n{}",
            self.turn_count, self.moves_to_draw, self.board
        )
    }
}

// Public Interface
impl GameState {
    /// Standard setup with `home_side` at the bottom of the board.
    pub fn new(home_side: Side) -> Self {
        GameState::from_board(Board::standard_setup(home_side))
    }

    pub fn from_board(board: Board) -> Self {
        GameState {
            board,
            moves_to_draw: MOVES_TO_DRAW,
            turn_count: 0,
            tracker: DifficultyTracker::default(),
        }
    }

    pub fn with_tracker(mut self, tracker: DifficultyTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move()
    }

    pub fn moves_to_draw(&self) -> u8 {
        self.moves_to_draw
    }

    pub fn turn_count(&self) -> u16 {
        self.turn_count
    }

    pub fn difficulty_rate(&self) -> f32 {
        self.tracker.rate()
    }

    pub fn tracker(&self) -> &DifficultyTracker {
        &self.tracker
    }

    pub fn legal_moves_all(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    pub fn legal_moves_for(&self, pos: Position) -> Vec<Move> {
        self.board.legal_moves_for(pos)
    }

    /// `None` while the game goes on. A drawn counter takes precedence over
    /// a side without moves.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.moves_to_draw == 0 {
            return Some(Outcome::Draw);
        }
        if self.board.legal_moves().is_empty() {
            return Some(Outcome::Winner(self.side_to_move().opposite()));
        }
        None
    }

    /// Finds the legal move from `start` to `end`. When several capture
    /// chains connect both squares, the one taking the most pieces is used.
    pub fn find_player_move(&self, start: Position, end: Position) -> DraughtsResult<Move> {
        self.legal_moves_for(start)
            .into_iter()
            .filter(|m| m.end == end)
            .max_by_key(|m| m.captured.len())
            .ok_or(DraughtsError::IllegalMove { start, end })
    }

    pub fn player_move(&mut self, start: Position, end: Position) -> DraughtsResult<MoveEffects> {
        if self.outcome().is_some() {
            return Err(DraughtsError::GameOver);
        }
        let m = self.find_player_move(start, end)?;
        self.play(&m)
    }

    /// Validates and plays `m`, updates the draw counter and passes the turn.
    pub fn play(&mut self, m: &Move) -> DraughtsResult<MoveEffects> {
        if self.outcome().is_some() {
            return Err(DraughtsError::GameOver);
        }
        if !self.board.legal_moves().contains(m) {
            return Err(DraughtsError::IllegalMove {
                start: m.start,
                end: m.end,
            });
        }
        self.moves_to_draw = self.board.moves_to_draw_after(m, self.moves_to_draw);
        let effects = self.board.make_move(m);
        self.board.flip_turn();
        self.turn_count += 1;
        Ok(effects)
    }

    /// Feeds a move of the tracked player, ranked among `root`, into the
    /// difficulty rate and returns the new rate.
    pub fn report_human_move(&mut self, m: &Move, root: &[ScoredMove]) -> f32 {
        self.tracker.update(m, root)
    }
}
