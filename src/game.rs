use crate::config::SearchLimits;
use crate::draughts_errors::*;
use crate::engine::Engine;
use crate::game_state::*;
use crate::moves::*;
use crate::pieces::*;
use tracing::{debug, info};

/// An agent is an object that can play draughts by choosing moves appropriate
/// to a current game state. Returning `None` gives the game up.
pub trait Agent {
    fn play_move(&mut self, state: &GameState) -> Option<Move>;
}

// Ranks the moves of one side to keep the difficulty rate up to date. The
// root moves are scored when that side's turn begins.
struct Tracking {
    side: Side,
    analyst: Engine,
    limits: SearchLimits,
    root_moves: Vec<ScoredMove>,
}

pub struct Game<B: Agent, W: Agent> {
    black: B,
    white: W,
    state: GameState,
    tracking: Option<Tracking>,
    print_boards: bool,
}

impl<B: Agent, W: Agent> Game<B, W> {
    pub fn new(black: B, white: W, state: GameState) -> Game<B, W> {
        Game {
            black,
            white,
            state,
            tracking: None,
            print_boards: false,
        }
    }

    /// Tracks the moves of `side` with `analyst` searching to `limits`.
    pub fn tracking(mut self, side: Side, analyst: Engine, limits: SearchLimits) -> Self {
        self.tracking = Some(Tracking {
            side,
            analyst,
            limits,
            root_moves: Vec::new(),
        });
        self
    }

    pub fn printing(mut self, print_boards: bool) -> Self {
        self.print_boards = print_boards;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays until the game is decided.
    pub fn play(&mut self) -> DraughtsResult<Outcome> {
        self.refresh_tracking();
        loop {
            if self.print_boards {
                println!("{}", self.state);
            }
            if let Some(outcome) = self.step()? {
                if self.print_boards {
                    println!("{}", self.state);
                }
                info!(
                    %outcome,
                    turns = self.state.turn_count(),
                    rate = self.state.difficulty_rate(),
                    "game over"
                );
                return Ok(outcome);
            }
        }
    }

    /// Plays a single ply. Returns the outcome once the game is decided.
    pub fn step(&mut self) -> DraughtsResult<Option<Outcome>> {
        if let Some(outcome) = self.state.outcome() {
            return Ok(Some(outcome));
        }

        let side = self.state.side_to_move();
        let chosen = match side {
            Side::Black => self.black.play_move(&self.state),
            Side::White => self.white.play_move(&self.state),
        };
        let mv = match chosen {
            Some(mv) => mv,
            None => {
                info!(%side, "gave up");
                return Ok(Some(Outcome::Winner(side.opposite())));
            }
        };

        let effects = self.state.play(&mv)?;
        info!(%side, %mv, promoted = effects.promoted, "move played");

        if let Some(tracking) = &mut self.tracking {
            if tracking.side == side && !tracking.root_moves.is_empty() {
                let rate = self.state.report_human_move(&mv, &tracking.root_moves);
                debug!(rate, "difficulty rate updated");
                tracking.root_moves.clear();
            }
        }

        self.refresh_tracking();
        Ok(self.state.outcome())
    }

    fn refresh_tracking(&mut self) {
        let state = &self.state;
        if let Some(tracking) = &mut self.tracking {
            if tracking.side == state.side_to_move() && state.outcome().is_none() {
                tracking.root_moves = tracking.analyst.root_moves(
                    state.board(),
                    tracking.side,
                    state.moves_to_draw(),
                    tracking.limits,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::*;
    use crate::config::{Algorithm, EngineConfig};
    use crate::evaluation::Weights;
    use std::time::Duration;

    // Plays back a fixed list of moves, then gives up.
    struct Scripted(Vec<Move>);

    impl Agent for Scripted {
        fn play_move(&mut self, _state: &GameState) -> Option<Move> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    fn quick_config() -> EngineConfig {
        EngineConfig {
            initial_depth: 2,
            time_budget: None,
            min_thinking_time: Duration::ZERO,
            max_thinking_time: Duration::from_secs(60),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_random_against_engine_ends() {
        let state = GameState::new(Side::Black);
        let engine = Engine::with_seed(Algorithm::Adaptive, Weights::default(), 3);
        let mut game = Game::new(
            RandomAgent::with_seed(4),
            EngineAgent::new(engine, quick_config()),
            state,
        )
        .tracking(
            Side::Black,
            Engine::with_seed(Algorithm::AlphaBeta, Weights::default(), 5),
            SearchLimits::depth(2),
        );

        let outcome = game.play().unwrap();
        assert_eq!(game.state().outcome(), Some(outcome));
        assert!(!game.state().tracker().history().is_empty());
        let rate = game.state().difficulty_rate();
        assert!((0.0..=100.0).contains(&rate));
    }

    #[test]
    fn test_giving_up_loses() {
        let mut game = Game::new(
            Scripted(Vec::new()),
            RandomAgent::with_seed(1),
            GameState::new(Side::Black),
        );
        assert_eq!(game.play(), Ok(Outcome::Winner(Side::White)));
    }

    #[test]
    fn test_illegal_agent_move_is_an_error() {
        let bogus = Move::new("c3".parse().unwrap(), "c5".parse().unwrap(), Vec::new());
        let mut game = Game::new(
            Scripted(vec![bogus]),
            RandomAgent::with_seed(1),
            GameState::new(Side::Black),
        );
        assert!(matches!(
            game.step(),
            Err(DraughtsError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_rejected_move_is_not_tracked() {
        let p = |s: &str| -> crate::positions::Position { s.parse().unwrap() };
        // Same squares as the legal c3-d4, but claims a capture.
        let bogus = Move::new(p("c3"), p("d4"), vec![p("e5")]);
        let legal = Move::new(p("c3"), p("d4"), Vec::new());
        let mut game = Game::new(
            Scripted(vec![bogus, legal]),
            RandomAgent::with_seed(1),
            GameState::new(Side::Black),
        )
        .tracking(
            Side::Black,
            Engine::with_seed(Algorithm::AlphaBeta, Weights::default(), 2),
            SearchLimits::depth(2),
        );
        game.refresh_tracking();

        assert!(matches!(
            game.step(),
            Err(DraughtsError::IllegalMove { .. })
        ));
        assert!(game.state().tracker().history().is_empty());
        assert_eq!(game.state().turn_count(), 0);

        assert_eq!(game.step(), Ok(None));
        assert_eq!(game.state().tracker().history().len(), 1);
    }
}
