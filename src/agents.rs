//! Differing kinds of agents that can play the game
use crate::config::{Difficulty, EngineConfig, ABSOLUTE_MAX_DEPTH};
use crate::engine::Engine;
use crate::game::Agent;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::positions::Position;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use text_io::try_read;
use tracing::{info, warn};

pub struct HumanAgent {}

impl HumanAgent {
    pub fn new() -> Self {
        HumanAgent {}
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        HumanAgent::new()
    }
}

/// Reads squares like `c3 d4`, `c3-d4` or `c3xe5xc7`. Returns `None` if any
/// of them is not a square or fewer than two are given.
pub fn parse_squares(input: &str) -> Option<Vec<Position>> {
    let squares = input
        .split(|c: char| c.is_whitespace() || c == '-' || c == 'x')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Position>().ok())
        .collect::<Option<Vec<Position>>>()?;
    if squares.len() < 2 {
        return None;
    }
    Some(squares)
}

/// The legal move given by `squares`: start and end, plus the landing
/// squares in between to tell apart chains sharing both. Among chains that
/// still match, the one taking the most pieces wins.
pub fn match_move(legal: &[Move], squares: &[Position]) -> Option<Move> {
    let (start, end) = (*squares.first()?, *squares.last()?);
    legal
        .iter()
        .filter(|m| m.start == start && m.end == end)
        .filter(|m| squares.len() == 2 || m.path() == squares)
        .max_by_key(|m| m.captured.len())
        .cloned()
}

impl Agent for HumanAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        let legal = state.legal_moves_all();
        if legal.is_empty() {
            return None;
        }
        loop {
            println!("Your turn ({}), empty input gives up.", state.side_to_move());
            let listed: Vec<String> = legal.iter().map(|m| m.to_string()).collect();
            println!("Legal moves: {}", listed.join(" "));
            print!("Move: ");
            stdout().flush().ok()?;

            let input: String = match try_read!("{}\n") {
                Ok(input) => input,
                Err(_) => return None,
            };
            let input = input.trim();
            if input.is_empty() {
                return None;
            }

            match parse_squares(input) {
                None => warn!(input, "could not read the move, use e.g. c3-d4"),
                Some(squares) => match match_move(&legal, &squares) {
                    Some(mv) => return Some(mv),
                    None => warn!(input, "not a legal move"),
                },
            }
        }
    }
}

pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        RandomAgent::new()
    }
}

impl Agent for RandomAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        state.legal_moves_all().choose(&mut self.rng).cloned()
    }
}

/// Plays with an engine. The search depth follows how long the previous
/// search took, see `EngineConfig`.
pub struct EngineAgent {
    engine: Engine,
    config: EngineConfig,
    depth: u16,
}

impl EngineAgent {
    pub fn new(engine: Engine, config: EngineConfig) -> Self {
        let depth = config.initial_depth.clamp(1, ABSOLUTE_MAX_DEPTH);
        EngineAgent {
            engine,
            config,
            depth,
        }
    }

    pub fn depth(&self) -> u16 {
        self.depth
    }

    fn difficulty_rate(&self, state: &GameState) -> f32 {
        match self.config.difficulty {
            Difficulty::Adaptive => state.difficulty_rate(),
            Difficulty::Fixed(rate) => rate,
        }
    }

    fn adapt_depth(&mut self, elapsed: Duration, played: &Move) {
        if elapsed < self.config.min_thinking_time
            && !played.is_capture()
            && self.depth < ABSOLUTE_MAX_DEPTH
        {
            self.depth += 1;
            info!(depth = self.depth, ?elapsed, "searching deeper");
        } else if elapsed > self.config.max_thinking_time && self.depth > 1 {
            self.depth -= 1;
            info!(depth = self.depth, ?elapsed, "searching shallower");
        }
    }
}

impl Agent for EngineAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        let rate = self.difficulty_rate(state);
        let started = Instant::now();
        let chosen = self.engine.choose_move(
            state.board(),
            state.side_to_move(),
            state.moves_to_draw(),
            self.config.limits(self.depth),
            rate,
        );
        let mv = chosen.mv?;
        let elapsed = started.elapsed();
        info!(
            side = %state.side_to_move(),
            %mv,
            score = chosen.score,
            rate,
            ?elapsed,
            "engine move"
        );
        self.adapt_depth(elapsed, &mv);
        Some(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Algorithm;
    use crate::evaluation::Weights;
    use crate::pieces::Side;

    fn p(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_squares() {
        assert_eq!(parse_squares("c3 d4"), Some(vec![p("c3"), p("d4")]));
        assert_eq!(parse_squares("C3-D4"), Some(vec![p("c3"), p("d4")]));
        assert_eq!(
            parse_squares("c3xe5xc7"),
            Some(vec![p("c3"), p("e5"), p("c7")])
        );
        assert_eq!(parse_squares("c3"), None);
        assert_eq!(parse_squares("c3 z9"), None);
    }

    #[test]
    fn test_match_move() {
        let g = GameState::new(Side::Black);
        let legal = g.legal_moves_all();
        let mv = match_move(&legal, &[p("c3"), p("d4")]).unwrap();
        assert_eq!(mv, Move::new(p("c3"), p("d4"), Vec::new()));
        assert_eq!(match_move(&legal, &[p("c3"), p("e5")]), None);

        let circle = Move::new(p("c3"), p("c3"), vec![p("d4"), p("f4"), p("f2"), p("d2")]);
        let other = Move::new(p("c3"), p("c3"), vec![p("d2"), p("f2"), p("f4"), p("d4")]);
        let legal = vec![circle.clone(), other.clone()];
        assert_eq!(
            match_move(&legal, &[p("c3"), p("e1"), p("g3"), p("e5"), p("c3")]),
            Some(other)
        );
        assert_eq!(
            match_move(&legal, &[p("c3"), p("e5"), p("g3"), p("e1"), p("c3")]),
            Some(circle)
        );
    }

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let mut agent = RandomAgent::with_seed(12);
        let mut g = GameState::new(Side::White);
        for _ in 0..30 {
            let mv = match agent.play_move(&g) {
                Some(mv) => mv,
                None => break,
            };
            assert!(g.legal_moves_all().contains(&mv));
            if g.play(&mv).is_err() {
                break;
            }
        }
    }

    #[test]
    fn test_engine_agent_adapts_depth() {
        let engine = Engine::with_seed(Algorithm::AlphaBeta, Weights::default(), 6);
        let config = EngineConfig {
            initial_depth: 1,
            time_budget: None,
            min_thinking_time: Duration::from_secs(60),
            max_thinking_time: Duration::from_secs(120),
            difficulty: Difficulty::Fixed(100.0),
            ..EngineConfig::default()
        };
        let mut agent = EngineAgent::new(engine, config);
        let g = GameState::new(Side::Black);
        let mv = agent.play_move(&g).unwrap();
        assert!(g.legal_moves_all().contains(&mv));
        // Answered well within the minimum thinking time
        assert_eq!(agent.depth(), 2);

        let step = Move::new(p("c3"), p("d4"), Vec::new());
        agent.config.min_thinking_time = Duration::ZERO;
        agent.config.max_thinking_time = Duration::ZERO;
        agent.adapt_depth(Duration::from_millis(5), &step);
        assert_eq!(agent.depth(), 1);
        agent.adapt_depth(Duration::from_millis(5), &step);
        assert_eq!(agent.depth(), 1);
    }
}
