use clap::{Parser, ValueEnum};
use draughts::agents::{EngineAgent, HumanAgent};
use draughts::config::{
    Algorithm, Difficulty, EngineConfig, SearchLimits, DEFAULT_DIFFICULTY_RATE,
};
use draughts::engine::Engine;
use draughts::evaluation::Weights;
use draughts::game::{Agent, Game};
use draughts::{DraughtsResult, GameState, Outcome, Side};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------
// Main
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// You play Black against the engine
    PlayBlack,
    /// You play White against the engine
    PlayWhite,
    /// A fixed strength engine plays an adaptive one
    Watch,
}

/// Draughts in the terminal against an engine that adapts to your strength.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::PlayBlack)]
    mode: Mode,

    /// Search algorithm of the engine you play against
    #[arg(long, value_enum, default_value_t = Algorithm::Adaptive)]
    algorithm: Algorithm,

    /// Initial search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u16,

    /// Time budget of a single search in milliseconds, 0 for none
    #[arg(long, default_value_t = 3000)]
    budget_ms: u64,

    #[arg(long, default_value_t = 500)]
    min_think_ms: u64,

    #[arg(long, default_value_t = 2000)]
    max_think_ms: u64,

    /// Fixed difficulty rate from 0 to 100. Follows your play when omitted.
    #[arg(long)]
    difficulty: Option<f32>,

    /// Seed for reproducible engines
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self, algorithm: Algorithm, difficulty: Difficulty) -> EngineConfig {
        EngineConfig {
            algorithm,
            initial_depth: self.depth,
            time_budget: match self.budget_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
            min_thinking_time: Duration::from_millis(self.min_think_ms),
            max_thinking_time: Duration::from_millis(self.max_think_ms),
            difficulty,
            weights: Weights::default(),
        }
    }

    fn engine(&self, algorithm: Algorithm, offset: u64) -> Engine {
        match self.seed {
            Some(seed) => {
                Engine::with_seed(algorithm, Weights::default(), seed.wrapping_add(offset))
            }
            None => Engine::new(algorithm, Weights::default()),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run<B: Agent, W: Agent>(
    game: Game<B, W>,
    tracked: Side,
    analyst: Engine,
    limits: SearchLimits,
) -> DraughtsResult<Outcome> {
    let mut game = game.tracking(tracked, analyst, limits).printing(true);
    game.play()
}

fn main() -> DraughtsResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let difficulty = match cli.difficulty {
        Some(rate) => Difficulty::Fixed(rate),
        None => Difficulty::Adaptive,
    };
    let home = match cli.mode {
        Mode::PlayWhite => Side::White,
        Mode::PlayBlack | Mode::Watch => Side::Black,
    };
    let state = GameState::new(home);
    let opponent = EngineAgent::new(
        cli.engine(cli.algorithm, 0),
        cli.config(cli.algorithm, difficulty),
    );
    let analyst = cli.engine(Algorithm::AlphaBeta, 1);
    let limits = cli.config(Algorithm::AlphaBeta, difficulty).limits(cli.depth);

    let outcome = match cli.mode {
        Mode::PlayBlack => {
            let game = Game::new(HumanAgent::new(), opponent, state);
            run(game, home, analyst, limits)?
        }
        Mode::PlayWhite => {
            let game = Game::new(opponent, HumanAgent::new(), state);
            run(game, home, analyst, limits)?
        }
        Mode::Watch => {
            // The home engine plays at a preset strength, the other one
            // follows it through the tracked difficulty rate.
            let preset = cli.difficulty.unwrap_or(DEFAULT_DIFFICULTY_RATE);
            let home_engine = EngineAgent::new(
                cli.engine(cli.algorithm, 2),
                cli.config(cli.algorithm, Difficulty::Fixed(preset)),
            );
            let adaptive = EngineAgent::new(
                cli.engine(Algorithm::Adaptive, 3),
                cli.config(Algorithm::Adaptive, Difficulty::Adaptive),
            );
            run(Game::new(home_engine, adaptive, state), home, analyst, limits)?
        }
    };

    println!("{}", outcome);
    Ok(())
}
