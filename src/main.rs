#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::time::Duration;

#[cfg(feature = "std")]
use anyhow::anyhow;
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use seabattle::{
    init_logging, play_turn, print_game_over, Board, CliPlayer, EngineConfig, PacedComputer,
    Player, Rules, SearchConfig, Session, SystemClock, Turn,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[command(flatten)]
        game: GameArgs,
        #[arg(long, help = "Print the placement counts behind each suggestion")]
        scores: bool,
    },
    /// Watch the computer play against itself.
    Watch {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct GameArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = 700, help = "Pause before each computer shot, in milliseconds")]
    delay_ms: u64,
    #[arg(long, help = "Do not block the diagonal neighbours of a hit")]
    no_diagonal_blocking: bool,
    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct SearchArgs {
    #[arg(long, default_value_t = SearchConfig::DEFAULT.target_samples)]
    target_samples: u32,
    #[arg(long, default_value_t = 1000, help = "Sampling window, in milliseconds")]
    window_ms: u64,
    #[arg(long, default_value_t = SearchConfig::DEFAULT.min_cell_samples)]
    min_cell_samples: u32,
    #[arg(long, default_value_t = SearchConfig::DEFAULT.initial_attempts)]
    initial_attempts: u32,
    #[arg(long, default_value_t = SearchConfig::DEFAULT.attempts_step)]
    attempts_step: u32,
    #[arg(long, default_value_t = 3000, help = "Hard cap on one search, in milliseconds")]
    max_search_ms: u64,
}

#[cfg(feature = "std")]
impl GameArgs {
    fn config(&self) -> anyhow::Result<EngineConfig> {
        let s = &self.search;
        if s.initial_attempts == 0 {
            return Err(anyhow!("--initial-attempts must be at least 1"));
        }
        if s.window_ms > s.max_search_ms {
            return Err(anyhow!("--window-ms must not exceed --max-search-ms"));
        }
        Ok(EngineConfig {
            search: SearchConfig {
                target_samples: s.target_samples,
                window: Duration::from_millis(s.window_ms),
                min_cell_samples: s.min_cell_samples,
                initial_attempts: s.initial_attempts,
                attempts_step: s.attempts_step,
                max_search: Duration::from_millis(s.max_search_ms),
            },
            rules: Rules {
                block_hit_diagonals: !self.no_diagonal_blocking,
            },
        })
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(s) => {
                println!("Using fixed seed: {} (layouts are reproducible)", s);
                SmallRng::seed_from_u64(s)
            }
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        }
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { game, scores } => {
            let config = game.config()?;
            let mut rng = game.rng();
            let mut session = new_session(config, &mut rng)?;
            let mut human = CliPlayer::new().with_scores(scores);
            let mut computer = PacedComputer::new(Duration::from_millis(game.delay_ms));
            println!("Sea battle: you against the computer.");
            run(&mut session, &mut human, &mut computer, &mut rng)?;
        }
        Commands::Watch { game } => {
            let config = game.config()?;
            let mut rng = game.rng();
            let mut session = new_session(config, &mut rng)?;
            let delay = Duration::from_millis(game.delay_ms);
            let mut first = PacedComputer::new(delay).announcing();
            let mut second = PacedComputer::new(delay).announcing();
            println!("Sea battle: computer against computer.");
            run(&mut session, &mut first, &mut second, &mut rng)?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn new_session(config: EngineConfig, rng: &mut SmallRng) -> anyhow::Result<Session<SystemClock>> {
    let human = Board::random(rng).map_err(|e| anyhow!("human layout: {}", e))?;
    let computer = Board::random(rng).map_err(|e| anyhow!("computer layout: {}", e))?;
    let session = Session::new(human, computer, config, SystemClock::new(), rng);
    if let Turn::Awaiting(first) = session.turn() {
        println!("The {} goes first.", first);
    }
    Ok(session)
}

#[cfg(feature = "std")]
fn run<H: Player, P: Player>(
    session: &mut Session<SystemClock>,
    human: &mut H,
    computer: &mut P,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    loop {
        match play_turn(session, human, computer, rng) {
            Ok(Turn::GameOver { .. }) => break,
            Ok(Turn::Awaiting(_)) => {}
            Err(e) => {
                if session.is_over() {
                    break;
                }
                println!("Leaving the game: {}", e);
                return Ok(());
            }
        }
    }
    print_game_over(session);
    Ok(())
}
