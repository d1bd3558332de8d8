use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{Board, CellState, EngineConfig, Session, Side, StepClock, Turn};
use serde_json::json;

/// Each clock reading advances this much, so a whole sampling window spans
/// a fixed number of readings.
const CLOCK_STEP: Duration = Duration::from_micros(50);
/// A game cannot take more than this many accepted shots per side.
const MAX_SHOTS: u32 = 100;

fn main() -> anyhow::Result<()> {
    seabattle::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        let program = args.first().map_or("sim", String::as_str);
        eprintln!("Usage: {} <seed> [games]", program);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u64 = match args.get(2) {
        Some(n) => n.parse()?,
        None => 1,
    };

    for game in 0..games {
        let result = play(seed.wrapping_add(game))?;
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn play(seed: u64) -> anyhow::Result<serde_json::Value> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let human = Board::random(&mut rng)?;
    let computer = Board::random(&mut rng)?;
    let mut session = Session::new(
        human,
        computer,
        EngineConfig::default(),
        StepClock::new(CLOCK_STEP),
        &mut rng,
    );
    let first = match session.turn() {
        Turn::Awaiting(side) => side,
        Turn::GameOver { winner } => winner,
    };

    while let Turn::Awaiting(side) = session.turn() {
        if session.shots_fired(side) >= MAX_SHOTS {
            return Err(anyhow::anyhow!("seed {}: {} exceeded {} shots", seed, side, MAX_SHOTS));
        }
        let report = session.auto_fire(side, &mut rng)?;
        if report.outcome.is_rejected() {
            return Err(anyhow::anyhow!(
                "seed {}: {} fired a rejected shot at {}",
                seed,
                side,
                report.coord
            ));
        }
    }

    let winner = session.winner();
    Ok(json!({
        "seed": seed,
        "first": first,
        "winner": winner,
        "human": {
            "shots": session.shots_fired(Side::Human),
            "hits": hits(&session, Side::Human),
        },
        "computer": {
            "shots": session.shots_fired(Side::Computer),
            "hits": hits(&session, Side::Computer),
        },
        "clock_readings": session.clock().readings() as u64,
    }))
}

/// Hits scored by `side` on the opposing grid.
fn hits(session: &Session<StepClock>, side: Side) -> usize {
    session.board(side.opponent()).count(CellState::Hit)
}
