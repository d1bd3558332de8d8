use std::time::Duration;

use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{
    Board, CellState, EngineConfig, SearchConfig, Session, Side, StepClock, Turn, TOTAL_SHIP_CELLS,
};

fn fast_config() -> EngineConfig {
    EngineConfig {
        search: SearchConfig {
            target_samples: 60,
            window: Duration::from_millis(100),
            max_search: Duration::from_millis(300),
            ..SearchConfig::DEFAULT
        },
        ..EngineConfig::default()
    }
}

fn auto_game(seed: u64) -> Session<StepClock> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let human = Board::random(&mut rng).unwrap();
    let computer = Board::random(&mut rng).unwrap();
    let mut s = Session::new(
        human,
        computer,
        fast_config(),
        StepClock::new(Duration::from_micros(50)),
        &mut rng,
    );
    while let Turn::Awaiting(side) = s.turn() {
        assert!(s.shots_fired(side) < 100, "{} ran out of cells", side);
        let report = s.auto_fire(side, &mut rng).unwrap();
        assert!(!report.outcome.is_rejected(), "rejected shot {:?}", report);
    }
    s
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn auto_games_end_with_a_full_sweep(seed in any::<u64>()) {
        let s = auto_game(seed);
        let winner = s.winner().unwrap();
        let loser = winner.opponent();
        let lost = s.board(loser);
        prop_assert_eq!(lost.count(CellState::Hit), TOTAL_SHIP_CELLS);
        prop_assert_eq!(lost.count(CellState::Occupied), 0);
        prop_assert!(lost.all_sunk());
        prop_assert!(s.board(winner).count(CellState::Hit) < TOTAL_SHIP_CELLS);
        prop_assert!(s.shots_fired(winner) <= 100);

        // Every sunk ship has its whole ring resolved.
        for ship in lost.fleet().sunk() {
            for c in ship.mask().ring().iter() {
                let state = lost.cell(c).unwrap();
                prop_assert!(
                    matches!(state, CellState::Blocked | CellState::Miss),
                    "{} next to a sunk ship is {:?}", c, state
                );
            }
        }
        for side in Side::BOTH {
            prop_assert!(s.board(side).fleet().is_consistent());
        }

        // Resolved cells refuse a second shot and stay as they are.
        let mut replay = lost.clone();
        for c in seabattle::Coord::all() {
            let before = replay.cell(c);
            if before.is_some_and(CellState::is_resolved) {
                prop_assert_eq!(replay.receive_shot(c), Err(seabattle::ShotError::AlreadyTargeted));
                prop_assert_eq!(replay.cell(c), before);
            }
        }
    }

    #[test]
    fn same_seed_same_game(seed in any::<u64>()) {
        let a = auto_game(seed);
        let b = auto_game(seed);
        prop_assert_eq!(a.winner(), b.winner());
        for side in Side::BOTH {
            prop_assert_eq!(a.shots_fired(side), b.shots_fired(side));
            prop_assert_eq!(format!("{:?}", a.board(side)), format!("{:?}", b.board(side)));
        }
    }
}
