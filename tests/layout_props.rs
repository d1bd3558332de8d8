use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{
    random_fleet, Board, CellState, Grid, ShipClass, FLEET, NUM_SHIPS, TOTAL_SHIP_CELLS,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_fleet_is_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let placements = random_fleet(&mut rng).unwrap();
        prop_assert_eq!(placements.len(), NUM_SHIPS);
        for (class, n) in FLEET {
            prop_assert_eq!(placements.iter().filter(|p| p.class == class).count(), n as usize);
        }
        let board = Board::new(&placements).unwrap();
        prop_assert_eq!(board.count(CellState::Occupied), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn ships_keep_their_distance(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Board::random(&mut rng).unwrap();
        let ships: Vec<_> = board.fleet().active().cloned().collect();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                prop_assert!((a.mask().dilate() & b.mask()).is_empty());
            }
        }
        let all: Grid = ships.iter().flat_map(|s| s.cells().to_vec()).collect();
        prop_assert_eq!(all.len(), TOTAL_SHIP_CELLS);
        prop_assert!(ships.iter().any(|s| s.class() == ShipClass::Battleship));
    }
}
