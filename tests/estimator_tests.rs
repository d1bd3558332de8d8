use std::time::Duration;

use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{
    estimate, random_fleet, Coord, FleetCounts, Knowledge, SearchConfig, SearchStatus, ShipClass,
    StepClock, TargetView,
};

fn quick_config() -> SearchConfig {
    SearchConfig {
        window: Duration::from_millis(2),
        max_search: Duration::from_millis(10),
        ..SearchConfig::DEFAULT
    }
}

#[test]
fn test_fresh_grid_converges() {
    let view = TargetView::new(FleetCounts::standard());
    let clock = StepClock::new(Duration::from_micros(1));
    let mut rng = SmallRng::seed_from_u64(1);
    let est = estimate(&view, &SearchConfig::DEFAULT, &clock, &mut rng);

    assert_eq!(est.status, SearchStatus::Converged);
    assert_eq!(est.samples, SearchConfig::DEFAULT.target_samples);
    // Every sample lays out all twenty ship cells on distinct cells.
    let total: u32 = est.scores.as_array().iter().sum();
    assert_eq!(total, est.samples * 20);
    let target = est.target.unwrap();
    assert_eq!(est.scores.get(target), est.scores.max());
}

#[test]
fn test_scores_only_unknown_cells() {
    let mut view = TargetView::new(FleetCounts::standard());
    for col in 0..10 {
        view.set(Coord::new(5, col), Knowledge::Miss);
    }
    view.set(Coord::new(0, 0), Knowledge::Blocked);
    let clock = StepClock::new(Duration::from_micros(1));
    let mut rng = SmallRng::seed_from_u64(2);
    let est = estimate(&view, &SearchConfig::DEFAULT, &clock, &mut rng);

    assert!(est.samples > 0);
    for col in 0..10 {
        assert_eq!(est.scores.get(Coord::new(5, col)), 0);
    }
    assert_eq!(est.scores.get(Coord::new(0, 0)), 0);
    assert!(view.is_unknown(est.target.unwrap()));
}

#[test]
fn test_too_few_cells_falls_back_immediately() {
    let mut view = TargetView::new(FleetCounts::standard());
    for c in Coord::all().skip(19) {
        view.set(c, Knowledge::Miss);
    }
    let clock = StepClock::new(Duration::from_millis(1));
    let mut rng = SmallRng::seed_from_u64(3);
    let est = estimate(&view, &SearchConfig::DEFAULT, &clock, &mut rng);

    assert_eq!(est.status, SearchStatus::Exhausted);
    assert_eq!(est.samples, 0);
    assert_eq!(est.target, Some(Coord::new(0, 0)));
    assert_eq!(clock.readings(), 0);
}

#[test]
fn test_unknown_cells_exactly_fit_the_fleet() {
    let mut rng = SmallRng::seed_from_u64(10);
    let layout: Vec<Coord> = random_fleet(&mut rng)
        .unwrap()
        .iter()
        .flat_map(|p| p.cells().unwrap())
        .collect();
    assert_eq!(layout.len(), 20);
    let mut view = TargetView::new(FleetCounts::standard());
    for c in Coord::all() {
        view.set(c, Knowledge::Miss);
    }
    for &c in &layout {
        view.set(c, Knowledge::Unknown);
    }

    let config = quick_config();
    let clock = StepClock::new(Duration::from_micros(1));
    let est = estimate(&view, &config, &clock, &mut rng);

    assert!(clock.readings() <= 10_000 + 10);
    // Any fitting layout covers every open cell exactly once.
    for &c in &layout {
        assert_eq!(est.scores.get(c), est.samples);
    }
    let target = est.target.unwrap();
    assert!(view.is_unknown(target));
    assert_eq!(Some(target), view.unknown_cells().next());
}

#[test]
fn test_impossible_geometry_terminates() {
    // A checkerboard of unknown cells has room for the cell count but not a
    // single straight ship longer than one cell.
    let mut view = TargetView::new(FleetCounts::standard());
    for c in Coord::all().filter(|c| (c.row + c.col) % 2 == 1) {
        view.set(c, Knowledge::Miss);
    }
    let config = quick_config();
    let clock = StepClock::new(Duration::from_micros(1));
    let mut rng = SmallRng::seed_from_u64(4);
    let est = estimate(&view, &config, &clock, &mut rng);

    assert_eq!(est.status, SearchStatus::Exhausted);
    assert_eq!(est.samples, 0);
    assert!(est.attempts > config.initial_attempts);
    assert_eq!(est.target, Some(Coord::new(0, 0)));
    // A little over the hard cap in clock readings, never unbounded.
    assert!(clock.readings() <= 10_000 + 10);
}

#[test]
fn test_no_unknown_cells() {
    let mut view = TargetView::new(FleetCounts::standard());
    for c in Coord::all() {
        view.set(c, Knowledge::Miss);
    }
    let clock = StepClock::new(Duration::from_micros(1));
    let mut rng = SmallRng::seed_from_u64(5);
    let est = estimate(&view, &SearchConfig::DEFAULT, &clock, &mut rng);
    assert_eq!(est.status, SearchStatus::Exhausted);
    assert_eq!(est.target, None);
}

#[test]
fn test_single_boat_left() {
    let mut remaining = FleetCounts::default();
    remaining.set(ShipClass::Boat, 1);
    let mut view = TargetView::new(remaining);
    for c in Coord::all() {
        view.set(c, Knowledge::Miss);
    }
    let open = [Coord::new(2, 2), Coord::new(7, 7), Coord::new(9, 0)];
    for c in open {
        view.set(c, Knowledge::Unknown);
    }
    let clock = StepClock::new(Duration::from_micros(1));
    let mut rng = SmallRng::seed_from_u64(6);
    let est = estimate(&view, &SearchConfig::DEFAULT, &clock, &mut rng);

    assert_eq!(est.status, SearchStatus::Converged);
    let on_open: u32 = open.iter().map(|&c| est.scores.get(c)).sum();
    assert_eq!(on_open, est.samples);
    assert!(open.contains(&est.target.unwrap()));
}

#[test]
fn test_same_seed_same_estimate() {
    let mut view = TargetView::new(FleetCounts::standard());
    view.set(Coord::new(4, 4), Knowledge::Miss);
    view.set(Coord::new(1, 8), Knowledge::Miss);
    let run = |seed| {
        let clock = StepClock::new(Duration::from_micros(5));
        let mut rng = SmallRng::seed_from_u64(seed);
        estimate(&view, &SearchConfig::DEFAULT, &clock, &mut rng)
    };
    let a = run(42);
    let b = run(42);
    assert_eq!(a.scores, b.scores);
    assert_eq!(a.samples, b.samples);
    assert_eq!(a.status, b.status);
    assert_eq!(a.target, b.target);
}

#[test]
fn test_threshold_ends_window() {
    // More samples than can be collected within one window: the window ends
    // with some cell above the threshold.
    let config = SearchConfig {
        target_samples: u32::MAX,
        window: Duration::from_millis(1),
        min_cell_samples: 1,
        ..SearchConfig::DEFAULT
    };
    let view = TargetView::new(FleetCounts::standard());
    let clock = StepClock::new(Duration::from_micros(1));
    let mut rng = SmallRng::seed_from_u64(7);
    let est = estimate(&view, &config, &clock, &mut rng);
    assert_eq!(est.status, SearchStatus::Threshold);
    assert!(est.scores.max() >= 1);
}
