//! Random legal fleet layouts.

use alloc::vec::Vec;

use rand::Rng;

use crate::bitboard::Grid;
use crate::board::Board;
use crate::common::{Coord, FleetError, Orientation};
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::ship::{ShipClass, ShipPlacement};

const PLACE_ATTEMPTS: usize = 100;
const RESTARTS: usize = 50;

/// Picks a spot for a ship of `class` that neither overlaps nor touches the
/// cells in `occupied`.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    class: ShipClass,
    occupied: Grid,
) -> Result<ShipPlacement, FleetError> {
    let taken = occupied.dilate();
    let n = BOARD_SIZE as usize;
    for _ in 0..PLACE_ATTEMPTS {
        let orientation = Orientation::random(rng);
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (n - 1, n - class.len()),
            Orientation::Vertical => (n - class.len(), n - 1),
        };
        let origin = Coord::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
        let placement = ShipPlacement::new(class, origin, orientation);
        let Some(cells) = placement.cells() else {
            continue;
        };
        if cells.iter().all(|&c| !taken.contains(c)) {
            return Ok(placement);
        }
    }
    Err(FleetError::UnableToPlace)
}

/// Lays out the standard fleet, largest ships first. Starts over from an
/// empty grid when a ship cannot be fitted.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<ShipPlacement>, FleetError> {
    'restart: for round in 0..RESTARTS {
        let mut occupied = Grid::new();
        let mut placements = Vec::with_capacity(NUM_SHIPS);
        for (class, count) in FLEET {
            for _ in 0..count {
                let Ok(placement) = random_placement(rng, class, occupied) else {
                    log::debug!("layout stuck on a {}, restart {}", class.name(), round + 1);
                    continue 'restart;
                };
                for c in placement.cells().into_iter().flatten() {
                    occupied.insert(c)?;
                }
                placements.push(placement);
            }
        }
        return Ok(placements);
    }
    log::warn!("gave up on a random layout after {} restarts", RESTARTS);
    Err(FleetError::UnableToPlace)
}

impl Board {
    /// A board with a random legal fleet.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, FleetError> {
        Board::new(&random_fleet(rng)?)
    }
}
