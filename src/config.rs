use core::time::Duration;

use crate::ship::ShipClass;

pub const BOARD_SIZE: u8 = 10;
pub const CELL_COUNT: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;
pub const NUM_SHIPS: usize = 10;

/// Standard fleet, largest class first: one battleship, two cruisers, three
/// destroyers and four boats.
pub const FLEET: [(ShipClass, u8); 4] = [
    (ShipClass::Battleship, 1),
    (ShipClass::Cruiser, 2),
    (ShipClass::Destroyer, 3),
    (ShipClass::Boat, 4),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 4 + 2 * 3 + 3 * 2 + 4;

/// Tuning of the placement sampling search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Successful placement samples collected before the pass stops.
    pub target_samples: u32,
    /// Length of one sampling window.
    pub window: Duration,
    /// A window ends the pass early once some cell has this many samples.
    pub min_cell_samples: u32,
    /// Placement attempts per fleet level in the first window.
    pub initial_attempts: u32,
    /// Attempts added each time a window ends below `min_cell_samples`.
    pub attempts_step: u32,
    /// Hard cap on a whole pass, whatever the sampling luck.
    pub max_search: Duration,
}

impl SearchConfig {
    pub const DEFAULT: Self = Self {
        target_samples: 200,
        window: Duration::from_secs(1),
        min_cell_samples: 3,
        initial_attempts: 3,
        attempts_step: 5,
        max_search: Duration::from_secs(3),
    };
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Deduction rules applied when shots land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    /// Block the four diagonal neighbours of every hit, not only the ring of
    /// a sunk ship.
    pub block_hit_diagonals: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            block_hit_diagonals: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub rules: Rules,
}
