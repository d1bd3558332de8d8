//! Grid state of one side: cell states over its fleet, and the fogged view
//! an attacker is allowed to see.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::Grid;
use crate::common::{Coord, FleetError, ShotError};
use crate::config::{CELL_COUNT, FLEET, NUM_SHIPS};
use crate::ship::{Damage, Fleet, FleetCounts, Ship, ShipId, ShipPlacement};

/// State of one cell of a side's own grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Open water nobody has fired at.
    Empty,
    /// Unrevealed ship segment.
    Occupied,
    /// Proven ship-free by adjacency to a hit or a sunk ship.
    Blocked,
    Miss,
    Hit,
}

impl CellState {
    /// Final states: firing at them again is pointless.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Blocked | CellState::Miss | CellState::Hit)
    }
}

/// What the attacker knows about one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Knowledge {
    Unknown,
    Miss,
    Hit,
    Blocked,
}

impl From<CellState> for Knowledge {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Empty | CellState::Occupied => Knowledge::Unknown,
            CellState::Blocked => Knowledge::Blocked,
            CellState::Miss => Knowledge::Miss,
            CellState::Hit => Knowledge::Hit,
        }
    }
}

/// The opponent's grid as seen by the attacker, plus the classes still afloat
/// (sinkings are announced, so these are public).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetView {
    cells: [Knowledge; CELL_COUNT],
    remaining: FleetCounts,
}

impl TargetView {
    /// Nothing known yet about a fleet with `remaining` ships.
    pub fn new(remaining: FleetCounts) -> Self {
        Self {
            cells: [Knowledge::Unknown; CELL_COUNT],
            remaining,
        }
    }

    pub fn knowledge(&self, c: Coord) -> Knowledge {
        if c.in_bounds() {
            self.cells[c.index()]
        } else {
            Knowledge::Blocked
        }
    }

    /// Overwrites a cell; out-of-range cells are ignored.
    pub fn set(&mut self, c: Coord, knowledge: Knowledge) {
        if c.in_bounds() {
            self.cells[c.index()] = knowledge;
        }
    }

    pub fn is_unknown(&self, c: Coord) -> bool {
        self.knowledge(c) == Knowledge::Unknown
    }

    /// Unknown cells in row-major order.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&c| self.is_unknown(c))
    }

    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|&&k| k == Knowledge::Unknown).count()
    }

    pub fn remaining(&self) -> FleetCounts {
        self.remaining
    }
}

/// What a shot did on the defending board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Impact {
    Miss,
    Hit(ShipId),
    Sunk(Ship),
}

/// One side's grid: cell states plus the fleet roster.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; CELL_COUNT],
    owner: [Option<ShipId>; CELL_COUNT],
    fleet: Fleet,
}

impl Board {
    /// Builds a board from a full fleet layout, checking class counts, bounds
    /// and that no two ships overlap or touch, diagonals included.
    pub fn new(placements: &[ShipPlacement]) -> Result<Self, FleetError> {
        for (class, expected) in FLEET {
            let found = placements.iter().filter(|p| p.class == class).count() as u8;
            if found != expected {
                return Err(FleetError::WrongCount {
                    class,
                    expected,
                    found,
                });
            }
        }
        debug_assert_eq!(placements.len(), NUM_SHIPS);

        let mut cells = [CellState::Empty; CELL_COUNT];
        let mut owner = [None; CELL_COUNT];
        let mut occupied = Grid::new();
        let mut ships = Vec::with_capacity(placements.len());
        for (i, placement) in placements.iter().enumerate() {
            let ship = Ship::new(ShipId(i as u8), *placement)?;
            let mask = ship.mask();
            if !(occupied & mask).is_empty() {
                return Err(FleetError::Overlap(placement.origin));
            }
            if !(occupied & mask.ring()).is_empty() {
                return Err(FleetError::Touching(placement.origin));
            }
            occupied |= mask;
            for &c in ship.cells() {
                cells[c.index()] = CellState::Occupied;
                owner[c.index()] = Some(ship.id());
            }
            ships.push(ship);
        }
        Ok(Board {
            cells,
            owner,
            fleet: Fleet::new(ships),
        })
    }

    /// Current state of `c`, `None` outside the grid.
    pub fn cell(&self, c: Coord) -> Option<CellState> {
        c.in_bounds().then(|| self.cells[c.index()])
    }

    /// Transitions a fired-at cell: `Empty` becomes `Miss`, `Occupied`
    /// becomes `Hit`. Resolved cells are left alone.
    pub fn record_shot(&mut self, c: Coord) -> Result<CellState, ShotError> {
        let state = self.cell(c).ok_or(ShotError::OutOfBounds {
            row: c.row,
            col: c.col,
        })?;
        let next = match state {
            CellState::Empty => CellState::Miss,
            CellState::Occupied => CellState::Hit,
            CellState::Blocked | CellState::Miss | CellState::Hit => {
                return Err(ShotError::AlreadyTargeted)
            }
        };
        self.cells[c.index()] = next;
        Ok(next)
    }

    /// Marks an `Empty` cell as ship-free. Any other state, and cells outside
    /// the grid, are left untouched. Returns whether the cell changed.
    pub fn mark_blocked(&mut self, c: Coord) -> bool {
        match self.cell(c) {
            Some(CellState::Empty) => {
                self.cells[c.index()] = CellState::Blocked;
                true
            }
            _ => false,
        }
    }

    /// Records a shot and updates the damaged ship.
    pub fn receive_shot(&mut self, c: Coord) -> Result<Impact, ShotError> {
        match self.record_shot(c)? {
            CellState::Hit => {
                let id = self.owner[c.index()].ok_or(ShotError::AlreadyTargeted)?;
                match self.fleet.register_hit(id) {
                    Some(Damage::Sunk(ship)) => Ok(Impact::Sunk(ship)),
                    Some(Damage::Hit(id)) => Ok(Impact::Hit(id)),
                    None => {
                        log::error!("cell {} belongs to ship {} which is not afloat", c, id);
                        Ok(Impact::Hit(id))
                    }
                }
            }
            _ => Ok(Impact::Miss),
        }
    }

    /// Ship occupying `c`, afloat or sunk.
    pub fn ship_at(&self, c: Coord) -> Option<&Ship> {
        if !c.in_bounds() {
            return None;
        }
        let id = self.owner[c.index()]?;
        self.fleet.get(id)
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.fleet.is_destroyed()
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// What an attacker may know about this board.
    pub fn view(&self) -> TargetView {
        let mut view = TargetView::new(self.fleet.remaining());
        for c in Coord::all() {
            view.set(c, Knowledge::from(self.cells[c.index()]));
        }
        view
    }

    /// Classes of ship afloat.
    pub fn remaining(&self) -> FleetCounts {
        self.fleet.remaining()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.cells.chunks(crate::config::BOARD_SIZE as usize) {
            write!(f, "  ")?;
            for state in row {
                let ch = match state {
                    CellState::Empty => '.',
                    CellState::Occupied => 'S',
                    CellState::Blocked => '*',
                    CellState::Miss => 'o',
                    CellState::Hit => 'X',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  fleet: {:?}\n}}", self.fleet)
    }
}
