//! Ship classes, placed ships and the fleet roster of one side.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::Grid;
use crate::common::{Coord, FleetError, Orientation};
use crate::config::{FLEET, TOTAL_SHIP_CELLS};

/// Identifier of a ship within its fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u8);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Size class of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    Battleship,
    Cruiser,
    Destroyer,
    Boat,
}

impl ShipClass {
    /// Largest first.
    pub const ALL: [ShipClass; 4] = [
        ShipClass::Battleship,
        ShipClass::Cruiser,
        ShipClass::Destroyer,
        ShipClass::Boat,
    ];

    pub const fn len(self) -> usize {
        match self {
            ShipClass::Battleship => 4,
            ShipClass::Cruiser => 3,
            ShipClass::Destroyer => 2,
            ShipClass::Boat => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipClass::Battleship => "Battleship",
            ShipClass::Cruiser => "Cruiser",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Boat => "Boat",
        }
    }
}

/// Where a ship goes: the input handed over by the placement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub class: ShipClass,
    pub origin: Coord,
    pub orientation: Orientation,
}

impl ShipPlacement {
    pub const fn new(class: ShipClass, origin: Coord, orientation: Orientation) -> Self {
        Self {
            class,
            origin,
            orientation,
        }
    }

    /// Cells covered, origin first, or `None` when the span leaves the grid.
    pub fn cells(&self) -> Option<Vec<Coord>> {
        if !self.origin.in_bounds() {
            return None;
        }
        (0..self.class.len() as isize)
            .map(|k| self.origin.step(self.orientation, k))
            .collect()
    }
}

/// A ship placed on the grid together with its damage.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    class: ShipClass,
    origin: Coord,
    orientation: Orientation,
    cells: Vec<Coord>,
    mask: Grid,
    hits: u8,
}

impl Ship {
    /// Builds a ship from its placement, checking that it fits on the grid.
    pub fn new(id: ShipId, placement: ShipPlacement) -> Result<Self, FleetError> {
        let cells = placement.cells().ok_or(FleetError::OutOfBounds {
            class: placement.class,
            origin: placement.origin,
        })?;
        let mask = Grid::try_from_cells(cells.iter().copied())?;
        // Single-cell ships have no axis; report them as horizontal.
        let orientation = if placement.class.len() == 1 {
            Orientation::Horizontal
        } else {
            placement.orientation
        };
        Ok(Ship {
            id,
            class: placement.class,
            origin: placement.origin,
            orientation,
            cells,
            mask,
            hits: 0,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn len(&self) -> usize {
        self.class.len()
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells from the origin outwards.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Occupancy mask of the ship on the grid.
    pub fn mask(&self) -> Grid {
        self.mask
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.mask.contains(c)
    }

    pub fn hits(&self) -> usize {
        self.hits as usize
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits() == self.len()
    }

    /// The two cells just beyond the ends along the ship's axis. A boat has
    /// no axis, so both caps are taken horizontally.
    pub fn end_caps(&self) -> [Option<Coord>; 2] {
        let len = self.len() as isize;
        [
            self.origin.step(self.orientation, -1),
            self.origin.step(self.orientation, len),
        ]
    }

    /// Counts one more hit. Returns `true` when this hit sinks the ship.
    fn register_hit(&mut self) -> bool {
        if self.hits() < self.len() {
            self.hits += 1;
        }
        self.is_sunk()
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, class: {}, origin: {}, orientation: {:?}, hits: {}/{} }}",
            self.id,
            self.class.name(),
            self.origin,
            self.orientation,
            self.hits,
            self.len(),
        )
    }
}

/// Remaining ships per size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetCounts([u8; 4]);

impl FleetCounts {
    /// The full standard fleet.
    pub fn standard() -> Self {
        let mut counts = Self::default();
        for (class, n) in FLEET {
            counts.set(class, n);
        }
        counts
    }

    fn slot(class: ShipClass) -> usize {
        class.len() - 1
    }

    pub fn get(&self, class: ShipClass) -> u8 {
        self.0[Self::slot(class)]
    }

    pub fn set(&mut self, class: ShipClass, n: u8) {
        self.0[Self::slot(class)] = n;
    }

    pub fn decrement(&mut self, class: ShipClass) {
        let slot = &mut self.0[Self::slot(class)];
        *slot = slot.saturating_sub(1);
    }

    pub fn increment(&mut self, class: ShipClass) {
        let slot = &mut self.0[Self::slot(class)];
        *slot = slot.saturating_add(1);
    }

    /// Largest class with ships left.
    pub fn largest(&self) -> Option<ShipClass> {
        ShipClass::ALL.into_iter().find(|&c| self.get(c) > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Cells the ships occupy, a lower bound on the room they need.
    pub fn cells_needed(&self) -> usize {
        ShipClass::ALL
            .into_iter()
            .map(|c| c.len() * self.get(c) as usize)
            .sum()
    }
}

/// What a hit did to the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Damage {
    Hit(ShipId),
    Sunk(Ship),
}

/// Fleet roster of one side: ships afloat by id, plus the ships already sunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    active: BTreeMap<ShipId, Ship>,
    sunk: Vec<Ship>,
}

impl Fleet {
    pub(crate) fn new(ships: Vec<Ship>) -> Self {
        Fleet {
            active: ships.into_iter().map(|s| (s.id(), s)).collect(),
            sunk: Vec::new(),
        }
    }

    /// Ships still afloat, in id order.
    pub fn active(&self) -> impl Iterator<Item = &Ship> {
        self.active.values()
    }

    /// Ships sunk so far, in the order they went down.
    pub fn sunk(&self) -> &[Ship] {
        &self.sunk
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.active
            .get(&id)
            .or_else(|| self.sunk.iter().find(|s| s.id() == id))
    }

    /// Every ship, afloat or sunk, in id order.
    pub fn layout(&self) -> Vec<Ship> {
        let mut ships: Vec<Ship> = self.active.values().chain(self.sunk.iter()).cloned().collect();
        ships.sort_by_key(|s| s.id());
        ships
    }

    /// Returns `true` when all ships are sunk.
    pub fn is_destroyed(&self) -> bool {
        self.active.is_empty()
    }

    /// Remaining ships per class.
    pub fn remaining(&self) -> FleetCounts {
        let mut counts = FleetCounts::default();
        for ship in self.active.values() {
            counts.increment(ship.class());
        }
        counts
    }

    /// Cells belonging to sunk ships.
    pub fn sunk_cells(&self) -> usize {
        self.sunk.iter().map(Ship::len).sum()
    }

    /// Remaining ship cells plus sunk cells account for the whole fleet.
    pub fn is_consistent(&self) -> bool {
        self.remaining().cells_needed() + self.sunk_cells() == TOTAL_SHIP_CELLS
    }

    /// Counts a hit on ship `id`, moving it to the sunk list when it goes
    /// down. `None` if the ship is not afloat.
    pub(crate) fn register_hit(&mut self, id: ShipId) -> Option<Damage> {
        let ship = self.active.get_mut(&id)?;
        if !ship.register_hit() {
            return Some(Damage::Hit(id));
        }
        let ship = self.active.remove(&id)?;
        self.sunk.push(ship.clone());
        Some(Damage::Sunk(ship))
    }
}
