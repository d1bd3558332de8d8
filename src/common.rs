//! Common types for sea battle: coordinates, sides, shot outcomes and errors.

use alloc::vec::Vec;
use core::fmt;

use rand::Rng;
use thiserror::Error;

use crate::bitboard::BitBoardError;
use crate::config::{BOARD_SIZE, CELL_COUNT};
use crate::ship::{ShipClass, ShipId};

const N: usize = BOARD_SIZE as usize;

/// A grid cell addressed by row and column, both in `0..10`.
///
/// "Horizontal" always means the column varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Unchecked constructor; out-of-range values are rejected where they
    /// are used.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Checked constructor.
    pub fn checked(row: usize, col: usize) -> Result<Self, ShotError> {
        let c = Self::new(row, col);
        if c.in_bounds() {
            Ok(c)
        } else {
            Err(ShotError::OutOfBounds { row, col })
        }
    }

    /// Cell at the row-major `index`.
    pub const fn from_index(index: usize) -> Self {
        Self::new(index / N, index % N)
    }

    /// Row-major index of the cell.
    pub const fn index(self) -> usize {
        self.row * N + self.col
    }

    pub const fn in_bounds(self) -> bool {
        self.row < N && self.col < N
    }

    /// The cell `(dr, dc)` away, if it is still on the grid.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Coord> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let c = Coord::new(row, col);
        c.in_bounds().then_some(c)
    }

    /// The cell `k` steps along `orientation` (negative `k` walks back).
    pub fn step(self, orientation: Orientation, k: isize) -> Option<Coord> {
        let (dr, dc) = orientation.delta();
        self.offset(dr * k, dc * k)
    }

    /// Up, down, left, right neighbours on the grid.
    pub fn orthogonal_neighbours(self) -> impl Iterator<Item = Coord> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// The four diagonal neighbours on the grid.
    pub fn diagonal_neighbours(self) -> impl Iterator<Item = Coord> {
        [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// The 3×3 block centred on the cell, clipped to the grid, the cell
    /// itself included.
    pub fn neighbourhood(self) -> impl Iterator<Item = Coord> {
        (-1..=1isize)
            .flat_map(|dr| (-1..=1isize).map(move |dc| (dr, dc)))
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Coord::from_index)
    }
}

/// Column letter followed by the 1-based row, `Coord::new(3, 4)` is `E4`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.col < 26 {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Axis a ship lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step `(row, col)` along the axis.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Axis joining two orthogonally adjacent cells.
    pub fn between(a: Coord, b: Coord) -> Option<Self> {
        match (a.row.abs_diff(b.row), a.col.abs_diff(b.col)) {
            (0, 1) => Some(Orientation::Horizontal),
            (1, 0) => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// The two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Human, Side::Computer];

    pub const fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Computer => 1,
        }
    }

    /// Uniform coin flip, used to pick who opens the game.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Side {
        if rng.random_bool(0.5) {
            Side::Human
        } else {
            Side::Computer
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => f.write_str("human"),
            Side::Computer => f.write_str("computer"),
        }
    }
}

/// Result of a fire command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The shot landed on open water.
    Miss,
    /// The shot damaged a ship that is still afloat.
    Hit { ship: ShipId },
    /// The shot finished a ship; its cells are announced.
    Sunk {
        ship: ShipId,
        class: ShipClass,
        cells: Vec<Coord>,
    },
    /// The command was refused and nothing changed.
    Rejected(ShotError),
}

impl ShotOutcome {
    /// `true` for hits and sinkings, which keep the turn.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. } | ShotOutcome::Sunk { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ShotOutcome::Rejected(_))
    }
}

/// Reasons a fire command is rejected. None of them ends the game.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotError {
    #[error("coordinates ({row}, {col}) are outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("there is no point in shooting that cell")]
    AlreadyTargeted,
    #[error("it is not this side's turn")]
    NotYourTurn,
    #[error("the game is already over")]
    GameOver,
    #[error("no unresolved cell is left to target")]
    NoTarget,
}

/// Errors returned while building a board from a fleet layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FleetError {
    #[error("bitboard error: {0}")]
    BitBoard(#[from] BitBoardError),
    #[error("ship of class {class:?} at {origin} does not fit on the grid")]
    OutOfBounds { class: ShipClass, origin: Coord },
    #[error("ship at {0} overlaps another ship")]
    Overlap(Coord),
    #[error("ship at {0} touches another ship")]
    Touching(Coord),
    #[error("expected {expected} ships of class {class:?}, found {found}")]
    WrongCount {
        class: ShipClass,
        expected: u8,
        found: u8,
    },
    #[error("unable to lay out the fleet")]
    UnableToPlace,
}
