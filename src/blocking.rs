//! Marks cells that can no longer hold a ship.
//!
//! Ships are straight and never touch, not even diagonally. Once a ship is
//! sunk, the ring around it is open water; the ring already contains the two
//! end caps along its axis. A plain hit rules out its four diagonal
//! neighbours.

use alloc::vec::Vec;

use crate::board::Board;
use crate::common::Coord;
use crate::ship::Ship;

/// Blocks the ring around a sunk ship. Returns the newly blocked cells in
/// row-major order; cells already resolved are skipped.
pub fn block_around_sunk(board: &mut Board, ship: &Ship) -> Vec<Coord> {
    let ring = ship.mask().ring();
    debug_assert!(ship
        .end_caps()
        .iter()
        .flatten()
        .all(|&cap| ring.contains(cap)));
    ring.iter().filter(|&c| board.mark_blocked(c)).collect()
}

/// Blocks the diagonal neighbours of a hit cell.
pub fn block_hit_diagonals(board: &mut Board, hit: Coord) -> Vec<Coord> {
    let mut blocked: Vec<Coord> = hit
        .diagonal_neighbours()
        .filter(|&c| board.mark_blocked(c))
        .collect();
    blocked.sort();
    blocked
}
