#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod blocking;
mod board;
mod clock;
mod common;
mod config;
mod estimator;
mod game;
mod layout;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
mod player_cli;
pub mod prelude;
mod pursuit;
mod ship;
mod targeting;

pub use bitboard::{BitBoard, BitBoardError, Cells, Grid};
pub use blocking::{block_around_sunk, block_hit_diagonals};
pub use board::*;
pub use clock::*;
pub use common::*;
pub use config::*;
pub use estimator::{estimate, Estimate, ScoreGrid, SearchStatus};
pub use game::*;
pub use layout::{random_fleet, random_placement};
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with};
pub use player::*;
#[cfg(feature = "std")]
pub use player_cli::*;
pub use pursuit::*;
pub use ship::*;
pub use targeting::Targeting;
