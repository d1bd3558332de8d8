//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, ComputerPlayer, Coord, EngineConfig, Player, Session, ShotOutcome, ShotReport, Side,
    Turn,
};

#[cfg(feature = "std")]
pub use crate::{print_game_over, print_player_view, CliPlayer, SystemClock};
