use alloc::vec::Vec;

use rand::Rng;

use crate::blocking;
use crate::board::{Board, Impact, TargetView};
use crate::clock::Clock;
use crate::common::{Coord, ShotError, ShotOutcome, Side};
use crate::config::EngineConfig;
use crate::ship::Ship;
use crate::targeting::Targeting;

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Awaiting(Side),
    GameOver { winner: Side },
}

/// Everything the presentation side needs to show one shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub attacker: Side,
    pub coord: Coord,
    pub outcome: ShotOutcome,
    /// Cells on the defender's grid newly proven empty by this shot.
    pub blocked: Vec<Coord>,
    /// Turn state after the shot.
    pub next: Turn,
}

/// One game between the human side and the computer side.
///
/// Holds both grids, the turn state and each side's targeting state. All
/// operations are synchronous and return a definite outcome; pacing is left
/// to the caller.
pub struct Session<C: Clock> {
    boards: [Board; 2],
    targeting: [Targeting; 2],
    turn: Turn,
    shots: [u32; 2],
    config: EngineConfig,
    clock: C,
}

impl<C: Clock> Session<C> {
    /// Starts a game; the opening side is a coin flip.
    pub fn new<R: Rng + ?Sized>(
        human: Board,
        computer: Board,
        config: EngineConfig,
        clock: C,
        rng: &mut R,
    ) -> Self {
        Self::with_first(human, computer, Side::random(rng), config, clock)
    }

    /// Starts a game with `first` to move.
    pub fn with_first(
        human: Board,
        computer: Board,
        first: Side,
        config: EngineConfig,
        clock: C,
    ) -> Self {
        log::info!("new game, {} goes first", first);
        Session {
            boards: [human, computer],
            targeting: [Targeting::new(), Targeting::new()],
            turn: Turn::Awaiting(first),
            shots: [0; 2],
            config,
            clock,
        }
    }

    /// Replaces both grids and discards every chase and score grid.
    pub fn reset<R: Rng + ?Sized>(&mut self, human: Board, computer: Board, rng: &mut R) {
        let first = Side::random(rng);
        log::info!("game reset, {} goes first", first);
        self.boards = [human, computer];
        for t in self.targeting.iter_mut() {
            t.reset();
        }
        self.turn = Turn::Awaiting(first);
        self.shots = [0; 2];
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        matches!(self.turn, Turn::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.turn {
            Turn::GameOver { winner } => Some(winner),
            Turn::Awaiting(_) => None,
        }
    }

    /// The grid owned by `side`.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// What `attacker` knows about the opposing grid.
    pub fn view_for(&self, attacker: Side) -> TargetView {
        self.boards[attacker.opponent().index()].view()
    }

    /// All ships of `side`, afloat and sunk, for the final reveal.
    pub fn fleet_layout(&self, side: Side) -> Vec<Ship> {
        self.board(side).fleet().layout()
    }

    /// Accepted shots fired by `side`.
    pub fn shots_fired(&self, side: Side) -> u32 {
        self.shots[side.index()]
    }

    pub fn targeting(&self, side: Side) -> &Targeting {
        &self.targeting[side.index()]
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Resolves a shot by `attacker` at `coord`.
    ///
    /// A rejected shot changes nothing. A miss passes the turn; a hit or a
    /// sinking keeps it, unless the last ship went down.
    pub fn fire_at(&mut self, attacker: Side, coord: Coord) -> ShotReport {
        if let Err(err) = self.check_turn(attacker) {
            return self.rejected(attacker, coord, err);
        }
        if !coord.in_bounds() {
            let err = ShotError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            };
            return self.rejected(attacker, coord, err);
        }

        let defender = attacker.opponent();
        let rules = self.config.rules;
        let board = &mut self.boards[defender.index()];
        let impact = match board.receive_shot(coord) {
            Ok(impact) => impact,
            Err(err) => return self.rejected(attacker, coord, err),
        };
        self.shots[attacker.index()] += 1;

        let (outcome, blocked) = match impact {
            Impact::Miss => {
                self.turn = Turn::Awaiting(defender);
                (ShotOutcome::Miss, Vec::new())
            }
            Impact::Hit(ship) => {
                let blocked = if rules.block_hit_diagonals {
                    blocking::block_hit_diagonals(board, coord)
                } else {
                    Vec::new()
                };
                (ShotOutcome::Hit { ship }, blocked)
            }
            Impact::Sunk(ship) => {
                let blocked = blocking::block_around_sunk(board, &ship);
                if board.all_sunk() {
                    log::info!("{} sank the last ship and wins", attacker);
                    self.turn = Turn::GameOver { winner: attacker };
                }
                let outcome = ShotOutcome::Sunk {
                    ship: ship.id(),
                    class: ship.class(),
                    cells: ship.cells().to_vec(),
                };
                (outcome, blocked)
            }
        };
        debug_assert!(board.fleet().is_consistent());

        log::debug!(
            "{} fires at {}: {:?}, {} cells blocked",
            attacker,
            coord,
            outcome,
            blocked.len()
        );
        let report = ShotReport {
            attacker,
            coord,
            outcome,
            blocked,
            next: self.turn,
        };
        let view = self.view_for(attacker);
        self.targeting[attacker.index()].observe(coord, &report.outcome, &view);
        report
    }

    /// Next cell `side` would fire at, without firing.
    pub fn suggest<R: Rng + ?Sized>(&mut self, side: Side, rng: &mut R) -> Option<Coord> {
        let view = self.view_for(side);
        self.targeting[side.index()].select(&view, &self.config.search, &self.clock, rng)
    }

    /// Lets `side` pick its own target and fire.
    pub fn auto_fire<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<ShotReport, ShotError> {
        self.check_turn(side)?;
        let coord = self.suggest(side, rng).ok_or(ShotError::NoTarget)?;
        Ok(self.fire_at(side, coord))
    }

    fn check_turn(&self, side: Side) -> Result<(), ShotError> {
        match self.turn {
            Turn::GameOver { .. } => Err(ShotError::GameOver),
            Turn::Awaiting(s) if s != side => Err(ShotError::NotYourTurn),
            Turn::Awaiting(_) => Ok(()),
        }
    }

    fn rejected(&self, attacker: Side, coord: Coord, err: ShotError) -> ShotReport {
        log::debug!("{} shot at {} rejected: {}", attacker, coord, err);
        ShotReport {
            attacker,
            coord,
            outcome: ShotOutcome::Rejected(err),
            blocked: Vec::new(),
            next: self.turn,
        }
    }
}
