use rand::Rng;

use crate::clock::Clock;
use crate::common::{Coord, ShotError, ShotOutcome, Side};
use crate::game::{Session, ShotReport, Turn};

/// Interface implemented by different player types.
pub trait Player {
    /// Choose the next target for `side`. `None` means the player gives up
    /// its move, which only happens when nothing is left to shoot at or the
    /// input closed.
    fn select_target<C: Clock, R: Rng + ?Sized>(
        &mut self,
        session: &mut Session<C>,
        side: Side,
        rng: &mut R,
    ) -> Option<Coord>;

    /// Inform the player of the result of its own shot.
    fn handle_shot_result(&mut self, _report: &ShotReport) {}

    /// Inform the player of an opponent shot against its board.
    fn handle_opponent_shot(&mut self, _report: &ShotReport) {}
}

/// Always fires at the cell its own targeting picks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputerPlayer;

impl ComputerPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for ComputerPlayer {
    fn select_target<C: Clock, R: Rng + ?Sized>(
        &mut self,
        session: &mut Session<C>,
        side: Side,
        rng: &mut R,
    ) -> Option<Coord> {
        session.suggest(side, rng)
    }
}

/// Plays moves for whichever side holds the turn until it passes or the
/// game ends. Rejected shots are reported to the shooter only and the same
/// side is asked again.
pub fn play_turn<C, R, H, P>(
    session: &mut Session<C>,
    human: &mut H,
    computer: &mut P,
    rng: &mut R,
) -> Result<Turn, ShotError>
where
    C: Clock,
    R: Rng + ?Sized,
    H: Player,
    P: Player,
{
    let Turn::Awaiting(side) = session.turn() else {
        return Err(ShotError::GameOver);
    };
    loop {
        let report = match side {
            Side::Human => take_shot(session, side, human, computer, rng)?,
            Side::Computer => take_shot(session, side, computer, human, rng)?,
        };
        if report.next != Turn::Awaiting(side) {
            return Ok(report.next);
        }
    }
}

fn take_shot<C, R, S, T>(
    session: &mut Session<C>,
    side: Side,
    shooter: &mut S,
    target: &mut T,
    rng: &mut R,
) -> Result<ShotReport, ShotError>
where
    C: Clock,
    R: Rng + ?Sized,
    S: Player,
    T: Player,
{
    loop {
        let coord = shooter
            .select_target(session, side, rng)
            .ok_or(ShotError::NoTarget)?;
        let report = session.fire_at(side, coord);
        shooter.handle_shot_result(&report);
        match report.outcome {
            ShotOutcome::Rejected(err @ (ShotError::GameOver | ShotError::NotYourTurn)) => {
                return Err(err)
            }
            ShotOutcome::Rejected(_) => continue,
            _ => {
                target.handle_opponent_shot(&report);
                return Ok(report);
            }
        }
    }
}
