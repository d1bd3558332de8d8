#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::string::String;
use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::board::{Board, CellState, Knowledge, TargetView};
use crate::clock::Clock;
use crate::common::{Coord, ShotOutcome, Side};
use crate::config::BOARD_SIZE;
use crate::estimator::ScoreGrid;
use crate::game::{Session, ShotReport, Turn};
use crate::player::{ComputerPlayer, Player};
use crate::ship::Ship;

const N: usize = BOARD_SIZE as usize;

/// Parses `E4`-style input: a column letter `A`..`J` followed by a row
/// number `1`..`10`.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next()?.to_ascii_uppercase();
    if !col_ch.is_ascii_uppercase() {
        return None;
    }
    let col = (col_ch as u8 - b'A') as usize;
    let row: usize = chars.as_str().trim().parse().ok()?;
    if row == 0 {
        return None;
    }
    Coord::checked(row - 1, col).ok()
}

fn header(out: &mut String) {
    out.push_str("   ");
    for c in 0..N {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
}

fn render_grid(glyph: impl Fn(Coord) -> char) -> String {
    let mut out = String::new();
    header(&mut out);
    for r in 0..N {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..N {
            let _ = write!(out, " {}", glyph(Coord::new(r, c)));
        }
        out.push('\n');
    }
    out
}

fn cell_glyph(state: CellState, reveal: bool) -> char {
    match state {
        CellState::Occupied if reveal => 'S',
        CellState::Empty | CellState::Occupied => '.',
        CellState::Blocked => '*',
        CellState::Miss => 'o',
        CellState::Hit => 'X',
    }
}

/// A side's own grid; ships are drawn when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    render_grid(|c| cell_glyph(board.cell(c).unwrap_or(CellState::Empty), reveal))
}

/// What an attacker knows about the opposing grid.
pub fn render_view(view: &TargetView) -> String {
    render_grid(|c| match view.knowledge(c) {
        Knowledge::Unknown => '.',
        Knowledge::Miss => 'o',
        Knowledge::Hit => 'X',
        Knowledge::Blocked => '*',
    })
}

/// Placement counts of the latest sampling pass, one number per cell.
pub fn render_scores(scores: &ScoreGrid) -> String {
    let mut out = String::new();
    out.push_str("   ");
    for c in 0..N {
        let _ = write!(out, " {:>4}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..N {
        let _ = write!(out, "{:2} ", r + 1);
        for c in 0..N {
            let _ = write!(out, " {:>4}", scores.get(Coord::new(r, c)));
        }
        out.push('\n');
    }
    out
}

/// Short description of a shot for the log line under the boards.
pub fn describe(report: &ShotReport) -> String {
    let what = match &report.outcome {
        ShotOutcome::Miss => String::from("miss"),
        ShotOutcome::Hit { .. } => String::from("hit"),
        ShotOutcome::Sunk { class, .. } => std::format!("sunk a {}", class.name()),
        ShotOutcome::Rejected(err) => std::format!("rejected: {}", err),
    };
    std::format!("{} fires at {} -> {}", report.attacker, report.coord, what)
}

/// Both grids as seen by `side`: the opponent fogged on top, its own below.
pub fn print_player_view<C: Clock>(session: &Session<C>, side: Side) {
    std::println!("Opponent board:");
    std::print!("{}", render_view(&session.view_for(side)));
    std::println!("\nYour board:");
    std::print!("{}", render_board(session.board(side), true));
}

/// End of game summary. The computer fleet is uncovered only when the
/// computer won.
pub fn print_game_over<C: Clock>(session: &Session<C>) {
    std::println!("\n=== GAME OVER ===");
    let Some(winner) = session.winner() else {
        return;
    };
    std::println!(
        "{} wins after {} shots ({} shots by the {}).",
        winner,
        session.shots_fired(winner),
        session.shots_fired(winner.opponent()),
        winner.opponent()
    );
    if winner == Side::Computer {
        std::println!("\nComputer fleet:");
        std::print!("{}", render_board(session.board(Side::Computer), true));
        for ship in session.fleet_layout(Side::Computer) {
            std::println!("  {}", describe_ship(&ship));
        }
    }
}

fn describe_ship(ship: &Ship) -> String {
    std::format!(
        "{} {} at {} {:?}{}",
        ship.class().name(),
        ship.id(),
        ship.origin(),
        ship.orientation(),
        if ship.is_sunk() { " (sunk)" } else { "" }
    )
}

/// Human player reading targets from stdin.
pub struct CliPlayer {
    show_scores: bool,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self { show_scores: false }
    }

    /// Also print the score grid behind each suggestion.
    pub fn with_scores(mut self, show: bool) -> Self {
        self.show_scores = show;
        self
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for CliPlayer {
    fn select_target<C: Clock, R: Rng + ?Sized>(
        &mut self,
        session: &mut Session<C>,
        side: Side,
        rng: &mut R,
    ) -> Option<Coord> {
        let hint = session.suggest(side, rng);
        let stdin = io::stdin();
        loop {
            std::println!();
            print_player_view(session, side);
            if self.show_scores {
                if let Some(scores) = session.targeting(side).scores() {
                    std::println!("\nPlacement counts:");
                    std::print!("{}", render_scores(scores));
                }
            }
            match hint {
                Some(h) => std::print!("Enter target [{}]: ", h),
                None => std::print!("Enter target: "),
            }
            let _ = io::stdout().flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let line = line.trim();
            if line.is_empty() {
                if hint.is_some() {
                    return hint;
                }
                continue;
            }
            match parse_coord(line) {
                Some(c) => return Some(c),
                None => std::println!("Invalid coordinate, expected something like E4"),
            }
        }
    }

    fn handle_shot_result(&mut self, report: &ShotReport) {
        std::println!("{}", describe(report));
        if let Turn::GameOver { .. } = report.next {
            return;
        }
        if report.outcome.is_hit() {
            std::println!("Fire again.");
        }
    }

    fn handle_opponent_shot(&mut self, report: &ShotReport) {
        std::println!("{}", describe(report));
    }
}

/// Computer opponent for the terminal: waits `delay` before each shot and
/// announces it.
pub struct PacedComputer {
    inner: ComputerPlayer,
    delay: Duration,
    announce: bool,
}

impl PacedComputer {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: ComputerPlayer::new(),
            delay,
            announce: false,
        }
    }

    /// Print every own shot together with both grids, for watching two
    /// computers play.
    pub fn announcing(mut self) -> Self {
        self.announce = true;
        self
    }
}

impl Player for PacedComputer {
    fn select_target<C: Clock, R: Rng + ?Sized>(
        &mut self,
        session: &mut Session<C>,
        side: Side,
        rng: &mut R,
    ) -> Option<Coord> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let target = self.inner.select_target(session, side, rng);
        if self.announce {
            std::println!("\n{} targets:", side);
            std::print!("{}", render_view(&session.view_for(side)));
        }
        target
    }

    fn handle_shot_result(&mut self, report: &ShotReport) {
        if self.announce {
            std::println!("{}", describe(report));
        }
    }
}
