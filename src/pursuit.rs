//! Follow-up targeting once a ship has been hit.

use alloc::vec::Vec;

use crate::board::TargetView;
use crate::common::{Coord, Orientation, ShotOutcome};
use crate::estimator::ScoreGrid;

/// Where the tracker stands with the ship it is chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitPhase {
    /// No damaged ship afloat.
    NoTarget,
    /// One hit, axis still open.
    FirstHit,
    /// Two or more hits in a line.
    OrientationKnown(Orientation),
}

/// Chases a damaged ship until it sinks.
///
/// The first hit queues its four orthogonal neighbours. A second hit next to
/// it fixes the axis, after which only the two cells just beyond the ends of
/// the hit run are candidates. Hits that do not extend the chase (possible
/// when a person picks the shots) wait in a backlog. They join the run as
/// soon as it grows up to them, or start a new chase once the current ship
/// sinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowUpTracker {
    first: Option<Coord>,
    hits: Vec<Coord>,
    axis: Option<Orientation>,
    queue: Vec<Coord>,
    backlog: Vec<Coord>,
}

impl FollowUpTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PursuitPhase {
        match (self.first, self.axis) {
            (None, _) => PursuitPhase::NoTarget,
            (Some(_), None) => PursuitPhase::FirstHit,
            (Some(_), Some(axis)) => PursuitPhase::OrientationKnown(axis),
        }
    }

    pub fn first_hit(&self) -> Option<Coord> {
        self.first
    }

    /// Hits on the ship being chased, in the order they landed.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    /// Candidate cells, in the order they were queued.
    pub fn queue(&self) -> &[Coord] {
        &self.queue
    }

    /// Hits waiting for their own chase.
    pub fn backlog(&self) -> &[Coord] {
        &self.backlog
    }

    pub fn is_active(&self) -> bool {
        self.first.is_some()
    }

    /// Drops all state, as when a new game starts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Best queued candidate that is still unknown: highest score in
    /// `scores`, earliest queued on ties. Without scores the earliest queued
    /// candidate wins.
    pub fn best_candidate(&self, view: &TargetView, scores: Option<&ScoreGrid>) -> Option<Coord> {
        let mut best: Option<(u32, Coord)> = None;
        for &c in self.queue.iter().filter(|&&c| view.is_unknown(c)) {
            let score = scores.map_or(0, |s| s.get(c));
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, c));
            }
        }
        best.map(|(_, c)| c)
    }

    /// Feeds the result of a shot at `coord`; `view` is the opponent grid
    /// after the shot.
    pub fn observe(&mut self, coord: Coord, outcome: &ShotOutcome, view: &TargetView) {
        match outcome {
            ShotOutcome::Miss => self.queue.retain(|&c| c != coord),
            ShotOutcome::Hit { .. } => self.on_hit(coord, view),
            ShotOutcome::Sunk { cells, .. } => self.on_sunk(cells, view),
            ShotOutcome::Rejected(_) => {}
        }
        self.queue.retain(|&c| view.is_unknown(c));
    }

    fn on_hit(&mut self, coord: Coord, view: &TargetView) {
        if self.first.is_none() {
            self.engage(coord, view);
        } else if self.extends(coord) {
            self.absorb(coord, view);
        } else if !self.backlog.contains(&coord) {
            log::trace!("hit at {} is off the chase, keeping it for later", coord);
            self.backlog.push(coord);
        }
    }

    fn on_sunk(&mut self, cells: &[Coord], view: &TargetView) {
        let chased = self.hits.iter().any(|c| cells.contains(c));
        self.backlog.retain(|c| !cells.contains(c));
        if !chased && self.first.is_some() {
            return;
        }
        log::trace!("pursuit resolved, {} hits pending", self.backlog.len());
        self.first = None;
        self.hits.clear();
        self.axis = None;
        self.queue.clear();
        if !self.backlog.is_empty() {
            let next = self.backlog.remove(0);
            self.engage(next, view);
            // Pick up pending hits that belong to the same ship.
            if let Some(pos) = self.backlog.iter().position(|&c| self.extends(c)) {
                let c = self.backlog.remove(pos);
                self.absorb(c, view);
            }
        }
    }

    /// Starts chasing the ship hit at `coord`.
    fn engage(&mut self, coord: Coord, view: &TargetView) {
        log::trace!("first hit at {}", coord);
        self.first = Some(coord);
        self.hits = alloc::vec![coord];
        self.axis = None;
        self.queue = coord
            .orthogonal_neighbours()
            .filter(|&c| view.is_unknown(c))
            .collect();
    }

    /// Whether a hit at `coord` continues the current chase.
    fn extends(&self, coord: Coord) -> bool {
        let Some(first) = self.first else {
            return false;
        };
        match self.axis {
            None => Orientation::between(first, coord).is_some(),
            Some(axis) => {
                let (lo, hi) = self.run(axis);
                lo.step(axis, -1) == Some(coord) || hi.step(axis, 1) == Some(coord)
            }
        }
    }

    fn absorb(&mut self, coord: Coord, view: &TargetView) {
        self.hits.push(coord);
        let axis = match self.axis {
            Some(axis) => axis,
            None => {
                let axis = self
                    .first
                    .and_then(|first| Orientation::between(first, coord))
                    .unwrap_or(Orientation::Horizontal);
                log::trace!("orientation locked to {:?}", axis);
                self.axis = Some(axis);
                axis
            }
        };
        // Pending hits may now sit just past an end of the run.
        while let Some(pos) = self.backlog.iter().position(|&c| self.extends(c)) {
            let c = self.backlog.remove(pos);
            log::trace!("pending hit at {} joins the run", c);
            self.hits.push(c);
        }
        let (lo, hi) = self.run(axis);
        self.queue = [lo.step(axis, -1), hi.step(axis, 1)]
            .into_iter()
            .flatten()
            .filter(|&c| view.is_unknown(c))
            .collect();
    }

    /// Two ends of the hit run along `axis`.
    fn run(&self, axis: Orientation) -> (Coord, Coord) {
        let key = |c: &&Coord| match axis {
            Orientation::Horizontal => c.col,
            Orientation::Vertical => c.row,
        };
        let first = self.first.unwrap_or(Coord::new(0, 0));
        let lo = self.hits.iter().min_by_key(key).copied().unwrap_or(first);
        let hi = self.hits.iter().max_by_key(key).copied().unwrap_or(first);
        (lo, hi)
    }
}
