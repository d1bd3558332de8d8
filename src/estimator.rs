// Placement sampling over the unknown cells of an opponent grid.
// Scores every cell by how often a random, self-consistent layout of the
// remaining fleet covers it.

use alloc::vec::Vec;
use core::time::Duration;

use rand::Rng;

use crate::board::TargetView;
use crate::clock::Clock;
use crate::common::{Coord, Orientation};
use crate::config::{SearchConfig, CELL_COUNT};
use crate::ship::FleetCounts;

/// Accumulated placement counts per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreGrid([u32; CELL_COUNT]);

impl Default for ScoreGrid {
    fn default() -> Self {
        ScoreGrid([0; CELL_COUNT])
    }
}

impl ScoreGrid {
    pub fn get(&self, c: Coord) -> u32 {
        if c.in_bounds() {
            self.0[c.index()]
        } else {
            0
        }
    }

    fn bump(&mut self, c: Coord) {
        self.0[c.index()] += 1;
    }

    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Highest-scoring unknown cell, ties going to the first in row-major
    /// order. Cells with a zero score still qualify.
    pub fn best_unknown(&self, view: &TargetView) -> Option<Coord> {
        let mut best: Option<(u32, Coord)> = None;
        for c in view.unknown_cells() {
            let score = self.get(c);
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, c));
            }
        }
        best.map(|(_, c)| c)
    }

    pub fn as_array(&self) -> &[u32; CELL_COUNT] {
        &self.0
    }
}

/// How a sampling pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Collected the target number of samples.
    Converged,
    /// A window ended with some cell at the threshold.
    Threshold,
    /// The hard budget ran out after at least one sample.
    Truncated,
    /// Not a single layout fits the unknown cells; the pick is a fallback.
    Exhausted,
}

/// Outcome of one sampling pass.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub scores: ScoreGrid,
    pub samples: u32,
    /// Per-level attempt budget in force when the pass ended.
    pub attempts: u32,
    pub status: SearchStatus,
    /// Cell to fire at; `None` only when no cell is unknown.
    pub target: Option<Coord>,
}

/// Estimates where the remaining fleet is and picks the most likely cell.
///
/// Sampling runs in windows of `config.window`. A window that ends with no
/// cell at `config.min_cell_samples` widens the per-level attempt budget by
/// `config.attempts_step` and starts over; the whole pass never runs longer
/// than `config.max_search` on `clock`.
pub fn estimate<R, C>(view: &TargetView, config: &SearchConfig, clock: &C, rng: &mut R) -> Estimate
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    let remaining = view.remaining();
    let pool = CandidatePool::from_view(view);
    let mut scores = ScoreGrid::default();

    if remaining.is_empty() || pool.len() < remaining.cells_needed() {
        log::warn!(
            "search exhausted: {} unknown cells for {} ship cells",
            pool.len(),
            remaining.cells_needed()
        );
        let target = scores.best_unknown(view);
        return Estimate {
            scores,
            samples: 0,
            attempts: config.initial_attempts,
            status: SearchStatus::Exhausted,
            target,
        };
    }

    let started = clock.now();
    let deadline = started.saturating_add(config.max_search);
    let mut window_start = started;
    let mut samples = 0u32;
    let mut sampler = Sampler::new(pool, remaining, config.initial_attempts, deadline, clock, rng);

    let status = loop {
        if samples >= config.target_samples {
            break SearchStatus::Converged;
        }
        if sampler.sample() {
            samples += 1;
            for &c in sampler.placed() {
                scores.bump(c);
            }
        }
        sampler.reset();

        let now = clock.now();
        if now >= deadline {
            break if samples == 0 {
                SearchStatus::Exhausted
            } else {
                SearchStatus::Truncated
            };
        }
        if now.saturating_sub(window_start) >= config.window {
            if scores.max() >= config.min_cell_samples {
                break SearchStatus::Threshold;
            }
            sampler.attempts = sampler.attempts.saturating_add(config.attempts_step);
            window_start = now;
            log::debug!(
                "{} samples after a window, widening to {} attempts",
                samples,
                sampler.attempts
            );
        }
    };

    let target = scores.best_unknown(view);
    match status {
        SearchStatus::Exhausted => log::warn!("search exhausted, falling back to {:?}", target),
        SearchStatus::Truncated => log::warn!(
            "search budget of {:?} spent after {} samples",
            config.max_search,
            samples
        ),
        _ => log::debug!("{} samples, status {:?}, best {:?}", samples, status, target),
    }
    Estimate {
        scores,
        samples,
        attempts: sampler.attempts,
        status,
        target,
    }
}

/// Candidate cells of one sample: a dense arena with a position index, so
/// removal is a swap-remove and every removal can be undone exactly.
#[derive(Debug, Clone)]
struct CandidatePool {
    cells: Vec<Coord>,
    slot: [Option<u8>; CELL_COUNT],
}

impl CandidatePool {
    fn from_view(view: &TargetView) -> Self {
        let mut pool = CandidatePool {
            cells: Vec::with_capacity(CELL_COUNT),
            slot: [None; CELL_COUNT],
        };
        for c in view.unknown_cells() {
            pool.slot[c.index()] = Some(pool.cells.len() as u8);
            pool.cells.push(c);
        }
        pool
    }

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn contains(&self, c: Coord) -> bool {
        c.in_bounds() && self.slot[c.index()].is_some()
    }

    fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        self.cells[rng.random_range(0..self.cells.len())]
    }

    /// Removes `c`, returning the position it held.
    fn remove(&mut self, c: Coord) -> Option<usize> {
        let pos = self.slot[c.index()].take()? as usize;
        self.cells.swap_remove(pos);
        if let Some(&moved) = self.cells.get(pos) {
            self.slot[moved.index()] = Some(pos as u8);
        }
        Some(pos)
    }

    /// Reverses `remove(c)`; removals must be restored newest first.
    fn restore(&mut self, c: Coord, pos: usize) {
        self.cells.push(c);
        let last = self.cells.len() - 1;
        self.cells.swap(pos, last);
        self.slot[self.cells[last].index()] = Some(last as u8);
        self.slot[c.index()] = Some(pos as u8);
    }
}

/// Builds one hypothetical fleet layout by bounded backtracking.
struct Sampler<'a, R: ?Sized, C: ?Sized> {
    pool: CandidatePool,
    fleet: FleetCounts,
    remaining: FleetCounts,
    attempts: u32,
    placed: Vec<Coord>,
    undo: Vec<(Coord, usize)>,
    deadline: Duration,
    timed_out: bool,
    clock: &'a C,
    rng: &'a mut R,
}

impl<'a, R, C> Sampler<'a, R, C>
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    fn new(
        pool: CandidatePool,
        fleet: FleetCounts,
        attempts: u32,
        deadline: Duration,
        clock: &'a C,
        rng: &'a mut R,
    ) -> Self {
        Sampler {
            pool,
            fleet,
            remaining: fleet,
            attempts,
            placed: Vec::with_capacity(fleet.cells_needed()),
            undo: Vec::with_capacity(CELL_COUNT),
            deadline,
            timed_out: false,
            clock,
            rng,
        }
    }

    /// Tries to lay out the whole remaining fleet.
    fn sample(&mut self) -> bool {
        self.place_rest()
    }

    /// Cells of the last successful layout.
    fn placed(&self) -> &[Coord] {
        &self.placed
    }

    /// Puts the pool and counts back to their state before `sample`.
    fn reset(&mut self) {
        self.rollback(0);
        self.placed.clear();
        self.remaining = self.fleet;
        self.timed_out = false;
    }

    fn rollback(&mut self, mark: usize) {
        while self.undo.len() > mark {
            if let Some((c, pos)) = self.undo.pop() {
                self.pool.restore(c, pos);
            }
        }
    }

    fn place_rest(&mut self) -> bool {
        let Some(class) = self.remaining.largest() else {
            return true;
        };
        let len = class.len() as isize;
        for _ in 0..self.attempts {
            if self.pool.is_empty() {
                return false;
            }
            if self.clock.now() >= self.deadline {
                self.timed_out = true;
                return false;
            }
            let start = self.pool.random(&mut *self.rng);
            let orientation = Orientation::random(&mut *self.rng);
            let fits = (0..len).all(|k| {
                start
                    .step(orientation, k)
                    .is_some_and(|c| self.pool.contains(c))
            });
            if !fits {
                continue;
            }

            let undo_mark = self.undo.len();
            let placed_mark = self.placed.len();
            for k in 0..len {
                let Some(cell) = start.step(orientation, k) else {
                    continue;
                };
                self.placed.push(cell);
                for c in cell.neighbourhood() {
                    if let Some(pos) = self.pool.remove(c) {
                        self.undo.push((c, pos));
                    }
                }
            }
            self.remaining.decrement(class);
            if self.place_rest() {
                return true;
            }
            self.remaining.increment(class);
            self.rollback(undo_mark);
            self.placed.truncate(placed_mark);
            if self.timed_out {
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_restore_undoes_removals_exactly() {
        let view = TargetView::new(FleetCounts::standard());
        let mut pool = CandidatePool::from_view(&view);
        let before = pool.cells.clone();
        let mut undo = Vec::new();
        for c in [Coord::new(0, 0), Coord::new(5, 5), Coord::new(9, 9), Coord::new(4, 4)] {
            let pos = pool.remove(c).unwrap();
            undo.push((c, pos));
        }
        assert_eq!(pool.len(), before.len() - 4);
        assert!(!pool.contains(Coord::new(5, 5)));
        assert!(pool.remove(Coord::new(5, 5)).is_none());
        while let Some((c, pos)) = undo.pop() {
            pool.restore(c, pos);
        }
        assert_eq!(pool.cells, before);
        for (i, c) in pool.cells.iter().enumerate() {
            assert_eq!(pool.slot[c.index()], Some(i as u8));
        }
    }
}
