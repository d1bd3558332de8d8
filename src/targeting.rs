//! Shot selection for one side: chase a damaged ship if there is one,
//! otherwise sample placements and take the most likely cell.

use rand::Rng;

use crate::board::TargetView;
use crate::clock::Clock;
use crate::common::{Coord, ShotOutcome};
use crate::config::SearchConfig;
use crate::estimator::{self, ScoreGrid, SearchStatus};
use crate::pursuit::FollowUpTracker;

#[derive(Debug, Clone, Default)]
pub struct Targeting {
    pursuit: FollowUpTracker,
    scores: Option<ScoreGrid>,
    last_status: Option<SearchStatus>,
}

impl Targeting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next cell to fire at, or `None` when nothing on `view` is unknown.
    pub fn select<R, C>(
        &mut self,
        view: &TargetView,
        config: &SearchConfig,
        clock: &C,
        rng: &mut R,
    ) -> Option<Coord>
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        if let Some(c) = self.pursuit.best_candidate(view, self.scores.as_ref()) {
            log::debug!("pursuit picks {}", c);
            return Some(c);
        }
        let estimate = estimator::estimate(view, config, clock, rng);
        self.last_status = Some(estimate.status);
        self.scores = Some(estimate.scores);
        estimate.target
    }

    /// Feeds back the result of a shot at `coord`.
    pub fn observe(&mut self, coord: Coord, outcome: &ShotOutcome, view: &TargetView) {
        self.pursuit.observe(coord, outcome, view);
    }

    /// Scores from the latest sampling pass.
    pub fn scores(&self) -> Option<&ScoreGrid> {
        self.scores.as_ref()
    }

    pub fn last_status(&self) -> Option<SearchStatus> {
        self.last_status
    }

    pub fn pursuit(&self) -> &FollowUpTracker {
        &self.pursuit
    }

    /// Forgets the chase and the score grid.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
