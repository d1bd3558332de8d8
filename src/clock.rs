//! Time sources for the bounded placement search.

use core::cell::Cell;
use core::time::Duration;

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall-clock time.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that moves forward by `step` every time it is read. A search
/// timed by it depends only on the random number generator.
#[derive(Debug, Clone)]
pub struct StepClock {
    now: Cell<Duration>,
    step: Duration,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    /// Number of readings so far, when `step` is non-zero.
    pub fn readings(&self) -> u128 {
        if self.step.is_zero() {
            0
        } else {
            self.now.get().as_nanos() / self.step.as_nanos()
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        let t = self.now.get().saturating_add(self.step);
        self.now.set(t);
        t
    }
}
