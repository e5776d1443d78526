//! Clock sources.

use core::cell::Cell;

use embassy_time::{Duration, Instant};

use crate::Clock;

/// The `embassy-time` system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock
///
/// Useful for host-side simulation where the strip is driven from a
/// recorded or synthetic timeline.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub const fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to `now`
    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }

    /// Move the clock forward by `duration`, stopping at [`Instant::MAX`]
    pub fn advance(&self, duration: Duration) {
        let now = self.now.get().checked_add(duration).unwrap_or(Instant::MAX);
        self.now.set(now);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::from_ticks(0))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
