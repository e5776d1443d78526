//! Fixed-rate cadence for time based animation.
//!
//! Animation speed follows wall-clock time, not how often the driver is
//! ticked: a step is due once more than one interval has passed since the
//! previous step. After a stall the next step happens immediately and the
//! backlog is dropped instead of replayed.

use embassy_time::{Duration, Instant};

/// Step gate firing at most once per interval.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval: Duration,
    last_step: Option<Instant>,
}

impl Cadence {
    /// Create a cadence whose first step is due immediately.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_step: None,
        }
    }

    /// Interval between two steps.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Check if a step is due at `now` and record it.
    ///
    /// Returns `true` at most once per interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(last_step) = self.last_step {
            if now.saturating_duration_since(last_step) <= self.interval {
                return false;
            }
        }
        self.last_step = Some(now);
        true
    }

    /// Time left until the next step is due (zero if it is due already).
    pub fn remaining(&self, now: Instant) -> Duration {
        let Some(last_step) = self.last_step else {
            return Duration::from_ticks(0);
        };
        let elapsed = now.saturating_duration_since(last_step);
        if elapsed > self.interval {
            Duration::from_ticks(0)
        } else {
            // Strictly more than one interval has to pass.
            self.interval - elapsed + Duration::from_ticks(1)
        }
    }
}
