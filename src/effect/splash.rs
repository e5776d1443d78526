//! Timed splash overlay
//!
//! A splash paints the first `count` LEDs in one color and blanks the rest
//! for a fixed duration, in front of whatever the pixel store holds.

use embassy_time::{Duration, Instant};

use crate::color::Rgb;

/// One active splash overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splash {
    color: Rgb,
    count: u16,
    start: Instant,
    duration: Duration,
}

impl Splash {
    pub const fn new(color: Rgb, count: u16, start: Instant, duration: Duration) -> Self {
        Self {
            color,
            count,
            start,
            duration,
        }
    }

    /// Splash color
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Number of LEDs from the start of the strip the splash covers
    pub const fn count(&self) -> u16 {
        self.count
    }

    /// Check if the splash has run out at `now`
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Color shown by the LED at logical `index` while the splash is active
    pub fn color_at(&self, index: u16) -> Rgb {
        if index < self.count {
            self.color
        } else {
            Rgb::default()
        }
    }
}
