//! Rainbow animation
//!
//! Spreads `cycles` full hue wheels across the strip and rotates them. The
//! rotation is stepped on a fixed 25 ms cadence, so one full turn takes the
//! configured period no matter how often the driver is ticked.

use embassy_time::{Duration, Instant};

use crate::cadence::Cadence;
use crate::color::wrap_hue;
use crate::pixel::{PixelRequest, PixelStore};

/// Interval between two animation steps
pub const RAINBOW_INTERVAL: Duration = Duration::from_millis(25);

/// Animation steps per second at [`RAINBOW_INTERVAL`]
pub const RAINBOW_STEPS_PER_SECOND: f32 = 40.0;

const DEFAULT_PERIOD_MS: u64 = 1000;

/// Rainbow parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowConfig {
    /// Number of full hue wheels visible across the strip at the same time
    pub cycles: u8,
    /// Time for one LED to rotate through all colors
    pub period: Duration,
    /// Brightness (0.0 - 1.0), scaled by the strip max brightness
    pub brightness: f32,
    /// Rotate towards the start of the strip instead of its end
    pub reverse: bool,
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            cycles: 1,
            period: Duration::from_millis(DEFAULT_PERIOD_MS),
            brightness: 1.0,
            reverse: false,
        }
    }
}

impl RainbowConfig {
    /// Set the number of visible hue wheels
    #[must_use]
    pub fn with_cycles(mut self, cycles: u8) -> Self {
        self.cycles = cycles;
        self
    }

    /// Set the rotation period
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Set the brightness
    #[must_use]
    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the rotation direction
    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

/// Running rainbow animation
#[derive(Debug, Clone)]
pub struct RainbowEffect {
    /// Hue distance between two neighbouring LEDs, in degrees
    cycle_step: f32,
    /// Hue advance per animation step, in degrees
    move_step: f32,
    brightness: f32,
    reverse: bool,
    /// Hue of the first LED
    hue: f32,
    cadence: Cadence,
}

impl RainbowEffect {
    /// Create a rainbow for a strip of `led_count` LEDs
    ///
    /// Returns `None` if there is nothing to animate (no cycles or no LEDs).
    #[allow(clippy::cast_precision_loss)]
    pub fn new(config: &RainbowConfig, led_count: u16) -> Option<Self> {
        if config.cycles == 0 || led_count == 0 {
            return None;
        }

        let cycle_step = (360.0 / f32::from(led_count)) * f32::from(config.cycles);
        let seconds = config.period.as_micros() as f32 / 1_000_000.0;
        let move_step = if seconds > 0.0 {
            wrap_hue((360.0 / RAINBOW_STEPS_PER_SECOND) / seconds)
        } else {
            0.0
        };

        Some(Self {
            cycle_step,
            move_step,
            brightness: config.brightness,
            reverse: config.reverse,
            hue: 0.0,
            cadence: Cadence::new(RAINBOW_INTERVAL),
        })
    }

    /// Continue from the hue of a previous rainbow
    #[must_use]
    pub fn with_hue(mut self, hue: f32) -> Self {
        self.hue = wrap_hue(hue);
        self
    }

    /// Hue of the first LED, in degrees
    pub const fn hue(&self) -> f32 {
        self.hue
    }

    /// Hue distance between two neighbouring LEDs, in degrees
    pub const fn cycle_step(&self) -> f32 {
        self.cycle_step
    }

    /// Hue advance per animation step, in degrees
    pub const fn move_step(&self) -> f32 {
        self.move_step
    }

    /// Time until the next animation step is due
    pub fn due_in(&self, now: Instant) -> Duration {
        self.cadence.remaining(now)
    }

    /// Paint the pixel store and advance the hue, if a step is due
    ///
    /// Returns `true` if the pixel store was repainted.
    pub(crate) fn render<const MAX_LEDS: usize>(
        &mut self,
        now: Instant,
        pixels: &mut PixelStore<MAX_LEDS>,
        max_brightness: f32,
    ) -> bool {
        if !self.cadence.poll(now) {
            return false;
        }

        pixels.paint(max_brightness, |index| {
            let offset = f32::from(index) * self.cycle_step;
            let hue = if self.reverse {
                self.hue + offset
            } else {
                self.hue - offset
            };
            PixelRequest::Hsv {
                hue: wrap_hue(hue),
                saturation: 1.0,
                value: self.brightness,
            }
        });

        self.hue = wrap_hue(self.hue + self.move_step);
        true
    }
}
