//! Pixel ownership and overlays
//!
//! The pixel store is either driven by the direct setters ([`Mode::Static`])
//! or owned by a running rainbow ([`Mode::Rainbow`]). A splash is drawn in
//! front of either mode without touching the store.

mod rainbow;
mod splash;

pub use rainbow::{RAINBOW_INTERVAL, RAINBOW_STEPS_PER_SECOND, RainbowConfig, RainbowEffect};
pub use splash::Splash;

/// Who owns the pixel store
#[derive(Debug, Clone, Default)]
pub enum Mode {
    /// Pixels are set by the direct setters
    #[default]
    Static,
    /// Pixels are painted by the rainbow animation
    Rainbow(RainbowEffect),
}

impl Mode {
    /// Check if the rainbow animation owns the pixels
    pub const fn is_rainbow(&self) -> bool {
        matches!(self, Self::Rainbow(_))
    }
}
