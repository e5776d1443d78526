use derive_more::{Display, Error};

/// Errors reported by the strip driver
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// LED index outside of the configured strip length
    #[display("LED index {index} is out of range (strip has {count} LEDs)")]
    OutOfRange { index: u16, count: u16 },
    /// The pixel store is owned by the rainbow animation
    #[display("pixels are driven by the rainbow animation")]
    ModeConflict,
    /// Requested LED count does not fit the fixed buffers
    #[display("{requested} LEDs do not fit the buffer capacity of {capacity}")]
    Capacity { requested: usize, capacity: usize },
}
