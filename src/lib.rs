#![no_std]

pub mod bus;
pub mod cadence;
pub mod clock;
pub mod color;
pub mod effect;
pub mod encoder;
pub mod error;
pub mod pixel;
pub mod signal;
pub mod strip;

pub use bus::{BlockingSpi, SignalledBus};
pub use clock::{ManualClock, SystemClock};
pub use effect::{Mode, RainbowConfig, Splash};
pub use encoder::frame_len;
pub use error::Error;
pub use pixel::PixelRequest;
pub use signal::TransferSignal;
pub use strip::{StripConfig, TickOutcome, Ws2812Strip};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Serial bus the encoded frame is shifted out on
///
/// Implement this trait to support different hardware platforms.
/// The strip driver is generic over this trait.
///
/// A transfer is started synchronously and may complete asynchronously.
/// After [`start_transfer`](TransferBus::start_transfer) the implementation
/// may keep reading `frame` until [`is_busy`](TransferBus::is_busy) returns
/// `false`; the driver does not write to the frame in that window.
pub trait TransferBus {
    /// Check if a transfer is still in flight
    fn is_busy(&self) -> bool;

    /// Start shifting out `frame`
    fn start_transfer(&mut self, frame: &[u8]);
}

impl<T: TransferBus + ?Sized> TransferBus for &mut T {
    fn is_busy(&self) -> bool {
        T::is_busy(self)
    }

    fn start_transfer(&mut self, frame: &[u8]) {
        T::start_transfer(self, frame);
    }
}

/// Monotonic time source
pub trait Clock {
    /// Current time
    fn now(&self) -> Instant;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Instant {
        T::now(self)
    }
}
