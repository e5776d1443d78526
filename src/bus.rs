//! Ready-made [`TransferBus`] implementations.

use embedded_hal::spi::SpiBus;

#[cfg(feature = "esp32-log")]
use embedded_hal::spi::Error as _;
#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::TransferBus;
use crate::signal::TransferSignal;

/// Blocking adapter for any `embedded-hal` SPI bus
///
/// Shifts the whole frame out inside `start_transfer`, so the bus is never
/// reported busy. The bus must be configured for
/// [`SPI_FREQUENCY_HZ`](crate::encoder::SPI_FREQUENCY_HZ), mode 0, MSB first,
/// with MOSI idling low.
#[derive(Debug)]
pub struct BlockingSpi<SPI> {
    spi: SPI,
    errors: u32,
}

impl<SPI: SpiBus<u8>> BlockingSpi<SPI> {
    pub const fn new(spi: SPI) -> Self {
        Self { spi, errors: 0 }
    }

    /// Number of failed transfers (wrapping)
    pub const fn errors(&self) -> u32 {
        self.errors
    }

    /// Release the wrapped SPI bus
    pub fn into_inner(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> TransferBus for BlockingSpi<SPI> {
    fn is_busy(&self) -> bool {
        false
    }

    fn start_transfer(&mut self, frame: &[u8]) {
        let result = self.spi.write(frame).and_then(|()| self.spi.flush());
        if let Err(_error) = result {
            self.errors = self.errors.wrapping_add(1);
            #[cfg(feature = "esp32-log")]
            println!("[BlockingSpi] transfer failed: {:?}", _error.kind());
        }
    }
}

/// Interrupt driven adapter
///
/// `start` kicks off a non-blocking (DMA) transfer of the frame; the
/// completion interrupt calls [`TransferSignal::complete`]. The frame is
/// left untouched by the driver until the signal reports idle again, so
/// `start` may hand its address to the DMA engine.
pub struct SignalledBus<'a, F> {
    signal: &'a TransferSignal,
    start: F,
}

impl<'a, F: FnMut(&[u8])> SignalledBus<'a, F> {
    pub const fn new(signal: &'a TransferSignal, start: F) -> Self {
        Self { signal, start }
    }

    /// Completion signal shared with the interrupt handler
    pub const fn signal(&self) -> &'a TransferSignal {
        self.signal
    }
}

impl<F: FnMut(&[u8])> TransferBus for SignalledBus<'_, F> {
    fn is_busy(&self) -> bool {
        self.signal.is_busy()
    }

    fn start_transfer(&mut self, frame: &[u8]) {
        self.signal.begin();
        (self.start)(frame);
    }
}
