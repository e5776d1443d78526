//! Interrupt safe transfer completion signal.
//!
//! The DMA (or SPI) completion interrupt is the only other context that
//! touches driver state, and all it does is flip this flag. The flag lives in
//! a `critical-section` mutex so it can be placed in a `static` shared
//! between the interrupt handler and the application loop.

use core::cell::Cell;

use critical_section::Mutex;

/// Busy flag of one in-flight bus transfer.
///
/// ```ignore
/// static SIGNAL: TransferSignal = TransferSignal::new();
///
/// #[interrupt]
/// fn DMAC_0() {
///     SIGNAL.complete();
/// }
/// ```
pub struct TransferSignal {
    busy: Mutex<Cell<bool>>,
    completed: Mutex<Cell<u32>>,
}

impl TransferSignal {
    /// Create an idle signal.
    pub const fn new() -> Self {
        Self {
            busy: Mutex::new(Cell::new(false)),
            completed: Mutex::new(Cell::new(0)),
        }
    }

    /// Mark a transfer as started.
    pub fn begin(&self) {
        critical_section::with(|cs| self.busy.borrow(cs).set(true));
    }

    /// Mark the running transfer as finished.
    ///
    /// Safe to call from interrupt context.
    pub fn complete(&self) {
        critical_section::with(|cs| {
            let busy = self.busy.borrow(cs);
            if busy.replace(false) {
                let completed = self.completed.borrow(cs);
                completed.set(completed.get().wrapping_add(1));
            }
        });
    }

    /// Check if a transfer is in flight.
    pub fn is_busy(&self) -> bool {
        critical_section::with(|cs| self.busy.borrow(cs).get())
    }

    /// Number of transfers completed so far (wrapping).
    pub fn completed(&self) -> u32 {
        critical_section::with(|cs| self.completed.borrow(cs).get())
    }
}

impl Default for TransferSignal {
    fn default() -> Self {
        Self::new()
    }
}
