//! Remote controller reset line
//!
//! The controller's reset input is active-low. A reset pulse drives the
//! line low, holds it, releases it high and then waits for the controller
//! firmware to boot before the bus is used.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Reset pin and its pulse timing
pub struct ResetLine<P> {
    pin: P,
    low_ms: u32,
    settle_ms: u32,
}

impl<P: OutputPin> ResetLine<P> {
    /// Create a reset line with the given pulse timing
    pub fn new(pin: P, low_ms: u32, settle_ms: u32) -> Self {
        Self {
            pin,
            low_ms,
            settle_ms,
        }
    }

    /// Hold the controller in reset, release it and wait for it to boot
    ///
    /// Pin errors are logged and the sequence continues; a controller that
    /// missed its reset still answers reads, and failed reads are retried.
    pub fn pulse<D: DelayNs>(&mut self, delay: &mut D) {
        if self.pin.set_low().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to drive controller reset low");
        }
        delay.delay_ms(self.low_ms);

        if self.pin.set_high().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to release controller reset");
        }
        delay.delay_ms(self.settle_ms);
    }

    /// Give back the pin
    pub fn release(self) -> P {
        self.pin
    }
}
