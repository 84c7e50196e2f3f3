//! Decoder clock backed by the embassy time driver

use embassy_time::Instant;

use tactus_core::traits::Clock;

/// Microsecond uptime from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
