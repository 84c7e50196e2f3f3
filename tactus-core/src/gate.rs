//! Bus poll rate limiting
//!
//! The controller refreshes its snapshot on its own schedule; reading it
//! more often than that only burns bus time. The gate lets a read through
//! once the minimum interval has passed since the last *successful* read.
//! Failed reads do not move the reference point, so a failure is retried
//! on the very next poll request.

use crate::traits::BusError;

/// Poll requests a caller should make per minimum interval
///
/// The interval runs from the completion of the last read, so a caller
/// ticking at exactly the interval misses every other slot.
pub const TICKS_PER_INTERVAL: u64 = 4;

/// What a poll request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Controller not initialized; nothing attempted
    Inactive,
    /// Too soon since the last successful read; bus not touched
    Throttled,
    /// A sample was read and decoded
    Sampled,
    /// The read failed; decoder state untouched
    Failed(BusError),
}

impl PollOutcome {
    /// Check if a new sample was decoded
    pub fn is_sampled(&self) -> bool {
        matches!(self, PollOutcome::Sampled)
    }
}

/// Minimum-interval gate between successful reads
#[derive(Debug, Clone)]
pub struct PollGate {
    min_interval_us: u64,
    /// Completion time of the last successful read
    last_success_us: Option<u64>,
}

impl PollGate {
    /// Create a gate that is immediately due
    pub fn new(min_interval_us: u32) -> Self {
        Self {
            min_interval_us: min_interval_us as u64,
            last_success_us: None,
        }
    }

    /// Check whether a read may be issued at `now_us`
    pub fn is_due(&self, now_us: u64) -> bool {
        match self.last_success_us {
            None => true,
            Some(last) => now_us.saturating_sub(last) >= self.min_interval_us,
        }
    }

    /// Record a read that completed successfully at `at_us`
    pub fn record_success(&mut self, at_us: u64) {
        self.last_success_us = Some(at_us);
    }

    /// Completion time of the last successful read
    pub fn last_success(&self) -> Option<u64> {
        self.last_success_us
    }

    /// Minimum interval between successful reads
    pub fn min_interval_us(&self) -> u64 {
        self.min_interval_us
    }

    /// Period at which a caller should request polls
    ///
    /// A fraction of the minimum interval so a read is issued soon after
    /// the gate opens; the gate throttles the extra requests.
    pub fn tick_interval_us(&self) -> u64 {
        (self.min_interval_us / TICKS_PER_INTERVAL).max(1)
    }

    /// Make the gate immediately due again
    pub fn reset(&mut self) {
        self.last_success_us = None;
    }
}
