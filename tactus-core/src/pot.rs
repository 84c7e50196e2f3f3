//! Potentiometer step decoding
//!
//! The controller reports each knob as an absolute position on a circular
//! 0..=1023 scale. Motion between samples is taken along the shorter way
//! round the circle and accumulated; every full step of accumulated motion
//! becomes one [`KeyCode::PotUp`] or [`KeyCode::PotDown`]. Sub-step motion
//! stays in the accumulator, so slow turning is never lost to rounding.

use tactus_protocol::{KeyCode, RawSample, POT_RANGE};

use crate::queue::EventQueue;

const HALF_RANGE: i32 = (POT_RANGE / 2) as i32;

/// Signed motion from `previous` to `current` along the shorter arc
///
/// Raw differences beyond half the range are folded back by one full turn.
pub fn wrap_delta(current: u16, previous: u16) -> i32 {
    let delta = current as i32 - previous as i32;
    if delta > HALF_RANGE {
        delta - POT_RANGE as i32
    } else if delta < -HALF_RANGE {
        delta + POT_RANGE as i32
    } else {
        delta
    }
}

/// Step decoder for one potentiometer
#[derive(Debug, Clone)]
pub struct PotDecoder {
    channel: usize,
    step: i32,
    /// Position on the previous sample; `None` until the first sample
    last_position: Option<u16>,
    /// Motion not yet turned into steps, always within (-step, step)
    accumulator: i32,
}

impl PotDecoder {
    /// Create a decoder for `channel` emitting one key per `step` units
    pub fn new(channel: usize, step: u16) -> Self {
        Self {
            channel,
            step: step.max(1) as i32,
            last_position: None,
            accumulator: 0,
        }
    }

    /// Forget the last position and any partial step
    pub fn reset(&mut self) {
        self.last_position = None;
        self.accumulator = 0;
    }

    /// Decode this decoder's channel from a sample
    pub fn update(&mut self, sample: &RawSample, queue: &mut EventQueue) {
        if let Some(position) = sample.pot_position(self.channel) {
            self.feed(position, queue);
        }
    }

    /// Decode one absolute position
    ///
    /// The first position only establishes the reference point.
    pub fn feed(&mut self, position: u16, queue: &mut EventQueue) {
        let Some(last) = self.last_position.replace(position) else {
            return;
        };

        self.accumulator += wrap_delta(position, last);

        while self.accumulator >= self.step {
            queue.push(KeyCode::PotUp);
            self.accumulator -= self.step;
        }
        while self.accumulator <= -self.step {
            queue.push(KeyCode::PotDown);
            self.accumulator += self.step;
        }
    }

    /// Channel being decoded
    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Partial step carried to the next sample
    pub fn accumulator(&self) -> i32 {
        self.accumulator
    }

    /// Position seen on the previous sample
    pub fn last_position(&self) -> Option<u16> {
        self.last_position
    }
}
