//! Per-group edge and repeat state machine

use tactus_protocol::ButtonMasks;

use super::group::{ButtonGroup, MAX_BINDINGS};
use crate::queue::EventQueue;

/// Decoding state of one button group
///
/// Holds the masks seen on the previous decoded sample and one repeat
/// counter per binding.
#[derive(Debug, Clone)]
pub struct ButtonChannel {
    group: &'static ButtonGroup,
    last: ButtonMasks,
    repeat_ticks: [u8; MAX_BINDINGS],
    repeat_threshold: u8,
}

impl ButtonChannel {
    /// Create a channel with zeroed history
    pub fn new(group: &'static ButtonGroup, repeat_threshold: u8) -> Self {
        Self {
            group,
            last: ButtonMasks::default(),
            repeat_ticks: [0; MAX_BINDINGS],
            repeat_threshold: repeat_threshold.max(1),
        }
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.last = ButtonMasks::default();
        self.repeat_ticks = [0; MAX_BINDINGS];
    }

    /// The group this channel decodes
    pub fn group(&self) -> &'static ButtonGroup {
        self.group
    }

    /// Masks from the previous decoded sample
    pub fn last(&self) -> ButtonMasks {
        self.last
    }

    /// Repeat counter of the binding at `index`
    pub fn repeat_ticks(&self, index: usize) -> u8 {
        self.repeat_ticks.get(index).copied().unwrap_or(0)
    }

    /// Decode one sample's masks for this group
    ///
    /// Emits, in binding order, the press-edge and long-press-edge keys,
    /// then any auto-repeat keys. A bit whose pressed and long-press
    /// masks both rise on the same sample emits its key twice.
    pub fn update(&mut self, masks: ButtonMasks, queue: &mut EventQueue) {
        let triggers = self.group.triggers;

        for binding in self.group.bindings {
            if triggers.press && masks.is_pressed(binding.bit) && !self.last.is_pressed(binding.bit)
            {
                queue.push(binding.key);
            }
            if triggers.long_press
                && masks.is_long_pressed(binding.bit)
                && !self.last.is_long_pressed(binding.bit)
            {
                queue.push(binding.key);
            }
        }

        for (binding, ticks) in self.group.bindings.iter().zip(self.repeat_ticks.iter_mut()) {
            let Some(fast) = binding.fast else {
                continue;
            };

            if masks.is_long_pressed(binding.bit) {
                *ticks = ticks.saturating_add(1);
                if *ticks >= self.repeat_threshold {
                    queue.push(fast);
                    *ticks = 0;
                }
            } else {
                *ticks = 0;
            }
        }

        self.last = masks;
    }
}
