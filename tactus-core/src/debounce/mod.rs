//! Button group decoding
//!
//! Each logical button group watches one of the sample's mask pairs and
//! turns transitions into keys:
//!
//! - Press edge: bit goes 0→1 in the pressed mask
//! - Long-press edge: bit goes 0→1 in the long-press mask
//! - Auto-repeat: a fast key every N samples while long-pressed
//!
//! Groups keep independent history even when they read the same physical
//! buttons (the pager reuses the directional up/down bits).

pub mod channel;
pub mod group;

pub use channel::ButtonChannel;
pub use group::{
    ButtonGroup, KeyBinding, MaskSource, Triggers, DIRECTION_GROUP, FUNCTION_GROUP,
    MAX_BINDINGS, PAGER_GROUP,
};
