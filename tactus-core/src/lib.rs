//! Board-agnostic input decoding for the remote controller
//!
//! This crate turns the raw snapshots polled from the remote controller
//! into an ordered stream of [`KeyCode`]s for a text host:
//!
//! - Bounded event queue with drop-oldest overflow
//! - Per-group edge, long-press and auto-repeat detection
//! - Potentiometer step decoding with wraparound correction
//! - Rate-limited polling of the bus
//! - Collaborator traits (bus link, device lifecycle, clock)
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod debounce;
pub mod decoder;
pub mod gate;
pub mod pot;
pub mod queue;
pub mod traits;

pub use controller::InputController;
pub use decoder::Decoder;
pub use gate::{PollGate, PollOutcome};
pub use queue::EventQueue;

pub use tactus_protocol::{ButtonMasks, KeyCode, RawSample};
