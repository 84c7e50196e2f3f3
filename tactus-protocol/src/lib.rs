//! Remote Controller Wire Protocol
//!
//! This crate defines what travels between the remote input controller
//! (an STM32 scanning buttons and potentiometers) and the host MCU that
//! polls it over I2C.
//!
//! # Protocol Overview
//!
//! The host issues a plain I2C read of [`SAMPLE_LEN`] bytes from
//! [`CONTROLLER_ADDR`]. The controller answers with its latest snapshot:
//! ```text
//! ┌──────────┬───────────┬────────┬────────┬────────┬────────┬───────┬─────────┐
//! │ POT ADC  │ POT POS   │ POT ST │ D BTNS │ F BTNS │ MCL    │ ACCEL │ SYSTICK │
//! │ 8 × u16  │ 4 × u16   │ 4 × u8 │ 2 × u16│ 2 × u8 │ 2 × u16│ 3×i16 │ u32     │
//! └──────────┴───────────┴────────┴────────┴────────┴────────┴───────┴─────────┘
//! ```
//!
//! All multi-byte fields are little-endian. Button groups carry two masks:
//! the currently pressed set and the set held past the controller's
//! long-press duration.
//!
//! Decoded keys are exchanged with the text host as single bytes, see
//! [`KeyCode::to_byte`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod keycode;
pub mod sample;

pub use keycode::KeyCode;
pub use sample::{
    ButtonMasks, RawSample, SampleError, CONTROLLER_ADDR, POT_CHANNELS, POT_POSITION_MASK,
    POT_RANGE, SAMPLE_LEN,
};

/// MCL button bit positions (directional pad, face and shoulder buttons)
pub mod mcl {
    pub const LEFT: u8 = 0;
    pub const DOWN: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const UP: u8 = 3;
    pub const A: u8 = 4;
    pub const B: u8 = 5;
    pub const X: u8 = 6;
    pub const Y: u8 = 7;
    pub const P: u8 = 8;
    pub const R: u8 = 9;
    pub const S1: u8 = 10;
    pub const S2: u8 = 11;
}

/// Function button bit positions
///
/// The potentiometer knobs double as push buttons.
pub mod function {
    pub const F1: u8 = 0;
    pub const F2: u8 = 1;
    pub const POT1: u8 = 2;
    pub const POT2: u8 = 3;
    pub const POT3: u8 = 4;
    pub const POT4: u8 = 5;
}
