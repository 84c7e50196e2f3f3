//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tactus-core, written against `embedded-hal` 1.0 so they run on any
//! HAL that implements it:
//!
//! - Remote controller bus link (I2C snapshot reads)
//! - Remote controller reset line sequencing

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod remote;

pub use remote::{RemoteController, ResetLine};
