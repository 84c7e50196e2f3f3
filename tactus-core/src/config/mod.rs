//! Configuration types
//!
//! Board-agnostic settings for the decoder and the controller bus, plus a
//! small parser for the firmware's embedded `input.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
