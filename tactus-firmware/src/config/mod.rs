//! Firmware configuration
//!
//! The input configuration is compiled in from `input.toml` (validated by
//! build.rs) and parsed at startup.

use defmt::*;

use tactus_core::config::{parse_config, InputConfig};

/// Embedded configuration; edit input.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../input.toml");

/// Parse the embedded configuration
///
/// build.rs rejects most bad files, but anything the firmware parser still
/// refuses falls back to the built-in defaults.
pub fn load_config() -> InputConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded input configuration");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            warn!("Using default input configuration");
            InputConfig::default()
        }
    }
}
