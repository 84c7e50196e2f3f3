//! Decoder and bus configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tactus_protocol::{CONTROLLER_ADDR, POT_CHANNELS};

/// Minimum time between successful bus reads
pub const DEFAULT_POLL_INTERVAL_US: u32 = 2500;

/// Long-press samples per auto-repeat key
pub const DEFAULT_REPEAT_THRESHOLD: u8 = 4;

/// Position units per potentiometer step
pub const DEFAULT_POT_STEP: u16 = 25;

/// Controller bus clock (fast mode)
pub const DEFAULT_BUS_FREQUENCY: u32 = 400_000;

/// Upper bound on one snapshot read
pub const DEFAULT_READ_TIMEOUT_MS: u32 = 500;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Poll interval must be non-zero
    ZeroPollInterval,
    /// Repeat threshold must be non-zero
    ZeroRepeatThreshold,
    /// Potentiometer step must be non-zero
    ZeroPotStep,
    /// Potentiometer channel does not exist
    PotChannelOutOfRange,
    /// Not a 7-bit I2C address
    InvalidAddress,
    /// Bus frequency must be non-zero
    ZeroFrequency,
    /// Read timeout must be non-zero
    ZeroReadTimeout,
}

/// Decoder timing and thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Minimum microseconds between successful reads
    pub poll_interval_us: u32,
    /// Long-press samples before each fast-repeat key
    pub repeat_threshold: u8,
    /// Accumulated position delta per pot step
    pub pot_step: u16,
    /// Potentiometer decoded into steps (0-3)
    pub pot_channel: u8,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            poll_interval_us: DEFAULT_POLL_INTERVAL_US,
            repeat_threshold: DEFAULT_REPEAT_THRESHOLD,
            pot_step: DEFAULT_POT_STEP,
            pot_channel: 0,
        }
    }
}

impl DecoderConfig {
    /// Check values the decoder cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_us == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.repeat_threshold == 0 {
            return Err(ConfigError::ZeroRepeatThreshold);
        }
        if self.pot_step == 0 {
            return Err(ConfigError::ZeroPotStep);
        }
        if self.pot_channel as usize >= POT_CHANNELS {
            return Err(ConfigError::PotChannelOutOfRange);
        }
        Ok(())
    }
}

/// Controller bus and reset timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// 7-bit I2C address of the controller
    pub address: u8,
    /// Bus clock in Hz
    pub frequency: u32,
    /// Time the reset line is held low
    pub reset_low_ms: u32,
    /// Time allowed for the controller to boot after reset
    pub reset_settle_ms: u32,
    /// Longest a snapshot read may take before it counts as a timeout
    pub read_timeout_ms: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            address: CONTROLLER_ADDR,
            frequency: DEFAULT_BUS_FREQUENCY,
            reset_low_ms: 10,
            reset_settle_ms: 50,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl BusConfig {
    /// Check values the bus cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        if self.frequency == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroReadTimeout);
        }
        Ok(())
    }
}

/// Complete input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    pub decoder: DecoderConfig,
    pub bus: BusConfig,
}

impl InputConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.decoder.validate()?;
        self.bus.validate()
    }
}
