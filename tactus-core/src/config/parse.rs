//! Parser for the input configuration file
//!
//! Handles only the TOML subset `input.toml` needs:
//! - `[decoder]` and `[bus]` section headers
//! - `key = integer` pairs (decimal or `0x` hex, `_` separators allowed)
//! - Comments (`# ...`), full-line or trailing
//!
//! Keys left out keep their defaults. Unknown sections and keys are errors
//! so that typos do not silently fall back to defaults.

use super::types::{BusConfig, ConfigError, DecoderConfig, InputConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key is not valid in the current section
    UnknownKey,
    /// Value is not an integer or does not fit the field
    InvalidValue,
    /// Parsed config failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Decoder,
    Bus,
}

/// Parse and validate an input configuration
pub fn parse_config(input: &str) -> Result<InputConfig, ParseError> {
    let mut config = InputConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = match name.trim() {
                "decoder" => Section::Decoder,
                "bus" => Section::Bus,
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine)?;
        let key = key.trim();
        let value = parse_int(value.trim())?;

        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Decoder => apply_decoder_key(&mut config.decoder, key, value)?,
            Section::Bus => apply_bus_key(&mut config.bus, key, value)?,
        }
    }

    config.validate()?;
    Ok(config)
}

fn apply_decoder_key(decoder: &mut DecoderConfig, key: &str, value: u64) -> Result<(), ParseError> {
    match key {
        "poll_interval_us" => decoder.poll_interval_us = narrow(value)?,
        "repeat_threshold" => decoder.repeat_threshold = narrow(value)?,
        "pot_step" => decoder.pot_step = narrow(value)?,
        "pot_channel" => decoder.pot_channel = narrow(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn apply_bus_key(bus: &mut BusConfig, key: &str, value: u64) -> Result<(), ParseError> {
    match key {
        "address" => bus.address = narrow(value)?,
        "frequency" => bus.frequency = narrow(value)?,
        "reset_low_ms" => bus.reset_low_ms = narrow(value)?,
        "reset_settle_ms" => bus.reset_settle_ms = narrow(value)?,
        "read_timeout_ms" => bus.read_timeout_ms = narrow(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parse a non-negative integer literal
fn parse_int(s: &str) -> Result<u64, ParseError> {
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s, 10),
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut value: u64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        value = value
            .checked_mul(radix as u64)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or(ParseError::InvalidValue)?;
    }
    Ok(value)
}

fn narrow<T: TryFrom<u64>>(value: u64) -> Result<T, ParseError> {
    T::try_from(value).map_err(|_| ParseError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
# Remote controller input settings

[decoder]
poll_interval_us = 2_500
repeat_threshold = 6   # slower repeat
pot_step = 32
pot_channel = 1

[bus]
address = 0x42
frequency = 400_000
reset_low_ms = 10
reset_settle_ms = 50
read_timeout_ms = 250
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.decoder.poll_interval_us, 2500);
        assert_eq!(config.decoder.repeat_threshold, 6);
        assert_eq!(config.decoder.pot_step, 32);
        assert_eq!(config.decoder.pot_channel, 1);
        assert_eq!(config.bus.address, 0x42);
        assert_eq!(config.bus.frequency, 400_000);
        assert_eq!(config.bus.read_timeout_ms, 250);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[decoder]\npot_step = 10\n").unwrap();
        assert_eq!(config.decoder.pot_step, 10);
        assert_eq!(config.decoder.repeat_threshold, 4);
        assert_eq!(config.bus, BusConfig::default());

        assert_eq!(parse_config("").unwrap(), InputConfig::default());
    }

    #[test]
    fn test_unknown_section_and_key() {
        assert_eq!(
            parse_config("[display]\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("[decoder\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_config("[decoder]\nrepeat = 4\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(parse_config("pot_step = 4\n"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[decoder]\npot_step = fast\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[decoder]\nrepeat_threshold = 300\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[decoder]\npot_step = -5\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[bus]\naddress\n"),
            Err(ParseError::InvalidLine)
        );
    }

    #[test]
    fn test_validation_applied() {
        assert_eq!(
            parse_config("[decoder]\npot_channel = 7\n"),
            Err(ParseError::Invalid(ConfigError::PotChannelOutOfRange))
        );
        assert_eq!(
            parse_config("[bus]\naddress = 0xFF\n"),
            Err(ParseError::Invalid(ConfigError::InvalidAddress))
        );
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("1_000"), Ok(1000));
        assert_eq!(parse_int("0x7f"), Ok(0x7F));
        assert_eq!(parse_int("0x"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int("_1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int("99999999999999999999999"), Err(ParseError::InvalidValue));
    }
}
