//! Build script for tactus-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates input.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate input.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=input.toml");

    let config_path = Path::new("input.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: input.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds input.toml from the tactus-firmware         ║\n\
            ║  directory. Restore it or create one with [decoder] and [bus].   ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read input.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in input.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_decoder(&config, &mut errors);
    validate_bus(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid input configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=input.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only [decoder] and [bus] tables are understood by the firmware parser
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match name.as_str() {
            "decoder" | "bus" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", name));
                }
            }
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

/// Look up an optional integer key, reporting non-integers
fn integer(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key) {
        None => None,
        Some(toml::Value::Integer(v)) => Some(*v),
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn check_keys(
    table: &toml::map::Map<String, toml::Value>,
    section: &str,
    known: &[&str],
    errors: &mut Vec<String>,
) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_decoder(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(decoder) = config.get("decoder").and_then(|d| d.as_table()) else {
        return;
    };

    check_keys(
        decoder,
        "decoder",
        &["poll_interval_us", "repeat_threshold", "pot_step", "pot_channel"],
        errors,
    );

    if let Some(v) = integer(decoder, "decoder", "poll_interval_us", errors) {
        if v < 1 || v > u32::MAX as i64 {
            errors.push("[decoder] poll_interval_us must be at least 1".to_string());
        }
    }
    if let Some(v) = integer(decoder, "decoder", "repeat_threshold", errors) {
        if !(1..=255).contains(&v) {
            errors.push("[decoder] repeat_threshold must be 1-255".to_string());
        }
    }
    if let Some(v) = integer(decoder, "decoder", "pot_step", errors) {
        if !(1..=u16::MAX as i64).contains(&v) {
            errors.push("[decoder] pot_step must be 1-65535".to_string());
        }
    }
    if let Some(v) = integer(decoder, "decoder", "pot_channel", errors) {
        if !(0..=3).contains(&v) {
            errors.push("[decoder] pot_channel must be 0-3".to_string());
        }
    }
}

fn validate_bus(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(bus) = config.get("bus").and_then(|b| b.as_table()) else {
        return;
    };

    check_keys(
        bus,
        "bus",
        &[
            "address",
            "frequency",
            "reset_low_ms",
            "reset_settle_ms",
            "read_timeout_ms",
        ],
        errors,
    );

    if let Some(v) = integer(bus, "bus", "address", errors) {
        if !(0..=0x7F).contains(&v) {
            errors.push("[bus] address must be a 7-bit address".to_string());
        }
    }
    if let Some(v) = integer(bus, "bus", "frequency", errors) {
        if !(1..=u32::MAX as i64).contains(&v) {
            errors.push("[bus] frequency must be non-zero".to_string());
        }
    }
    for key in ["reset_low_ms", "reset_settle_ms"] {
        if let Some(v) = integer(bus, "bus", key, errors) {
            if v < 0 || v > u32::MAX as i64 {
                errors.push(format!("[bus] {} must be a non-negative u32", key));
            }
        }
    }
    if let Some(v) = integer(bus, "bus", "read_timeout_ms", errors) {
        if !(1..=u32::MAX as i64).contains(&v) {
            errors.push("[bus] read_timeout_ms must be at least 1".to_string());
        }
    }
}
