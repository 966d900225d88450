//! Build script for dyad-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use dyad_core::config::{ConfigError, DisplayConfig, LINE_LABELS};
use dyad_core::render::DigitPosition;
use dyad_hal::{LineSpec, SEGMENTS_PER_DIGIT, SWITCH_OFFSET};

/// GPIO pins on RP2040
const GPIO_COUNT: u32 = 30;

const DIGITS: [(&str, DigitPosition); 2] =
    [("tens", DigitPosition::Tens), ("units", DigitPosition::Units)];

/// Top-level tables the firmware parser accepts
const SECTIONS: [&str; 2] = ["digit", "control"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds the display wiring from display.toml.       ║\n\
            ║  Please create one in the dyad-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
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
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
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
    check_single_line_arrays(&config_content, &mut errors);

    // Same layering as the firmware: file values over the board default
    let mut display = DisplayConfig::new();
    validate_control(&config, &mut display, &mut errors);
    validate_digits(&config, &mut display, &mut errors);

    report("Invalid display configuration", &errors);

    if let Err(ConfigError::DuplicatePin { first, second, pin }) = display.validate() {
        let label = |index: usize| {
            LINE_LABELS
                .get(index)
                .map_or("control.uart", |label| *label)
                .to_string()
        };
        report(
            "Pin conflict in display configuration",
            &[format!(
                "gpio{} used by {} and {}",
                pin,
                label(first),
                label(second)
            )],
        );
    }

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors, if there are any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Parse "gpioN" or "!gpioN" into (pin, inverted)
fn parse_pin(s: &str) -> Option<(u8, bool)> {
    let s = s.trim();
    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };
    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    (u32::from(pin) < GPIO_COUNT).then_some((pin, inverted))
}

/// Reject top-level tables the firmware parser does not know
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (name, value) in root {
        if value.is_table() && !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("[{}] unknown section (digit.* or control)", name));
        }
    }
}

/// The firmware parser reads arrays from a single line
fn check_single_line_arrays(content: &str, errors: &mut Vec<String>) {
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.starts_with("segments") && line.contains('[') && !line.contains(']') {
            errors.push(format!("line {}: segments must be a single-line array", n + 1));
        }
    }
}

/// Validate the [control] section into `display`
fn validate_control(config: &toml::Value, display: &mut DisplayConfig, errors: &mut Vec<String>) {
    let Some(control) = config.get("control") else {
        return;
    };
    let Some(control) = control.as_table() else {
        errors.push("[control] must be a table".to_string());
        return;
    };

    if let Some(baud) = control.get("baud_rate") {
        match baud.as_integer() {
            Some(b) if (1200..=921_600).contains(&b) => display.control.baud_rate = b as u32,
            _ => errors.push("[control] baud_rate must be 1200-921600".to_string()),
        }
    }

    for key in ["uart_tx_pin", "uart_rx_pin"] {
        let Some(value) = control.get(key) else {
            continue;
        };
        match value.as_integer() {
            Some(pin) if (0..i64::from(GPIO_COUNT)).contains(&pin) => {
                let pin = pin as u8;
                if key == "uart_tx_pin" {
                    display.control.uart_tx_pin = pin;
                } else {
                    display.control.uart_rx_pin = pin;
                }
            }
            _ => errors.push(format!("[control] {} must be 0-29", key)),
        }
    }
}

/// Validate [digit.*] sections into `display`
fn validate_digits(config: &toml::Value, display: &mut DisplayConfig, errors: &mut Vec<String>) {
    let Some(digits) = config.get("digit") else {
        return;
    };
    let Some(digits) = digits.as_table() else {
        errors.push("[digit] must be a table".to_string());
        return;
    };

    for name in digits.keys() {
        if !DIGITS.iter().any(|(digit, _)| *digit == name.as_str()) {
            errors.push(format!("[digit.{}] unknown digit (tens or units)", name));
        }
    }

    for (name, position) in DIGITS {
        let Some(digit) = digits.get(name) else {
            continue;
        };
        let Some(digit) = digit.as_table() else {
            errors.push(format!("[digit.{}] must be a table", name));
            continue;
        };

        match digit.get("segments") {
            Some(toml::Value::Array(segments)) => {
                if segments.len() != SEGMENTS_PER_DIGIT {
                    errors.push(format!(
                        "[digit.{}] segments needs {} pins, found {}",
                        name,
                        SEGMENTS_PER_DIGIT,
                        segments.len()
                    ));
                }
                for (i, segment) in segments.iter().enumerate().take(SEGMENTS_PER_DIGIT) {
                    match segment.as_str().and_then(parse_pin) {
                        Some((pin, inverted)) => display.lines.set(
                            position.offset() + i,
                            with_inversion(LineSpec::segment(pin), inverted),
                        ),
                        None => errors.push(format!(
                            "[digit.{}] segments[{}] has invalid pin {}",
                            name, i, segment
                        )),
                    }
                }
            }
            Some(_) => errors.push(format!("[digit.{}] segments must be an array", name)),
            None => {}
        }

        match digit.get("switch") {
            Some(value) => match value.as_str().and_then(parse_pin) {
                Some((pin, inverted)) => {
                    let index = match position {
                        DigitPosition::Tens => SWITCH_OFFSET,
                        DigitPosition::Units => SWITCH_OFFSET + 1,
                    };
                    display
                        .lines
                        .set(index, with_inversion(LineSpec::switch(pin), inverted));
                }
                None => errors.push(format!("[digit.{}] switch has invalid pin {}", name, value)),
            },
            None => {}
        }
    }
}

fn with_inversion(spec: LineSpec, inverted: bool) -> LineSpec {
    if inverted {
        spec.inverted()
    } else {
        spec
    }
}
