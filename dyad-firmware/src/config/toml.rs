//! Simple TOML parser for display configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! display.toml. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] and [section.subsection] headers
//! - Single-line arrays of strings: segments = ["gpio2", "!gpio3"]
//! - Comments (# ...)
//!
//! Sections or keys that are absent keep the board default.

use dyad_core::config::{ConfigError, DisplayConfig};
use dyad_core::render::DigitPosition;
use dyad_hal::{LineSpec, SEGMENTS_PER_DIGIT, SWITCH_OFFSET};
use dyad_hal_rp2040::parse_pin_string;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Segment list does not hold exactly eight pins
    SegmentCount,
    /// Parsed configuration is inconsistent
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Config(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Digit(DigitPosition),
    Control,
}

/// Parse TOML configuration into a validated DisplayConfig
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `# comment`, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse section header like "digit.tens" or "control"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let mut parts = header.trim().split('.');
    let section = match (parts.next(), parts.next()) {
        (Some("control"), None) => Section::Control,
        (Some("digit"), Some("tens")) => Section::Digit(DigitPosition::Tens),
        (Some("digit"), Some("units")) => Section::Digit(DigitPosition::Units),
        _ => return Err(ParseError::InvalidSection),
    };
    if parts.next().is_some() {
        return Err(ParseError::InvalidSection);
    }
    Ok(section)
}

/// Split `key = value`
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Strip quotes from a string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a quoted pin string ("gpio11", "!gpio12")
fn parse_pin(value: &str) -> Result<(u8, bool), ParseError> {
    parse_pin_string(parse_string(value)?).ok_or(ParseError::InvalidPin)
}

/// Parse a segment array into eight (pin, inverted) pairs
fn parse_segments(value: &str) -> Result<[(u8, bool); SEGMENTS_PER_DIGIT], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut pins = [(0u8, false); SEGMENTS_PER_DIGIT];
    let mut count = 0;
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let slot = pins.get_mut(count).ok_or(ParseError::SegmentCount)?;
        *slot = parse_pin(item)?;
        count += 1;
    }

    if count != SEGMENTS_PER_DIGIT {
        return Err(ParseError::SegmentCount);
    }
    Ok(pins)
}

fn line_spec(base: LineSpec, inverted: bool) -> LineSpec {
    if inverted {
        base.inverted()
    } else {
        base
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Digit(position), "segments") => {
            let offset = position.offset();
            for (b, (pin, inverted)) in parse_segments(value)?.into_iter().enumerate() {
                config
                    .lines
                    .set(offset + b, line_spec(LineSpec::segment(pin), inverted));
            }
        }
        (Section::Digit(position), "switch") => {
            let (pin, inverted) = parse_pin(value)?;
            let index = match position {
                DigitPosition::Tens => SWITCH_OFFSET,
                DigitPosition::Units => SWITCH_OFFSET + 1,
            };
            config.lines.set(index, line_spec(LineSpec::switch(pin), inverted));
        }
        (Section::Control, "baud_rate") => config.control.baud_rate = parse_int(value)?,
        (Section::Control, "uart_tx_pin") => config.control.uart_tx_pin = parse_int(value)?,
        (Section::Control, "uart_rx_pin") => config.control.uart_rx_pin = parse_int(value)?,
        (Section::Root, "version") => config.version = parse_int(value)?,
        // Unknown keys are ignored for forward compatibility
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyad_core::config::BOARD_DEFAULT_LINES;
    use dyad_hal::Level;

    const FULL: &str = r#"
# wiring
[digit.tens]
segments = ["gpio20", "gpio21", "gpio22", "gpio23", "gpio24", "gpio25", "gpio26", "gpio27"]
switch = "!gpio28"

[digit.units]
segments = ["gpio2", "gpio3", "gpio4", "gpio5", "gpio6", "gpio7", "gpio8", "!gpio9"]
switch = "gpio29"  # units enable

[control]
baud_rate = 9600
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(FULL).unwrap();

        let tens = config.lines.segments(DigitPosition::Tens);
        assert_eq!(tens[0].pin, 20);
        assert_eq!(tens[7].pin, 27);
        assert_eq!(tens[0].initial, Level::Low);

        let units = config.lines.segments(DigitPosition::Units);
        assert_eq!(units[0].pin, 2);
        assert!(!units[0].inverted);
        assert!(units[7].inverted);

        let tens_switch = config.lines.switch(DigitPosition::Tens);
        assert_eq!(tens_switch.pin, 28);
        assert!(tens_switch.inverted);
        assert_eq!(tens_switch.initial, Level::High);
        assert_eq!(config.lines.switch(DigitPosition::Units).pin, 29);

        assert_eq!(config.control.baud_rate, 9600);
    }

    #[test]
    fn test_empty_config_uses_board_default() {
        let config = parse_config("# nothing here\n").unwrap();
        assert_eq!(config.lines, BOARD_DEFAULT_LINES);
        assert_eq!(config, DisplayConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config("[control]\nbaud_rate = 57600\n").unwrap();
        assert_eq!(config.lines, BOARD_DEFAULT_LINES);
        assert_eq!(config.control.baud_rate, 57600);
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(
            parse_section_header("digit.tens"),
            Ok(Section::Digit(DigitPosition::Tens))
        );
        assert_eq!(parse_section_header(" control "), Ok(Section::Control));
        assert_eq!(
            parse_section_header("digit.hundreds"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("digit.tens.extra"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_wrong_segment_count() {
        let input = "[digit.tens]\nsegments = [\"gpio2\", \"gpio3\"]\n";
        assert_eq!(parse_config(input), Err(ParseError::SegmentCount));

        let nine = "[digit.tens]\nsegments = [\"gpio20\", \"gpio21\", \"gpio22\", \"gpio23\", \"gpio24\", \"gpio25\", \"gpio26\", \"gpio27\", \"gpio28\"]\n";
        assert_eq!(parse_config(nine), Err(ParseError::SegmentCount));
    }

    #[test]
    fn test_invalid_pin() {
        let input = "[digit.units]\nswitch = \"gpio31\"\n";
        assert_eq!(parse_config(input), Err(ParseError::InvalidPin));

        let unquoted = "[digit.units]\nswitch = gpio19\n";
        assert_eq!(parse_config(unquoted), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        // Tens switch moved onto a units segment pin
        let input = "[digit.tens]\nswitch = \"gpio10\"\n";
        assert_eq!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::DuplicatePin {
                first: 8,
                second: SWITCH_OFFSET,
                pin: 10
            }))
        );
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[display]\nbrightness = 3\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_uart_overlap_rejected() {
        let input = "[digit.units]\nswitch = \"gpio1\"\n";
        assert!(matches!(
            parse_config(input),
            Err(ParseError::Config(ConfigError::DuplicatePin { pin: 1, .. }))
        ));
    }

    #[test]
    fn test_strip_comment_keeps_quoted_hash() {
        assert_eq!(strip_comment("a = \"x#y\" # c"), "a = \"x#y\" ");
    }
}
