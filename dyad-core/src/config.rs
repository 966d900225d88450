//! Display configuration types
//!
//! The line table is fixed at startup and read-only afterwards. Pin numbers
//! come from the board config file; everything else about a line (initial
//! and idle level) follows from its position in the table.

use dyad_hal::{LineSpec, LINE_COUNT, SEGMENTS_PER_DIGIT, SWITCH_OFFSET};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::render::DigitPosition;

/// Default UART baud rate for the control channel
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Human-readable line names, indexed like the line table
pub const LINE_LABELS: [&str; LINE_COUNT] = [
    "tens.a", "tens.b", "tens.c", "tens.d", "tens.e", "tens.f", "tens.g", "tens.dp",
    "units.a", "units.b", "units.c", "units.d", "units.e", "units.f", "units.g", "units.dp",
    "tens.switch", "units.switch",
];

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two table entries name the same pin
    DuplicatePin { first: usize, second: usize, pin: u8 },
}

/// Ordered table of the eighteen display lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineTable {
    lines: [LineSpec; LINE_COUNT],
}

impl LineTable {
    /// Build a table from plain pin numbers
    pub const fn from_pins(
        tens: [u8; SEGMENTS_PER_DIGIT],
        units: [u8; SEGMENTS_PER_DIGIT],
        switches: [u8; 2],
    ) -> Self {
        let mut lines = [LineSpec::segment(0); LINE_COUNT];
        let mut b = 0;
        while b < SEGMENTS_PER_DIGIT {
            lines[b] = LineSpec::segment(tens[b]);
            lines[SEGMENTS_PER_DIGIT + b] = LineSpec::segment(units[b]);
            b += 1;
        }
        lines[SWITCH_OFFSET] = LineSpec::switch(switches[0]);
        lines[SWITCH_OFFSET + 1] = LineSpec::switch(switches[1]);
        Self { lines }
    }

    /// Build a table from fully specified lines
    pub const fn from_specs(lines: [LineSpec; LINE_COUNT]) -> Self {
        Self { lines }
    }

    /// All lines, in table order
    pub fn as_slice(&self) -> &[LineSpec] {
        &self.lines
    }

    /// Line at a table index
    pub fn get(&self, index: usize) -> Option<&LineSpec> {
        self.lines.get(index)
    }

    /// Segment lines for one digit position
    pub fn segments(&self, position: DigitPosition) -> &[LineSpec] {
        let offset = position.offset();
        &self.lines[offset..offset + SEGMENTS_PER_DIGIT]
    }

    /// Switch line for one digit position
    pub fn switch(&self, position: DigitPosition) -> &LineSpec {
        match position {
            DigitPosition::Tens => &self.lines[SWITCH_OFFSET],
            DigitPosition::Units => &self.lines[SWITCH_OFFSET + 1],
        }
    }

    /// Replace a single line (used by the config parser)
    pub fn set(&mut self, index: usize, spec: LineSpec) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = spec;
        }
    }

    /// Check that every line names a distinct pin
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (first, a) in self.lines.iter().enumerate() {
            for (offset, b) in self.lines[first + 1..].iter().enumerate() {
                if a.pin == b.pin {
                    return Err(ConfigError::DuplicatePin {
                        first,
                        second: first + 1 + offset,
                        pin: a.pin,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for LineTable {
    fn default() -> Self {
        BOARD_DEFAULT_LINES
    }
}

/// Default wiring: GPIO0/1 stay free for the control UART
pub const BOARD_DEFAULT_LINES: LineTable = LineTable::from_pins(
    [2, 3, 4, 5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14, 15, 16, 17],
    [18, 19],
);

/// Control channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// UART TX pin
    pub uart_tx_pin: u8,
    /// UART RX pin
    pub uart_rx_pin: u8,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            uart_tx_pin: 0,
            uart_rx_pin: 1,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    pub lines: LineTable,
    pub control: ControlConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            lines: LineTable::default(),
            control: ControlConfig::default(),
        }
    }
}

impl DisplayConfig {
    /// Create the board default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the whole configuration for conflicts
    ///
    /// The control UART pins must not overlap the display lines.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lines.validate()?;
        for (index, line) in self.lines.as_slice().iter().enumerate() {
            if line.pin == self.control.uart_tx_pin || line.pin == self.control.uart_rx_pin {
                return Err(ConfigError::DuplicatePin {
                    first: index,
                    second: LINE_COUNT,
                    pin: line.pin,
                });
            }
        }
        Ok(())
    }
}
