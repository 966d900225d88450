//! Output line sets
//!
//! A display is wired to a fixed, ordered table of output lines. The chip
//! HAL acquires every line of the table at once ([`LineProvider`]) and hands
//! back a [`LineDriver`] that the display logic addresses purely by index.
//!
//! Line layout for the two-digit display:
//!
//! ```text
//! index  0..=7   tens digit segments  (bit 0 → index 0)
//! index  8..=15  units digit segments (bit 0 → index 8)
//! index 16       tens digit switch
//! index 17       units digit switch
//! ```

use crate::gpio::Level;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Segment lines per digit (seven segments plus decimal point)
pub const SEGMENTS_PER_DIGIT: usize = 8;

/// Number of digit positions
pub const DIGIT_COUNT: usize = 2;

/// Index of the first digit switch line
pub const SWITCH_OFFSET: usize = SEGMENTS_PER_DIGIT * DIGIT_COUNT;

/// Total lines in a display line table
pub const LINE_COUNT: usize = SWITCH_OFFSET + DIGIT_COUNT;

/// Descriptor for one physical output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSpec {
    /// Chip GPIO number
    pub pin: u8,
    /// Logical level driven as soon as the line is acquired
    pub initial: Level,
    /// Logical level driven just before the line is released
    pub idle: Level,
    /// Line is wired active-low; logical HIGH drives the pin low
    pub inverted: bool,
}

impl LineSpec {
    /// A segment line: starts LOW, released HIGH (segment dark on
    /// common-anode wiring)
    pub const fn segment(pin: u8) -> Self {
        Self {
            pin,
            initial: Level::Low,
            idle: Level::High,
            inverted: false,
        }
    }

    /// A digit switch line: starts HIGH (digit enabled), released LOW
    pub const fn switch(pin: u8) -> Self {
        Self {
            pin,
            initial: Level::High,
            idle: Level::Low,
            inverted: false,
        }
    }

    /// Same line, wired active-low
    pub const fn inverted(self) -> Self {
        Self {
            inverted: true,
            ..self
        }
    }

    /// Physical pin level for a logical level on this line
    pub const fn pin_level(&self, level: Level) -> Level {
        match (level, self.inverted) {
            (Level::High, false) | (Level::Low, true) => Level::High,
            _ => Level::Low,
        }
    }
}

/// Why a line could not be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquireErrorKind {
    /// Pin number does not exist on this chip
    InvalidPin,
    /// Pin is already owned (by another user or earlier in the same table)
    Unavailable,
    /// Table holds more lines than the provider can drive
    TooManyLines,
}

/// Acquisition failure for a line table
///
/// Acquisition is all-or-nothing: when this is returned, every line taken
/// before `index` has already been handed back to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcquireError {
    /// Table index of the first line that failed
    pub index: usize,
    /// Chip GPIO number of that line
    pub pin: u8,
    pub kind: AcquireErrorKind,
}

/// An acquired, ordered set of output lines
///
/// Writes are infallible once the set exists. Indexes at or beyond
/// [`line_count`](LineDriver::line_count) are ignored.
pub trait LineDriver {
    /// Drive the line at `index` to a logical level
    fn set_line(&mut self, index: usize, level: Level);

    /// Logical level last driven on the line, if the index exists
    fn line_level(&self, index: usize) -> Option<Level>;

    /// Number of lines in the set
    fn line_count(&self) -> usize;
}

/// Source of line sets (the chip's pin pool)
pub trait LineProvider {
    /// Line set handed out by a successful acquisition
    type Lines: LineDriver;

    /// Acquire every line of `specs`, in order, driving each to its initial
    /// level
    ///
    /// # Errors
    ///
    /// Returns the first line that could not be acquired. No line stays
    /// acquired on failure.
    fn acquire(&mut self, specs: &[LineSpec]) -> Result<Self::Lines, AcquireError>;

    /// Drive every line to its idle level and give the pins back
    fn release(&mut self, lines: Self::Lines);
}
