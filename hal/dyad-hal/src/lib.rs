//! Dyad Hardware Abstraction Layer
//!
//! This crate defines the traits that sit between the board-agnostic display
//! logic and a chip-specific HAL. The display core only ever talks to lines
//! by index; which physical pin backs an index, and how that pin is muxed,
//! stays on the far side of these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dyad-core (encoder, digit renderer)    │
//! └─────────────────────────────────────────┘
//!                     │  LineDriver
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dyad-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │  LineProvider
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dyad-hal-rp2040 (pin bank, Flex)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - a single digital output
//! - [`lines::LineDriver`] - an acquired, ordered set of output lines
//! - [`lines::LineProvider`] - all-or-nothing acquisition and release

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod lines;

// Re-export key items at crate root for convenience
pub use gpio::{Level, OutputPin};
pub use lines::{
    AcquireError, AcquireErrorKind, LineDriver, LineProvider, LineSpec, DIGIT_COUNT, LINE_COUNT,
    SEGMENTS_PER_DIGIT, SWITCH_OFFSET,
};
