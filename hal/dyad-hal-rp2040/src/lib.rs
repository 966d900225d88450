//! RP2040-specific HAL for the display controller
//!
//! This crate provides RP2040 implementations of the `dyad-hal` traits:
//!
//! - Pin bank for taking GPIO pins by number at runtime
//! - [`RpLineProvider`]: all-or-nothing acquisition of a display line table,
//!   with outputs enabled only once their first level is latched
//!
//! Pad muxing is done by embassy-rp when a pin is turned into a `Flex`; the
//! display logic never sees a register.

#![no_std]
#![deny(unsafe_code)]

pub mod lines;
pub mod pins;

pub use lines::{RpLine, RpLineProvider, RpLines};
pub use pins::{parse_pin_string, PinBank, PinError, GPIO_COUNT};

// Re-export shared traits from dyad-hal for convenience
pub use dyad_hal::{LineDriver, LineProvider};
