//! Board-agnostic logic for the two-digit seven-segment display
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Segment encoder (decimal digit → segment mask)
//! - Digit renderer (number → two masks → sixteen line writes)
//! - Line table configuration types
//! - Parsing of short text display requests

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod render;
pub mod segment;

pub use render::{DigitPosition, DigitRenderer, Frame, MAX_VALUE};
pub use segment::{encode, SegmentMask, BLANK};
