//! Line driver implementations
//!
//! This crate provides concrete implementations of the `dyad-hal` line
//! traits on top of plain output pins:
//!
//! - [`PinLines`]: an ordered line set over any [`OutputPin`] array, with
//!   per-line active-low inversion
//! - [`PoolProvider`]: all-or-nothing table acquisition from a chip's
//!   [`PinPool`]
//!
//! [`OutputPin`]: dyad_hal::OutputPin

#![no_std]
#![deny(unsafe_code)]

pub mod pin_lines;
pub mod pool;

pub use pin_lines::PinLines;
pub use pool::{PinPool, PoolLines, PoolProvider};
