//! Configuration loading and parsing
//!
//! The display wiring is compiled in from display.toml and parsed by a
//! custom no_std parser at boot.

pub mod toml;

pub use toml::{parse_config, ParseError};
