//! Dyad Control Protocol
//!
//! Clients set the displayed number over a UART. Two request forms share
//! the same byte stream:
//!
//! - **Control frames** (binary, checksummed):
//!   ```text
//!   ┌───────┬────────┬──────┬─────────────┬──────────┐
//!   │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//!   │ 1B    │ 1B     │ 1B   │ 0–16B       │ 1B       │
//!   └───────┴────────┴──────┴─────────────┴──────────┘
//!   ```
//! - **Text writes**: up to three printable characters terminated by a
//!   newline or carriage return, e.g. `42\n`.
//!
//! [`RequestRouter`] separates the two and yields one [`Request`] at a time.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod router;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{ControlCommand, NakReason, Reply};
pub use router::{Request, RequestRouter, TextReply};
