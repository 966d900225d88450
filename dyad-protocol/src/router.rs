//! Request routing for the shared control stream
//!
//! A START byte seen between requests opens a binary frame; any other byte
//! starts a text write that runs until `\n` or `\r`. An empty line (such as
//! the `\n` of a `\r\n` pair) is ignored.
//!
//! Pending text with no digit in it is line noise: a START byte drops it
//! and opens the frame. Once a digit has arrived, START is part of the text.

use core::fmt::Write;

use dyad_core::input::{parse_request, InputError, MAX_TEXT_LEN};
use heapless::{String, Vec};

use crate::frame::{FrameParser, FRAME_START};
use crate::messages::{ControlCommand, NakReason, Reply};

/// One decoded client request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// A valid control frame
    Command(ControlCommand),
    /// A text write, parsed to a non-negative value
    Text(Result<u32, InputError>),
    /// A frame that could not be used
    BadFrame(NakReason),
}

impl Request {
    /// Value to display, if the request carries one
    pub fn value(&self) -> Option<u32> {
        match self {
            Request::Command(cmd) => Some(cmd.requested_value()),
            Request::Text(Ok(value)) => Some(*value),
            Request::Text(Err(_)) | Request::BadFrame(_) => None,
        }
    }

    /// True if the client used the text form and expects a text reply
    pub fn is_text(&self) -> bool {
        matches!(self, Request::Text(_))
    }
}

/// Splits the control byte stream into [`Request`]s
#[derive(Debug, Clone, Default)]
pub struct RequestRouter {
    frames: FrameParser,
    text: Vec<u8, MAX_TEXT_LEN>,
    overflow: bool,
}

impl RequestRouter {
    pub fn new() -> Self {
        Self::default()
    }

    fn text_pending(&self) -> bool {
        !self.text.is_empty() || self.overflow
    }

    fn text_has_digit(&self) -> bool {
        self.text.iter().any(u8::is_ascii_digit)
    }

    /// Feed one byte; returns a request once one is complete
    pub fn feed(&mut self, byte: u8) -> Option<Request> {
        if !self.frames.is_idle() {
            return self.feed_frame(byte);
        }
        if byte == FRAME_START && !self.text_has_digit() {
            self.text.clear();
            self.overflow = false;
            return self.feed_frame(byte);
        }

        match byte {
            b'\n' | b'\r' => {
                if !self.text_pending() {
                    return None;
                }
                let result = if self.overflow {
                    Err(InputError::TooLong)
                } else {
                    parse_request(&self.text)
                };
                self.text.clear();
                self.overflow = false;
                Some(Request::Text(result))
            }
            _ => {
                if self.text.push(byte).is_err() {
                    self.overflow = true;
                }
                None
            }
        }
    }

    fn feed_frame(&mut self, byte: u8) -> Option<Request> {
        match self.frames.feed(byte) {
            Ok(Some(frame)) => Some(match ControlCommand::from_frame(&frame) {
                Ok(cmd) => Request::Command(cmd),
                Err(err) => Request::BadFrame(err.into()),
            }),
            Ok(None) => None,
            Err(err) => Some(Request::BadFrame(err.into())),
        }
    }
}

/// Text form of a reply, for clients that wrote text
pub struct TextReply;

impl TextReply {
    /// Longest text reply (`"OK 99\n"`)
    pub const MAX_LEN: usize = 8;

    pub fn format(reply: &Reply) -> String<{ TextReply::MAX_LEN }> {
        let mut out = String::new();
        // Both forms fit in MAX_LEN
        let _ = match reply {
            Reply::Ack { value } => writeln!(out, "OK {}", value),
            Reply::Nak(_) => out.write_str("ERR\n"),
        };
        out
    }
}
