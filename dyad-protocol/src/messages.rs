//! Message types for the control protocol
//!
//! - Client → display: [`ControlCommand`]
//! - Display → client: [`Reply`]

use crate::frame::{Frame, FrameError};
use dyad_core::input::clamp_request;

// Message type IDs: client → display
pub const MSG_DISPLAY_SET: u8 = 0x10;

// Message type IDs: display → client
pub const MSG_ACK: u8 = 0x03;
pub const MSG_NAK: u8 = 0x04;

/// Commands parsed from client frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCommand {
    /// Show a number; payload is an `i32`, little-endian
    DisplaySet(i32),
}

impl ControlCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_DISPLAY_SET => {
                let bytes: [u8; 4] = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| FrameError::InvalidFrame)?;
                Ok(ControlCommand::DisplaySet(i32::from_le_bytes(bytes)))
            }
            other => Err(FrameError::UnknownType(other)),
        }
    }

    /// Encode this command into a frame (used by clients and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControlCommand::DisplaySet(value) => {
                Frame::new(MSG_DISPLAY_SET, &value.to_le_bytes())
            }
        }
    }

    /// Requested value with negatives clamped to 0
    pub fn requested_value(&self) -> u32 {
        match self {
            ControlCommand::DisplaySet(value) => clamp_request(i64::from(*value)),
        }
    }
}

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NakReason {
    /// Message type not supported
    UnknownCommand,
    /// Payload malformed for the message type
    BadPayload,
    /// Text request longer than three characters
    TooLong,
    /// Frame failed its checksum
    Checksum,
}

impl NakReason {
    pub fn to_byte(self) -> u8 {
        match self {
            NakReason::UnknownCommand => 0x01,
            NakReason::BadPayload => 0x02,
            NakReason::TooLong => 0x03,
            NakReason::Checksum => 0x04,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(NakReason::UnknownCommand),
            0x02 => Some(NakReason::BadPayload),
            0x03 => Some(NakReason::TooLong),
            0x04 => Some(NakReason::Checksum),
            _ => None,
        }
    }
}

impl From<FrameError> for NakReason {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::UnknownType(_) => NakReason::UnknownCommand,
            FrameError::InvalidChecksum => NakReason::Checksum,
            FrameError::PayloadTooLarge
            | FrameError::InvalidFrame
            | FrameError::BufferTooSmall => NakReason::BadPayload,
        }
    }
}

/// Replies sent back over the control channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Request accepted; carries the value now on the display
    Ack { value: u8 },
    /// Request refused
    Nak(NakReason),
}

impl Reply {
    /// Encode this reply into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            Reply::Ack { value } => Frame::new(MSG_ACK, &[*value]),
            Reply::Nak(reason) => Frame::new(MSG_NAK, &[reason.to_byte()]),
        }
    }

    /// Parse a reply from a frame (client side)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let first = frame.payload.first().copied();
        match (frame.msg_type, first) {
            (MSG_ACK, Some(value)) => Ok(Reply::Ack { value }),
            (MSG_NAK, Some(code)) => NakReason::from_byte(code)
                .map(Reply::Nak)
                .ok_or(FrameError::InvalidFrame),
            (MSG_ACK | MSG_NAK, None) => Err(FrameError::InvalidFrame),
            (other, _) => Err(FrameError::UnknownType(other)),
        }
    }
}
