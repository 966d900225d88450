//! Control frame encoding and decoding
//!
//! Frame format:
//! - START (1 byte): 0xAA synchronization byte
//! - LENGTH (1 byte): payload length (0-16)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-16 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// Maximum complete frame size (START + LENGTH + TYPE + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Invalid frame structure or payload
    InvalidFrame,
    /// Message type not understood
    UnknownType(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ msg_type, |acc, &b| acc ^ b)
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.payload.len();
        let frame_len = len + 4;
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        // len <= MAX_PAYLOAD_SIZE, fits in a byte
        let length = len as u8;
        buffer[0] = FRAME_START;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3..3 + len].copy_from_slice(&self.payload);
        buffer[3 + len] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    WaitingForStart,
    WaitingForLength,
    WaitingForType,
    ReadingPayload,
    WaitingForChecksum,
}

/// Byte-at-a-time frame decoder
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    length: u8,
    msg_type: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart,
            payload: Vec::new(),
            length: 0,
            msg_type: 0,
        }
    }

    /// Drop any partial frame and wait for the next START byte
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// True while no frame is in progress
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::WaitingForStart
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(frame))` on a complete valid frame, `Ok(None)` when
    /// more bytes are needed. Errors reset the parser.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                // Anything but START is noise between frames
                if byte == FRAME_START {
                    self.state = ParseState::WaitingForLength;
                }
            }
            ParseState::WaitingForLength => {
                if usize::from(byte) > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.length = byte;
                self.state = ParseState::WaitingForType;
            }
            ParseState::WaitingForType => {
                self.msg_type = byte;
                self.payload.clear();
                self.state = if self.length == 0 {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingPayload
                };
            }
            ParseState::ReadingPayload => {
                // Bounded by the LENGTH check above
                let _ = self.payload.push(byte);
                if self.payload.len() == usize::from(self.length) {
                    self.state = ParseState::WaitingForChecksum;
                }
            }
            ParseState::WaitingForChecksum => {
                let expected = Frame::checksum(self.length, self.msg_type, &self.payload);
                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.payload.clone(),
                };
                self.reset();

                if byte != expected {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    /// Feed bytes until the first complete frame
    ///
    /// Bytes after that frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_encode_empty_payload() {
        let frame = Frame::empty(0x03);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_START, 0, 0x03, 0x03]);
    }

    #[test]
    fn test_frame_encode_with_payload() {
        let frame = Frame::new(0x10, &[42, 0, 0, 0]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();

        assert_eq!(encoded.len(), 8);
        assert_eq!(encoded[1], 4); // length
        assert_eq!(encoded[2], 0x10); // type
        assert_eq!(&encoded[3..7], &[42, 0, 0, 0]);
        assert_eq!(encoded[7], 4 ^ 0x10 ^ 42);
    }

    #[test]
    fn test_buffer_too_small() {
        let frame = Frame::new(0x10, &[1, 2, 3, 4]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parse_encoded_frame() {
        let original = Frame::new(0x10, &[7, 0, 0, 0]).unwrap();
        let encoded = original.encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();
        assert_eq!(parsed, original);
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let mut encoded = Frame::empty(0x10).encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::InvalidChecksum));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::PayloadTooLarge)
        );
        assert!(parser.is_idle());
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let encoded = Frame::empty(0x10).encode_to_vec().unwrap();

        let mut data = Vec::<u8, 20>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x10);
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x10, &large), Err(FrameError::PayloadTooLarge));
    }
}
