//! Frame encoding/decoding utilities.
//!
//! Every exchange on the relay link is a fixed four-byte frame:
//!
//! ```text
//! +--------+--------+--------+----------+
//! | 0xA0   | addr   | opcode | checksum |
//! +--------+--------+--------+----------+
//! ```
//!
//! The checksum is the wrapping byte sum of the first three bytes. A
//! received frame is validated by reconstructing a candidate from the
//! address and opcode bytes, re-encoding it, and comparing byte-for-byte
//! against the input; the round trip is the single integrity check, so
//! there is no separate checksum formula to keep in sync.

use bytes::{Buf, BytesMut};

use crate::constants::*;
use crate::error::{ProtoResult, ProtocolError};
use crate::types::OpCode;

/// A single protocol frame.
///
/// Frames are built immediately before a send and discarded after; they
/// carry no identity beyond their wire bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Device address on the bus.
    pub addr: u8,
    /// Command or acknowledgment code.
    pub opcode: OpCode,
}

impl Frame {
    /// Create a frame for the given opcode and device address.
    pub fn new(opcode: OpCode, addr: u8) -> Self {
        Frame { addr, opcode }
    }

    /// Wrapping byte sum of the begin marker, address and opcode.
    pub fn checksum(&self) -> u8 {
        FRAME_BEGIN
            .wrapping_add(self.addr)
            .wrapping_add(u8::from(self.opcode))
    }

    /// Encode to the four-byte wire form.
    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        [
            FRAME_BEGIN,
            self.addr,
            u8::from(self.opcode),
            self.checksum(),
        ]
    }

    /// Decode a frame from exactly [`FRAME_SIZE`] bytes.
    ///
    /// A candidate is rebuilt from the address and opcode bytes and
    /// re-encoded; any difference from the input (bad begin marker or bad
    /// checksum) rejects the frame as corrupt.
    pub fn decode(data: &[u8]) -> ProtoResult<Frame> {
        if data.len() != FRAME_SIZE {
            return Err(ProtocolError::WrongLength {
                expected: FRAME_SIZE,
                actual: data.len(),
            });
        }

        let frame = Frame {
            addr: data[1],
            opcode: OpCode::try_from(data[2])?,
        };

        if frame.encode().as_slice() != data {
            let mut bytes = [0u8; FRAME_SIZE];
            bytes.copy_from_slice(data);
            return Err(ProtocolError::CorruptFrame { bytes });
        }

        Ok(frame)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame {{ addr: {:02x}, op: {:?}, chksum: {:02x} }}",
            self.addr,
            self.opcode,
            self.checksum()
        )
    }
}

/// Receive-side reassembly buffer.
///
/// Serial reads may return fewer bytes than a full frame; the codec
/// accumulates chunks until [`FRAME_SIZE`] bytes are available. Stray
/// bytes ahead of a begin marker are discarded.
#[derive(Debug, Default)]
pub struct FrameCodec {
    /// Buffer for accumulating incoming data.
    buffer: BytesMut,
}

impl FrameCodec {
    /// Create a new frame codec.
    pub fn new() -> Self {
        FrameCodec {
            buffer: BytesMut::with_capacity(FRAME_SIZE * 2),
        }
    }

    /// Add received data to the buffer.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Take the next complete frame's bytes off the buffer, if available.
    ///
    /// Returns `Some(bytes)` once [`FRAME_SIZE`] bytes starting at a begin
    /// marker are buffered, or `None` if more data is needed.
    pub fn take_frame(&mut self) -> Option<[u8; FRAME_SIZE]> {
        // Scan for the begin marker, discarding any preceding garbage
        while !self.buffer.is_empty() && self.buffer[0] != FRAME_BEGIN {
            log::trace!("discarding stray byte 0x{:02X}", self.buffer[0]);
            self.buffer.advance(1);
        }

        if self.buffer.len() < FRAME_SIZE {
            return None;
        }

        let mut frame = [0u8; FRAME_SIZE];
        frame.copy_from_slice(&self.buffer.split_to(FRAME_SIZE));
        Some(frame)
    }

    /// Get the number of buffered bytes.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
