//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when working with the relay wire protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Frame data has the wrong length.
    #[error("wrong frame length: expected {expected} bytes, got {actual}")]
    WrongLength {
        /// Expected length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Unknown opcode byte.
    #[error("unknown opcode: 0x{0:02X}")]
    UnknownOpCode(u8),

    /// Frame does not survive the encode round trip (bad begin marker or
    /// bad checksum).
    #[error("corrupt frame: {bytes:02X?}")]
    CorruptFrame {
        /// The rejected bytes.
        bytes: [u8; 4],
    },
}

/// Result type alias for protocol operations.
pub type ProtoResult<T> = Result<T, ProtocolError>;
