//! Application error types.

use relayctl_protocol::{OpCode, ProtocolError};
use thiserror::Error;

use crate::switch::Feature;

/// Errors surfaced by relayctl operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Frame-level protocol failure.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An acknowledgment-soliciting request got zero bytes back before the
    /// timeout. The device is silent or does not support the opcode.
    #[error("no response to {0:?}: device silent or opcode unsupported")]
    NoResponse(OpCode),

    /// Operation requires a feature the controller was not configured
    /// with. Raised before any transport I/O.
    #[error("operation requires the {0} feature")]
    UnsupportedFeature(Feature),

    /// The device acknowledged with an opcode that is not a state report.
    /// Indicates a misbehaving peer or a library bug, not a condition to
    /// recover from.
    #[error("unexpected reply to {request:?}: {reply:?}")]
    UnexpectedReply {
        /// The opcode that was sent.
        request: OpCode,
        /// The opcode that came back.
        reply: OpCode,
    },

    /// Device address outside the valid bus range.
    #[error("invalid device address 0x{0:02X} (valid range 0x01..=0xFD)")]
    InvalidAddress(u8),

    /// Serial port error.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error on the transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for relayctl operations.
pub type Result<T> = std::result::Result<T, Error>;
