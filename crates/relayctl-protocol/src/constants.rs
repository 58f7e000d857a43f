//! Protocol constants
//!
//! These constants define the frame layout, opcode byte values, address
//! bounds, and link defaults for LCUS-type relay switch boards.

use std::time::Duration;

// ============================================================================
// Framing
// ============================================================================

/// First byte of every frame in either direction.
pub const FRAME_BEGIN: u8 = 0xA0;
/// Every frame is exactly this many bytes on the wire.
pub const FRAME_SIZE: usize = 4;

// ============================================================================
// Opcode bytes
// ============================================================================

/// Switch the relay off. Fire-and-forget.
pub const OP_OFF: u8 = 0x00;
/// Switch the relay on. Fire-and-forget.
pub const OP_ON: u8 = 0x01;
/// Acknowledgment: the relay is off.
pub const OP_OFF_ACK: u8 = 0x02;
/// Acknowledgment: the relay is on.
pub const OP_ON_ACK: u8 = 0x03;
/// Toggle the relay; the board acknowledges with the new state.
pub const OP_NEGATE_ACK: u8 = 0x04;
/// Query the relay; the board acknowledges with the current state.
pub const OP_QUERY_ACK: u8 = 0x05;

// ============================================================================
// Addressing
// ============================================================================

/// Lowest valid device address.
pub const ADDR_MIN: u8 = 0x01;
/// Highest valid device address. 0x00 and 0xFE/0xFF are reserved.
pub const ADDR_MAX: u8 = 0xFD;

// ============================================================================
// Link defaults
// ============================================================================

/// Default baud rate for LCUS-type relay boards.
pub const DEFAULT_BAUD: u32 = 9600;
/// Default interval to wait for an acknowledgment frame.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_millis(500);
