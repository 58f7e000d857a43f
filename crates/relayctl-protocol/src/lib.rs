//! Relay Switch Serial Protocol
//!
//! This crate provides types and utilities for talking to LCUS-type relay
//! switch boards over their USB-to-serial interface. The protocol is a
//! fixed-size binary framing: every message in either direction is exactly
//! four bytes.
//!
//! # Protocol Overview
//!
//! A frame carries a begin marker, a one-byte device address, an opcode and
//! a checksum. Messages are either:
//!
//! - **Commands** (host → relay): `Off`/`On` are fire-and-forget,
//!   `NegateAck`/`QueryAck` solicit an acknowledgment
//! - **Acknowledgments** (relay → host): `OffAck`/`OnAck` reporting the
//!   relay's state after a `NegateAck` or `QueryAck`
//!
//! # Example
//!
//! ```rust,ignore
//! use relayctl_protocol::{Frame, OpCode};
//!
//! // Build a command frame
//! let frame = Frame::new(OpCode::QueryAck, 0x01);
//! let bytes = frame.encode();
//!
//! // Parse an acknowledgment
//! let ack = Frame::decode(&received)?;
//! ```

mod constants;
mod error;
mod frame;
mod types;

pub use constants::*;
pub use error::*;
pub use frame::*;
pub use types::*;
