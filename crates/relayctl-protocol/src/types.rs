//! Protocol value types.

use crate::constants::*;
use crate::error::ProtocolError;

/// Command and acknowledgment codes understood by the relay board.
///
/// `Off` and `On` are fire-and-forget: the board acts on them without
/// replying. The remaining opcodes belong to acknowledgment exchanges:
/// `NegateAck`/`QueryAck` are requests that solicit a reply, and
/// `OffAck`/`OnAck` are the replies the board sends back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// Switch the relay off.
    Off,
    /// Switch the relay on.
    On,
    /// Report: relay is off.
    OffAck,
    /// Report: relay is on.
    OnAck,
    /// Toggle the relay and report the new state.
    NegateAck,
    /// Report the current relay state.
    QueryAck,
}

impl OpCode {
    /// True for opcodes sent without awaiting any reply.
    pub fn is_fire_and_forget(&self) -> bool {
        matches!(self, OpCode::Off | OpCode::On)
    }

    /// True for opcodes whose exchange includes an acknowledgment frame.
    pub fn expects_ack(&self) -> bool {
        !self.is_fire_and_forget()
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self {
        match opcode {
            OpCode::Off => OP_OFF,
            OpCode::On => OP_ON,
            OpCode::OffAck => OP_OFF_ACK,
            OpCode::OnAck => OP_ON_ACK,
            OpCode::NegateAck => OP_NEGATE_ACK,
            OpCode::QueryAck => OP_QUERY_ACK,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            OP_OFF => Ok(OpCode::Off),
            OP_ON => Ok(OpCode::On),
            OP_OFF_ACK => Ok(OpCode::OffAck),
            OP_ON_ACK => Ok(OpCode::OnAck),
            OP_NEGATE_ACK => Ok(OpCode::NegateAck),
            OP_QUERY_ACK => Ok(OpCode::QueryAck),
            _ => Err(ProtocolError::UnknownOpCode(code)),
        }
    }
}
