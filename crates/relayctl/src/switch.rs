//! Stateful switch controller.
//!
//! [`Switch`] tracks the logical on/off state of one addressable relay
//! and turns high-level intents into protocol exchanges. The cached state
//! is only written after a completed exchange. `Off`/`On` carry no
//! acknowledgment on the wire, so after those the device is trusted to
//! have complied and the cache is updated optimistically; acknowledgment
//! exchanges adopt whatever state the device reports, which lets
//! `toggle` and `query` self-correct against drift.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use relayctl_protocol::{Frame, OpCode, ADDR_MAX, ADDR_MIN, DEFAULT_ACK_TIMEOUT};
use tracing::debug;

use crate::error::{Error, Result};
use crate::session::Session;
use crate::transport::Transport;

/// Optional capabilities a relay board may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// The board acknowledges `NegateAck`/`QueryAck` with a state report.
    Ack,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Ack => write!(f, "ack"),
        }
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ack" => Ok(Feature::Ack),
            other => Err(format!("unknown feature: {other}")),
        }
    }
}

/// Logical state of the relay as last observed or commanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchState {
    /// No reliable status yet.
    #[default]
    Unknown,
    /// Relay contact open.
    Off,
    /// Relay contact closed.
    On,
}

impl SwitchState {
    /// Interpret an acknowledgment opcode as a state report.
    fn from_ack(opcode: OpCode) -> Option<SwitchState> {
        match opcode {
            OpCode::OffAck => Some(SwitchState::Off),
            OpCode::OnAck => Some(SwitchState::On),
            _ => None,
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchState::Unknown => write!(f, "Unknown"),
            SwitchState::Off => write!(f, "Off"),
            SwitchState::On => write!(f, "On"),
        }
    }
}

/// Controller for one addressable relay on a serial link.
///
/// The controller exclusively owns its transport; dropping the controller
/// releases it.
pub struct Switch<T: Transport> {
    session: Session<T>,
    addr: u8,
    features: HashSet<Feature>,
    status: SwitchState,
}

impl<T: Transport> Switch<T> {
    /// Create a controller for the device at `addr`.
    ///
    /// With [`Feature::Ack`] enabled the device is queried immediately so
    /// the cached state starts out authoritative; otherwise it starts as
    /// [`SwitchState::Unknown`] until the first mutating call.
    pub fn new(transport: T, addr: u8, features: HashSet<Feature>) -> Result<Self> {
        if !(ADDR_MIN..=ADDR_MAX).contains(&addr) {
            return Err(Error::InvalidAddress(addr));
        }

        let mut switch = Switch {
            session: Session::new(transport, DEFAULT_ACK_TIMEOUT),
            addr,
            features,
            status: SwitchState::Unknown,
        };
        if switch.features.contains(&Feature::Ack) {
            switch.query()?;
        }
        debug!("switch {:02x} ready, status {}", switch.addr, switch.status);
        Ok(switch)
    }

    /// Device address this controller drives.
    pub fn addr(&self) -> u8 {
        self.addr
    }

    /// Cached state. No transport interaction.
    pub fn status(&self) -> SwitchState {
        self.status
    }

    /// Switch the relay on. No-op when the cached state is already `On`.
    pub fn on(&mut self) -> Result<()> {
        if self.status != SwitchState::On {
            self.command(OpCode::On, SwitchState::On)?;
        }
        Ok(())
    }

    /// Switch the relay off. No-op when the cached state is already `Off`.
    pub fn off(&mut self) -> Result<()> {
        if self.status != SwitchState::Off {
            self.command(OpCode::Off, SwitchState::Off)?;
        }
        Ok(())
    }

    /// Toggle the relay and adopt the state the device reports back.
    ///
    /// Requires [`Feature::Ack`]; fails before any transport I/O without
    /// it.
    pub fn toggle(&mut self) -> Result<()> {
        self.require(Feature::Ack)?;
        self.exchange(OpCode::NegateAck)
    }

    /// Ask the device for its current state and adopt the report,
    /// overriding whatever was cached.
    ///
    /// Requires [`Feature::Ack`].
    pub fn query(&mut self) -> Result<()> {
        self.require(Feature::Ack)?;
        self.exchange(OpCode::QueryAck)
    }

    /// Pulse the relay: off, wait `delay`, on (or the reverse order).
    ///
    /// The wait is a plain blocking sleep and cannot be interrupted
    /// mid-pulse.
    pub fn reset(&mut self, delay: Duration, reverse: bool) -> Result<()> {
        if reverse {
            self.on()?;
            thread::sleep(delay);
            self.off()
        } else {
            self.off()?;
            thread::sleep(delay);
            self.on()
        }
    }

    /// Send a fire-and-forget command and update the cache optimistically.
    fn command(&mut self, opcode: OpCode, target: SwitchState) -> Result<()> {
        self.session.send_only(&Frame::new(opcode, self.addr))?;
        self.status = target;
        Ok(())
    }

    /// Run an acknowledgment exchange and adopt the reported state.
    fn exchange(&mut self, opcode: OpCode) -> Result<()> {
        let ack = self.session.send_expect_ack(&Frame::new(opcode, self.addr))?;
        self.status = SwitchState::from_ack(ack.opcode).ok_or(Error::UnexpectedReply {
            request: opcode,
            reply: ack.opcode,
        })?;
        Ok(())
    }

    fn require(&self, feature: Feature) -> Result<()> {
        if self.features.contains(&feature) {
            Ok(())
        } else {
            Err(Error::UnsupportedFeature(feature))
        }
    }
}
