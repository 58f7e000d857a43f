//! relayctl: drive LCUS-type USB-to-serial relay switch boards.
//!
//! The crate is layered bottom-up:
//!
//! - [`Transport`]: a blocking byte-duplex channel, with a real serial
//!   port implementation and a scripted mock for tests
//! - [`Session`]: one request/acknowledgment exchange per call over a
//!   transport
//! - [`Switch`]: the stateful controller translating on / off / toggle /
//!   query / reset intents into exchanges
//!
//! One controller exclusively owns one transport for its whole lifetime;
//! the protocol is half-duplex with a single in-flight request, so every
//! call runs to completion before the next begins.

mod error;
mod session;
mod switch;
mod transport;

pub use error::*;
pub use session::*;
pub use switch::*;
pub use transport::*;
