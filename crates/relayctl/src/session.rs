//! Request/acknowledgment session over a transport.
//!
//! One logical request per call. Fire-and-forget commands go through
//! [`Session::send_only`], which never reads; acknowledgment-soliciting
//! commands go through [`Session::send_expect_ack`], which blocks for a
//! bounded interval waiting for the four-byte reply. Splitting the two
//! keeps the suspension point visible in the signature instead of hiding
//! it behind an opcode branch.
//!
//! No retries happen at this layer: a silent or garbled device is
//! reported to the caller, who owns the retry policy.

use std::time::{Duration, Instant};

use relayctl_protocol::{Frame, FrameCodec, ProtocolError, FRAME_SIZE};
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Drives single request/acknowledgment exchanges over a transport.
pub struct Session<T: Transport> {
    transport: T,
    codec: FrameCodec,
    ack_timeout: Duration,
}

impl<T: Transport> Session<T> {
    /// Create a session with the given acknowledgment timeout.
    pub fn new(transport: T, ack_timeout: Duration) -> Self {
        Session {
            transport,
            codec: FrameCodec::new(),
            ack_timeout,
        }
    }

    /// Send a fire-and-forget frame. Never reads from the transport.
    pub fn send_only(&mut self, frame: &Frame) -> Result<()> {
        self.transport.send(&frame.encode())?;
        debug!("sent {frame}");
        Ok(())
    }

    /// Send a frame and block for its acknowledgment.
    ///
    /// Reads accumulate until a full frame is available, the transport's
    /// read window elapses empty, or the session deadline passes. Zero
    /// bytes overall is [`Error::NoResponse`]; a partial frame propagates
    /// as a protocol error.
    pub fn send_expect_ack(&mut self, frame: &Frame) -> Result<Frame> {
        // Each exchange starts fresh: leftovers from a failed one would
        // misalign this reply
        self.codec.clear();

        self.transport.send(&frame.encode())?;
        debug!("sent {frame}");

        let deadline = Instant::now() + self.ack_timeout;
        let mut chunk = [0u8; FRAME_SIZE];
        let mut received = 0usize;

        loop {
            if let Some(bytes) = self.codec.take_frame() {
                let ack = Frame::decode(&bytes)?;
                debug!("received {ack}");
                return Ok(ack);
            }
            if Instant::now() >= deadline {
                break;
            }
            let n = self.transport.recv(&mut chunk)?;
            if n == 0 {
                // the transport's bounded read elapsed with nothing new
                break;
            }
            received += n;
            self.codec.push(&chunk[..n]);
        }

        if received == 0 {
            return Err(Error::NoResponse(frame.opcode));
        }
        Err(ProtocolError::WrongLength {
            expected: FRAME_SIZE,
            actual: self.codec.buffered_len(),
        }
        .into())
    }
}
