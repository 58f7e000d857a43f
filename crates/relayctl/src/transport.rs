//! Byte transports for the relay link.
//!
//! The session layer only needs a blocking duplex byte stream with a
//! bounded read: [`Transport::recv`] returns `Ok(0)` when nothing arrived
//! within the transport's read timeout. [`SerialTransport`] is the real
//! link; [`MockTransport`] fakes a relay board from a script and is used
//! by the unit and integration tests.

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

/// A blocking byte-oriented duplex channel.
pub trait Transport {
    /// Write all bytes to the device.
    fn send(&mut self, data: &[u8]) -> io::Result<()>;

    /// Read up to `buf.len()` bytes. Returns `Ok(0)` when no byte arrived
    /// within the transport's read timeout.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Serial port transport backed by the `serialport` crate.
///
/// The port is closed when the transport is dropped, on every exit path.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open `path` at `baud` with the given read timeout.
    pub fn open(
        path: &str,
        baud: u32,
        read_timeout: Duration,
    ) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, baud).timeout(read_timeout).open()?;
        debug!("opened {path} at {baud} baud");
        Ok(SerialTransport { port })
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.port.write_all(data)?;
        self.port.flush()
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // The port reports an elapsed read timeout as an error; the
            // session treats it as "no bytes within the window"
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(0),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }
}

#[derive(Default)]
struct MockInner {
    replies: VecDeque<Vec<u8>>,
    writes: Vec<Vec<u8>>,
    recv_calls: usize,
}

/// Scripted transport used in tests to fake a relay board.
///
/// Reads are served from a queue of chunks; an exhausted queue reads as
/// silence (`Ok(0)`), i.e. an immediately elapsed timeout. Every write is
/// captured for inspection. Clones share state, so a test can keep a
/// handle while the controller owns the other.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockInner>>,
}

impl MockTransport {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk of reply bytes to be served by a future `recv` call.
    pub fn queue_reply(&self, bytes: &[u8]) {
        self.lock().replies.push_back(bytes.to_vec());
    }

    /// All writes issued so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.lock().writes.clone()
    }

    /// Number of `recv` calls made so far.
    pub fn recv_calls(&self) -> usize {
        self.lock().recv_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInner> {
        self.inner.lock().expect("mock transport lock poisoned")
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        self.lock().writes.push(data.to_vec());
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut inner = self.lock();
        inner.recv_calls += 1;
        match inner.replies.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    inner.replies.push_front(chunk[n..].to_vec());
                }
                Ok(n)
            }
            None => Ok(0),
        }
    }
}
