//! Mock transport for deterministic testing of the Open Interface driver.
//!
//! [`MockTransport`] implements the [`Transport`] trait in memory. It logs
//! every frame written, serves pre-loaded bytes to `read_byte()`, and can be
//! told to fail the next open, close, or write so that error aggregation can
//! be tested without hardware.
//!
//! # Example
//!
//! ```
//! use roomlib_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! mock.queue_read(&[0x01, 0x02]);
//! assert!(mock.sent_data().is_empty());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;

use roomlib_core::error::{Error, Result};
use roomlib_core::transport::Transport;

/// A mock [`Transport`] for testing without a robot.
///
/// Injected failures are one-shot: each `fail_next_*` call affects exactly
/// one subsequent operation of that kind.
#[derive(Debug)]
pub struct MockTransport {
    name: String,
    port: String,
    /// Whether the transport is "connected".
    connected: bool,
    /// Log of all bytes written, one entry per `write()` call.
    sent_log: Vec<Vec<u8>>,
    /// Bytes served by `read_byte()`.
    incoming: VecDeque<u8>,
    open_failures: VecDeque<Error>,
    close_failures: VecDeque<Error>,
    write_failures: VecDeque<Error>,
    opens: usize,
    closes: usize,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            name: "mock".to_string(),
            port: "mock0".to_string(),
            connected: true,
            sent_log: Vec::new(),
            incoming: VecDeque::new(),
            open_failures: VecDeque::new(),
            close_failures: VecDeque::new(),
            write_failures: VecDeque::new(),
            opens: 0,
            closes: 0,
        }
    }

    /// Create a new mock transport that has not been connected yet.
    pub fn disconnected() -> Self {
        MockTransport {
            connected: false,
            ..Self::new()
        }
    }

    /// Override the identity reported by `name()` and `port()`.
    pub fn with_identity(mut self, name: &str, port: &str) -> Self {
        self.name = name.to_string();
        self.port = port.to_string();
        self
    }

    /// Return all data written through this transport, one entry per
    /// `write()` call.
    pub fn sent_data(&self) -> &[Vec<u8>] {
        &self.sent_log
    }

    /// Return every written byte as one contiguous buffer.
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.sent_log.concat()
    }

    /// Forget everything written so far.
    pub fn clear_sent(&mut self) {
        self.sent_log.clear();
    }

    /// Queue bytes for subsequent `read_byte()` calls.
    pub fn queue_read(&mut self, data: &[u8]) {
        self.incoming.extend(data.iter().copied());
    }

    /// Make the next `open()` fail with `error`.
    pub fn fail_next_open(&mut self, error: Error) {
        self.open_failures.push_back(error);
    }

    /// Make the next `close()` of an open channel fail with `error`.
    ///
    /// The channel is still released, as the transport contract requires.
    pub fn fail_next_close(&mut self, error: Error) {
        self.close_failures.push_back(error);
    }

    /// Make the next `write()` fail with `error`. Nothing is logged for it.
    pub fn fail_next_write(&mut self, error: Error) {
        self.write_failures.push_back(error);
    }

    /// Number of `open()` attempts, successful or not.
    pub fn open_count(&self) -> usize {
        self.opens
    }

    /// Number of times an open channel was closed.
    pub fn close_count(&self) -> usize {
        self.closes
    }

    /// Set the connected state directly, bypassing open/close accounting.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn port(&self) -> &str {
        &self.port
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn open(&mut self) -> Result<(), Error> {
        self.opens += 1;
        if let Some(e) = self.open_failures.pop_front() {
            return Err(e);
        }
        self.connected = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), Error> {
        if !self.connected {
            return Ok(());
        }
        self.connected = false;
        self.closes += 1;
        match self.close_failures.pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        if let Some(e) = self.write_failures.pop_front() {
            return Err(e);
        }
        tracing::trace!(port = %self.port, data = ?data, "Mock write");
        self.sent_log.push(data.to_vec());
        Ok(())
    }

    async fn read_byte(&mut self) -> Result<u8, Error> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.incoming.pop_front().ok_or(Error::Timeout)
    }
}
