//! Transport trait for robot communication.
//!
//! The [`Transport`] trait abstracts over the physical link to the robot.
//! Implementations exist for serial ports and GPIO pin pairs (in
//! `roomlib-transport`) and for testing (`MockTransport` in
//! `roomlib-test-harness`).
//!
//! The Open Interface driver only ever writes frames through this trait;
//! it never depends on a concrete backend.

use async_trait::async_trait;

use crate::error::{Error, ErrorSet, Result};

/// Asynchronous byte-level transport to a robot.
///
/// Backends implement the two channel primitives [`open`](Self::open) and
/// [`close`](Self::close). The lifecycle calls [`connect`](Self::connect)
/// and [`finalize`](Self::finalize) are provided on top of them so that
/// every backend follows the same reconnect and error-aggregation rules.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Stable label for this transport, used in diagnostics.
    fn name(&self) -> &str;

    /// Port or address of the physical link (e.g. `/dev/ttyUSB0`).
    fn port(&self) -> &str;

    /// Check whether a channel is currently open.
    fn is_connected(&self) -> bool;

    /// Open a fresh channel.
    ///
    /// Only called when no channel is held.
    async fn open(&mut self) -> Result<(), Error>;

    /// Close the channel if one is open.
    ///
    /// The channel handle must be released even when closing fails, so that
    /// [`is_connected`](Self::is_connected) reports `false` afterwards.
    /// Closing an already-closed transport succeeds.
    async fn close(&mut self) -> Result<(), Error>;

    /// Send raw bytes to the robot.
    ///
    /// Writes exactly `data`, in order, and flushes. Returns
    /// [`Error::NotConnected`] if no channel is open.
    async fn write(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Read one byte from the robot.
    async fn read_byte(&mut self) -> Result<u8, Error>;

    /// Open the channel, replacing any channel that is already open.
    ///
    /// An open channel is finalized first. A fresh channel is then opened
    /// even if that close failed, and both failures are reported together.
    async fn connect(&mut self) -> Result<()> {
        let mut errors = ErrorSet::new();
        if self.is_connected() {
            tracing::debug!(name = %self.name(), port = %self.port(), "Reconnecting, closing previous channel");
            if let Err(e) = self.finalize().await {
                errors.extend(e);
            }
        }
        errors.record(self.open().await);
        errors.into_result(())
    }

    /// Close the channel and release it. A no-op when already closed.
    async fn finalize(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }
        self.close().await.map_err(ErrorSet::from)
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn port(&self) -> &str {
        (**self).port()
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    async fn open(&mut self) -> Result<(), Error> {
        (**self).open().await
    }

    async fn close(&mut self) -> Result<(), Error> {
        (**self).close().await
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        (**self).write(data).await
    }

    async fn read_byte(&mut self) -> Result<u8, Error> {
        (**self).read_byte().await
    }

    async fn connect(&mut self) -> Result<()> {
        (**self).connect().await
    }

    async fn finalize(&mut self) -> Result<()> {
        (**self).finalize().await
    }
}
