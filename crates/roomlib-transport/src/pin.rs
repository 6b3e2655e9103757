//! GPIO pin-pair transport.
//!
//! Boards without a UART can talk to the robot over two GPIO pins, one wired
//! to the robot's RXD and one to its TXD. The pins themselves belong to the
//! host board support code; this module only needs the narrow
//! [`DigitalPin`] boundary from them.
//!
//! ```no_run
//! use roomlib_transport::{DigitalPin, PinTransport};
//! use roomlib_core::Transport;
//!
//! # async fn example<R: DigitalPin + 'static, W: DigitalPin + 'static>(rx: R, tx: W)
//! #     -> roomlib_core::Result<()> {
//! let mut transport = PinTransport::new("roomba-gpio", rx, tx);
//! transport.connect().await?;
//! transport.write(&[128, 131]).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use roomlib_core::error::{Error, Result};
use roomlib_core::transport::Transport;

/// A GPIO pin driver able to shift a byte in or out.
#[async_trait]
pub trait DigitalPin: Send + Sync {
    /// Pin identifier as understood by the board (e.g. `"13"`, `"P9_12"`).
    fn pin(&self) -> &str;

    /// Write one byte out of the pin.
    async fn digital_write(&mut self, level: u8) -> Result<(), Error>;

    /// Read one byte from the pin.
    async fn digital_read(&mut self) -> Result<u8, Error>;
}

/// Transport over a pair of GPIO pins: `reader` receives, `writer` sends.
///
/// The pins are owned for the transport's lifetime; opening and closing
/// only gate whether traffic is allowed.
pub struct PinTransport<R, W> {
    name: String,
    /// `"<read pin> <write pin>"`, computed once so it stays stable.
    port: String,
    reader: R,
    writer: W,
    open: bool,
}

impl<R: DigitalPin, W: DigitalPin> PinTransport<R, W> {
    pub fn new(name: &str, reader: R, writer: W) -> Self {
        let port = format!("{} {}", reader.pin(), writer.pin());
        PinTransport {
            name: name.to_string(),
            port,
            reader,
            writer,
            open: false,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

#[async_trait]
impl<R: DigitalPin, W: DigitalPin> Transport for PinTransport<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn port(&self) -> &str {
        &self.port
    }

    fn is_connected(&self) -> bool {
        self.open
    }

    async fn open(&mut self) -> Result<(), Error> {
        tracing::debug!(name = %self.name, pins = %self.port, "Opening pin transport");
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), Error> {
        if self.open {
            tracing::debug!(name = %self.name, pins = %self.port, "Closing pin transport");
        }
        self.open = false;
        Ok(())
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        tracing::trace!(pins = %self.port, bytes = data.len(), data = ?data, "Sending data");
        for &byte in data {
            self.writer.digital_write(byte).await?;
        }
        Ok(())
    }

    async fn read_byte(&mut self) -> Result<u8, Error> {
        if !self.open {
            return Err(Error::NotConnected);
        }
        let byte = self.reader.digital_read().await?;
        tracing::trace!(pins = %self.port, byte, "Received byte");
        Ok(byte)
    }
}
