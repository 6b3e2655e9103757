//! RoombaBuilder -- fluent builder for constructing [`RoombaDriver`] instances.
//!
//! # Example
//!
//! ```no_run
//! use roomlib_oi::builder::RoombaBuilder;
//!
//! # async fn example() -> roomlib_core::Result<()> {
//! let mut robot = RoombaBuilder::new()
//!     .name("kitchen")
//!     .serial_port("/dev/ttyUSB0")
//!     .baud_rate(115_200)
//!     .build()
//!     .await?;
//! robot.start().await?;
//! robot.safe().await?;
//! # Ok(())
//! # }
//! ```

use roomlib_core::error::{Error, Result};
use roomlib_core::transport::Transport;
use roomlib_transport::{SerialTransport, DEFAULT_BAUD_RATE};
use tracing::debug;

use crate::driver::RoombaDriver;

/// Name given to drivers built without [`name()`](RoombaBuilder::name).
pub const DEFAULT_NAME: &str = "roomba";

/// Fluent builder for [`RoombaDriver`].
pub struct RoombaBuilder {
    name: String,
    serial_port: Option<String>,
    baud_rate: u32,
    connect_on_build: bool,
}

impl RoombaBuilder {
    pub fn new() -> Self {
        RoombaBuilder {
            name: DEFAULT_NAME.to_string(),
            serial_port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            connect_on_build: true,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB0` or `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Override the serial baud rate (default: 115200, the rate the robot
    /// uses after power-up).
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = baud;
        self
    }

    /// Connect the transport as part of building (default: true).
    pub fn connect_on_build(mut self, enabled: bool) -> Self {
        self.connect_on_build = enabled;
        self
    }

    /// Build a [`RoombaDriver`] with a caller-provided transport.
    ///
    /// This is the entry point for tests (pass a `MockTransport` from
    /// `roomlib-test-harness`) and for GPIO pin transports.
    pub async fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<RoombaDriver> {
        let mut driver = RoombaDriver::new(&self.name, transport);
        if self.connect_on_build {
            driver.connect().await?;
        }
        Ok(driver)
    }

    /// Build a [`RoombaDriver`] over a serial port.
    ///
    /// Requires that [`serial_port()`](Self::serial_port) has been called.
    pub async fn build(self) -> Result<RoombaDriver> {
        let port = self
            .serial_port
            .as_deref()
            .ok_or_else(|| Error::InvalidParameter("serial_port is required for build()".into()))?;
        debug!(name = %self.name, port, baud = self.baud_rate, "building serial driver");
        let transport = SerialTransport::new(&self.name, port, self.baud_rate);
        self.build_with_transport(Box::new(transport)).await
    }
}

impl Default for RoombaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
