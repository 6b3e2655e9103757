//! Serial port transport for robot communication.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait for USB serial cables and the robot's 7-pin Mini-DIN
//! serial connector.
//!
//! The Open Interface powers up at 115200 baud, 8N1, no flow control. Some
//! models can be switched to 19200 baud by holding the Clean button during
//! power-on, or at runtime with the Baud command.
//!
//! # Example
//!
//! ```no_run
//! use roomlib_transport::SerialTransport;
//! use roomlib_core::Transport;
//!
//! # async fn example() -> roomlib_core::Result<()> {
//! let mut transport = SerialTransport::new("roomba", "/dev/ttyUSB0", 115_200);
//! transport.connect().await?;
//!
//! // Start command
//! transport.write(&[128]).await?;
//! transport.finalize().await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use roomlib_core::error::{Error, Result};
use roomlib_core::transport::Transport;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Baud rate the Open Interface uses after power-up.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Serial port configuration.
///
/// Defaults match the Open Interface power-up settings:
/// - 115200 baud
/// - 8 data bits
/// - 1 stop bit
/// - No parity
/// - No flow control
/// - 1 second read timeout
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate (115200 at power-up, 19200 on older models)
    pub baud_rate: u32,
    /// Number of data bits (always 8 for the Open Interface)
    pub data_bits: DataBits,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Parity checking
    pub parity: Parity,
    /// Flow control
    pub flow_control: FlowControl,
    /// How long [`Transport::read_byte`] waits before giving up.
    /// `None` waits indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            stop_bits: StopBits::One,
            parity: Parity::None,
            flow_control: FlowControl::None,
            read_timeout: Some(Duration::from_secs(1)),
        }
    }
}

/// Number of data bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Seven,
    Eight,
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(bits: DataBits) -> Self {
        match bits {
            DataBits::Seven => tokio_serial::DataBits::Seven,
            DataBits::Eight => tokio_serial::DataBits::Eight,
        }
    }
}

/// Number of stop bits per character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(bits: StopBits) -> Self {
        match bits {
            StopBits::One => tokio_serial::StopBits::One,
            StopBits::Two => tokio_serial::StopBits::Two,
        }
    }
}

/// Parity checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        }
    }
}

/// Flow control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    None,
    Software,
    Hardware,
}

impl From<FlowControl> for tokio_serial::FlowControl {
    fn from(flow: FlowControl) -> Self {
        match flow {
            FlowControl::None => tokio_serial::FlowControl::None,
            FlowControl::Software => tokio_serial::FlowControl::Software,
            FlowControl::Hardware => tokio_serial::FlowControl::Hardware,
        }
    }
}

/// Serial port transport for robot communication.
///
/// Constructing a `SerialTransport` does not touch the port; call
/// [`Transport::connect`] to open it. The handle can be finalized and
/// connected again any number of times.
pub struct SerialTransport {
    /// The open serial stream, if any
    stream: Option<SerialStream>,
    /// Label for logging/debugging
    name: String,
    /// Serial port path
    port_name: String,
    config: SerialConfig,
}

impl SerialTransport {
    /// Create a transport for `port` at the given baud rate with default
    /// settings otherwise.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in diagnostics
    /// * `port` - Serial port path (e.g. "/dev/ttyUSB0" on Linux, "COM3" on Windows)
    /// * `baud_rate` - Baud rate (115200 unless the robot was reconfigured)
    pub fn new(name: &str, port: &str, baud_rate: u32) -> Self {
        let config = SerialConfig {
            baud_rate,
            ..Default::default()
        };
        Self::with_config(name, port, config)
    }

    /// Create a transport with full configuration control.
    pub fn with_config(name: &str, port: &str, config: SerialConfig) -> Self {
        SerialTransport {
            stream: None,
            name: name.to_string(),
            port_name: port.to_string(),
            config,
        }
    }

    /// The configuration used when the port is (re)opened.
    pub fn config(&self) -> &SerialConfig {
        &self.config
    }
}

fn map_io_error(e: std::io::Error) -> Error {
    // Broken pipe and not-connected mean the cable or adapter went away.
    if e.kind() == std::io::ErrorKind::BrokenPipe || e.kind() == std::io::ErrorKind::NotConnected
    {
        Error::ConnectionLost
    } else {
        Error::Io(e)
    }
}

#[async_trait]
impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn port(&self) -> &str {
        &self.port_name
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn open(&mut self) -> Result<(), Error> {
        let config = &self.config;
        tracing::debug!(
            name = %self.name,
            port = %self.port_name,
            baud_rate = config.baud_rate,
            data_bits = ?config.data_bits,
            stop_bits = ?config.stop_bits,
            parity = ?config.parity,
            flow_control = ?config.flow_control,
            "Opening serial port"
        );

        let stream = tokio_serial::new(&self.port_name, config.baud_rate)
            .data_bits(config.data_bits.into())
            .stop_bits(config.stop_bits.into())
            .parity(config.parity.into())
            .flow_control(config.flow_control.into())
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %self.port_name, error = %e, "Failed to open serial port");
                Error::Transport(format!(
                    "failed to open serial port {}: {}",
                    self.port_name, e
                ))
            })?;

        tracing::info!(
            name = %self.name,
            port = %self.port_name,
            baud_rate = config.baud_rate,
            "Serial port opened"
        );
        self.stream = Some(stream);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), Error> {
        let Some(mut stream) = self.stream.take() else {
            return Ok(());
        };
        tracing::debug!(name = %self.name, port = %self.port_name, "Closing serial port");

        // Pending bytes are flushed; the port itself closes when the stream drops.
        let flushed = stream.flush().await;
        drop(stream);

        match flushed {
            Ok(()) => {
                tracing::info!(name = %self.name, port = %self.port_name, "Serial port closed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(port = %self.port_name, error = %e, "Failed to flush before closing");
                Err(Error::Transport(format!(
                    "failed to close serial port {}: {}",
                    self.port_name, e
                )))
            }
        }
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = ?data,
            "Sending data"
        );

        stream.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to send data");
            map_io_error(e)
        })?;

        stream.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush serial port");
            map_io_error(e)
        })?;

        Ok(())
    }

    async fn read_byte(&mut self) -> Result<u8, Error> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        let read = match self.config.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, stream.read_u8())
                .await
                .map_err(|_| {
                    tracing::trace!(
                        port = %self.port_name,
                        timeout_ms = timeout.as_millis(),
                        "Timeout waiting for data"
                    );
                    Error::Timeout
                })?,
            None => stream.read_u8().await,
        };

        let byte = read.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to receive data");
            map_io_error(e)
        })?;
        tracing::trace!(port = %self.port_name, byte, "Received byte");
        Ok(byte)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        if self.stream.is_some() {
            tracing::debug!(port = %self.port_name, "SerialTransport dropped, closing port");
        }
    }
}
