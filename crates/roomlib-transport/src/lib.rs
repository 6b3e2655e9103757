//! Transport implementations for roomlib.
//!
//! This crate provides concrete implementations of the
//! [`Transport`](roomlib_core::Transport) trait from `roomlib-core`:
//!
//! - [`SerialTransport`]: USB serial cables and the robot's Mini-DIN port
//! - [`PinTransport`]: a pair of GPIO pins driven through [`DigitalPin`]
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
//! // Start, then Safe mode
//! transport.write(&[128, 131]).await?;
//! # Ok(())
//! # }
//! ```

pub mod pin;
pub mod serial;

pub use pin::{DigitalPin, PinTransport};
pub use serial::{
    DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits, DEFAULT_BAUD_RATE,
};
