//! # roomlib -- Open Interface control for robot vacuums
//!
//! `roomlib` is an asynchronous Rust library for commanding iRobot Roomba
//! and Create robots over the Open Interface (OI) serial protocol. It
//! encodes and validates every OI command and sends it over a serial port
//! or a pair of GPIO pins.
//!
//! ## Quick Start
//!
//! ```no_run
//! use roomlib::RoombaBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut robot = RoombaBuilder::new()
//!         .serial_port("/dev/ttyUSB0")
//!         .build()
//!         .await?;
//!
//!     robot.start().await?;
//!     robot.safe().await?;
//!     robot.drive(200, 500).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Crate                 | Purpose                                         |
//! |-----------------------|-------------------------------------------------|
//! | `roomlib-core`        | [`Transport`] trait, [`Error`], [`ErrorSet`]    |
//! | `roomlib-transport`   | Serial and GPIO pin transports                  |
//! | `roomlib-oi`          | OI frame encoder, validator, and driver         |
//! | **`roomlib`**         | This facade crate -- re-exports everything      |
//!
//! ## Errors
//!
//! Every command returns [`Result<(), ErrorSet>`](Result). A command with
//! several out-of-range arguments reports all of them, and writes nothing:
//!
//! ```
//! # async fn example(robot: &mut roomlib::RoombaDriver) {
//! let errs = robot.drive(600, 3000).await.unwrap_err();
//! assert_eq!(errs.len(), 2);
//! # }
//! ```

pub use roomlib_core::*;

/// Open Interface commands, argument types, and the driver.
pub mod oi {
    pub use roomlib_oi::*;
}

/// Serial and GPIO pin transports.
pub mod transport {
    pub use roomlib_transport::*;
}

pub use roomlib_oi::{RoombaBuilder, RoombaDriver};
