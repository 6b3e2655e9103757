//! iRobot Open Interface protocol backend for roomlib.
//!
//! This crate implements the Open Interface (OI) serial command protocol
//! used by Roomba 500/600 series vacuums and the Create 2. It provides:
//!
//! - **Frame encoder** ([`frame`]) -- opcode table, 16-bit big-endian
//!   values, counted lists, and bitfield packing.
//! - **Argument types** ([`motion`], [`bitfield`], [`note`], [`schedule`])
//!   -- strongly typed command arguments with their bit tables.
//! - **Validator** ([`validate`]) -- range checks that report every
//!   offending field of a command at once.
//! - **Command builders** ([`commands`]) -- validated, ready-to-send frames
//!   for every OI command.
//! - **RoombaDriver** ([`driver`]) -- sends commands over a
//!   [`Transport`](roomlib_core::Transport).
//! - **RoombaBuilder** ([`builder`]) -- fluent construction of a driver.
//!
//! # Example
//!
//! ```
//! use roomlib_oi::commands::{cmd_drive, cmd_start};
//! use roomlib_oi::motion::Drive;
//!
//! assert_eq!(cmd_start(), vec![128]);
//!
//! // Back up at 200 mm/s along a 500 mm radius
//! let frame = cmd_drive(Drive::new(-200, 500)).unwrap();
//! assert_eq!(frame, vec![137, 0xFF, 0x38, 0x01, 0xF4]);
//!
//! // Out-of-range arguments are all reported, and no frame is produced
//! let errs = cmd_drive(Drive::new(600, 3000)).unwrap_err();
//! assert_eq!(errs.len(), 2);
//! ```

pub mod bitfield;
pub mod builder;
pub mod commands;
pub mod driver;
pub mod frame;
pub mod motion;
pub mod note;
pub mod schedule;
pub mod validate;

pub use bitfield::{Buttons, DigitalOutputs, Leds, Motors, SchedulingLeds};
pub use builder::RoombaBuilder;
pub use driver::RoombaDriver;
pub use motion::{Drive, DriveDirect, DrivePwm, PwmMotors};
pub use note::{Note, Song};
pub use schedule::{DateTime, Day, Schedule, ScheduleTime, Weekdays};
