//! roomlib-core: Core traits and error definitions for roomlib.
//!
//! This crate defines the transport-agnostic abstractions shared by the
//! Open Interface driver and every transport backend.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel with a shared
//!   connect/finalize lifecycle
//! - [`Error`] -- a single protocol or transport failure
//! - [`ErrorSet`] / [`Result`] -- the aggregated error type returned by
//!   every driver command and lifecycle call

pub mod error;
pub mod transport;

pub use error::{Error, ErrorSet, Result};
pub use transport::Transport;
