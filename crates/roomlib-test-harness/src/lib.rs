//! roomlib-test-harness: Test utilities and mock transports for roomlib.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! the Open Interface driver and the shared transport lifecycle without a
//! robot attached.

pub mod mock_serial;

pub use mock_serial::MockTransport;
