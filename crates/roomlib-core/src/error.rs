//! Error types for roomlib.
//!
//! Individual failures are reported as [`Error`]. Every driver command and
//! every connection lifecycle call returns an [`ErrorSet`] instead of a
//! single error: argument validation reports all out-of-range fields of a
//! command at once, and a reconnect may fail both while closing the old
//! channel and while opening the new one.

use std::fmt;

/// A single failure from the protocol or transport layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A command argument is outside the range the Open Interface accepts.
    ///
    /// One of these is produced per offending field; a single command call
    /// may produce several.
    #[error("invalid {field}: {value} (expected {expected})")]
    InvalidArgument {
        /// Name of the offending argument (e.g. `velocity`, `radius`).
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// Human-readable description of the accepted range.
        expected: String,
    },

    /// Invalid configuration passed to a builder.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A transport-level error (opening or closing the channel).
    #[error("transport error: {0}")]
    Transport(String),

    /// The transport channel is not open.
    #[error("not connected")]
    NotConnected,

    /// The connection to the robot was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// Timed out waiting for a byte from the robot.
    #[error("timeout waiting for data")]
    Timeout,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for argument validation failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

/// An ordered collection of [`Error`]s returned from a single call.
///
/// A returned `ErrorSet` is never empty. Sets are composed explicitly:
/// a lifecycle step that can fail twice builds one set and pushes each
/// failure into it, and validation collects per-field checks with
/// [`FromIterator`].
#[derive(Debug, Default)]
pub struct ErrorSet {
    errors: Vec<Error>,
}

impl ErrorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        ErrorSet { errors: Vec::new() }
    }

    /// Append one error.
    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Append every error of another set, preserving order.
    pub fn extend(&mut self, other: ErrorSet) {
        self.errors.extend(other.errors);
    }

    /// Record the error of a fallible step, if any.
    pub fn record<T>(&mut self, result: std::result::Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// Consume the set, returning the underlying errors.
    pub fn into_inner(self) -> Vec<Error> {
        self.errors
    }

    /// `Ok(value)` if the set is empty, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: T) -> Result<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("no errors");
        }
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorSet {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.errors
            .first()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<Error> for ErrorSet {
    fn from(error: Error) -> Self {
        ErrorSet {
            errors: vec![error],
        }
    }
}

impl From<std::io::Error> for ErrorSet {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error).into()
    }
}

impl FromIterator<Error> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = Error>>(iter: I) -> Self {
        ErrorSet {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ErrorSet {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorSet {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// A convenience `Result` alias. Defaults to [`ErrorSet`]; single-failure
/// operations such as [`Transport::write`](crate::Transport::write) use
/// `Result<T, Error>`.
pub type Result<T, E = ErrorSet> = std::result::Result<T, E>;
