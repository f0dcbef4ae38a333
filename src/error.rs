//! Error types for Manifold.

use crate::element::ElementState;
use thiserror::Error;

/// Result type alias using Manifold's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Manifold operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration or argument (e.g. zero outputs, port count mismatch).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Memory allocation failed.
    #[error("out of memory")]
    OutOfMemory,

    /// Operation attempted in a lifecycle state that does not allow it.
    #[error("invalid state: expected {expected}, actual {actual}")]
    InvalidState {
        /// State the operation requires.
        expected: ElementState,
        /// State the element was actually in.
        actual: ElementState,
    },

    /// A port operation did not complete within its blocking policy.
    #[error("port operation timed out")]
    Timeout,

    /// The peer endpoint of a port has been torn down.
    #[error("port closed")]
    Closed,
}

impl Error {
    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Check if this is a closed-port error.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
