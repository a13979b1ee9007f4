//! Error types for protocol primitives.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, BufError>;

/// Errors raised while reading from a wire buffer.
///
/// Callers that read selector expressions treat these as a signal to
/// degrade to enumeration, not as a fault to propagate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufError {
    /// The buffer held fewer bytes than the read required.
    #[error("buffer underflow: needed {needed} bytes, {remaining} remaining")]
    Underflow {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },

    /// A string field was not valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
}
