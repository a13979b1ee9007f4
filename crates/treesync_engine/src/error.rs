//! Error types for the request engine.

use std::time::Duration;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while dispatching requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The connection refused or failed to carry a request.
    #[error("connection error: {0}")]
    Connection(String),

    /// A dispatched request's completion signal never arrived.
    #[error("request {request_id} did not complete within {waited:?}")]
    CompletionTimeout {
        /// Ordering key of the stalled request.
        request_id: u64,
        /// How long the chain waited.
        waited: Duration,
    },
}
