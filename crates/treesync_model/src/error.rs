//! Error types for the data model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ResolveError>;

/// Errors raised during selector resolution.
///
/// Callers must treat a failed resolution as "nothing usable for this
/// selector" and decide per call site whether that is fatal. Malformed
/// buffer input never reaches this type; it is recovered locally by
/// enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A single-name lookup missed in its holder.
    #[error("name {name:?} not found in holder {holder:?}")]
    NameNotFound {
        /// The name that missed.
        name: String,
        /// Identifier of the holder searched.
        holder: String,
    },
}
