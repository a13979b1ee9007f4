//! # TreeSync Model
//!
//! Shared hierarchical data model and selector resolution for TreeSync.
//!
//! This crate provides:
//! - `DataObject` leaf values and `DataHolder` containers
//! - Per-peer staleness tracking (`UpdateStatus`)
//! - Selector resolution (`resolve`) over the tree, including the
//!   `*` (all children) and `*u` (changed-only) wildcards
//!
//! ## Key Invariants
//!
//! - Child names are unique within one holder
//! - Ownership is strictly hierarchical: parents own children, the
//!   tree is acyclic and carries no back-references
//! - Mutations are serialized per holder; one `resolve` call observes
//!   a consistent snapshot of each holder it visits
//! - Resolution degrades to enumeration on malformed selector input
//!   rather than failing the sync cycle

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod holder;
mod object;
mod resolver;
mod status;

pub use error::{ModelResult, ResolveError};
pub use holder::{DataHolder, DataNode};
pub use object::DataObject;
pub use resolver::{resolve, HolderWrapper, ResolvedObject};
pub use status::UpdateStatus;
