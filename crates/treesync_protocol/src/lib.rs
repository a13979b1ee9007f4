//! # TreeSync Protocol
//!
//! Wire-level protocol primitives for TreeSync.
//!
//! This crate provides:
//! - `ByteValue` for tags that serialize to exactly one byte
//! - `ResponseCode` for protocol outcomes
//! - `Channel` for command identifiers
//! - `BitField` for packed flag sets
//! - `WireBuf` for reading and writing length-prefixed wire data
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod bitfield;
mod byte_value;
mod channel;
mod error;
mod response;
mod wirebuf;

pub use bitfield::BitField;
pub use byte_value::ByteValue;
pub use channel::Channel;
pub use error::{BufError, ProtocolResult};
pub use response::ResponseCode;
pub use wirebuf::WireBuf;
