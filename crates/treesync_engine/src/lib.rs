//! # TreeSync Engine
//!
//! Request pipeline and chain execution for TreeSync.
//!
//! This crate provides:
//! - The `Request` unit of protocol work and the `Connection` seam
//! - `DataRequest` with exactly-once completion recipients
//! - `RequestChain` for strictly ordered, one-at-a-time draining
//! - Blocking completion signaling with a configurable timeout
//!
//! ## Architecture
//!
//! One control flow drives a chain; completion of each request is
//! signaled from elsewhere (an I/O completion context). The chain
//! blocks between dispatching a request and observing its completion,
//! so completion of request *N* is always observed strictly before
//! request *N+1* is dispatched.
//!
//! ## Key Invariants
//!
//! - Ordering keys are assigned at enqueue time and never reused
//! - Recipients fire exactly once per request
//! - A member's dispatch failure is logged, never escalated; a
//!   drained chain reports success
//! - A request that never completes surfaces a timeout instead of
//!   stalling the chain forever

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod completion;
mod config;
mod connection;
mod data_request;
mod error;
mod request;

pub use chain::RequestChain;
pub use completion::{CompletionHandle, RequestData};
pub use config::ChainConfig;
pub use connection::{Connection, LoopbackConnection};
pub use data_request::DataRequest;
pub use error::{EngineError, EngineResult};
pub use request::{Request, ShutdownRequest};
