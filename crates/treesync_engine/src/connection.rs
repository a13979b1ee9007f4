//! Connection seam between requests and the transport.

use crate::error::EngineResult;
use bytes::Bytes;
use parking_lot::Mutex;
use treesync_protocol::{Channel, WireBuf};

/// Carries a request's `handle` call through to the wire.
///
/// Framing, handshake and encryption live behind this trait and are
/// out of scope for the engine. The remote address is the peer
/// identity used by per-peer staleness tracking.
pub trait Connection: Send + Sync {
    /// The remote peer's address.
    fn remote_address(&self) -> &str;

    /// Sends one request payload on the given channel.
    fn send(&self, channel: Channel, payload: WireBuf) -> EngineResult<()>;
}

/// An in-memory connection that captures everything sent through it.
///
/// Stands in for the network transport in tests and examples.
#[derive(Debug)]
pub struct LoopbackConnection {
    remote_address: String,
    sent: Mutex<Vec<(Channel, Bytes)>>,
}

impl LoopbackConnection {
    /// Creates a loopback connection with the given peer address.
    pub fn new(remote_address: impl Into<String>) -> Self {
        Self {
            remote_address: remote_address.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Everything sent so far, in send order.
    pub fn sent(&self) -> Vec<(Channel, Bytes)> {
        self.sent.lock().clone()
    }
}

impl Connection for LoopbackConnection {
    fn remote_address(&self) -> &str {
        &self.remote_address
    }

    fn send(&self, channel: Channel, payload: WireBuf) -> EngineResult<()> {
        self.sent.lock().push((channel, payload.freeze()));
        Ok(())
    }
}
