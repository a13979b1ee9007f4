//! The unit of protocol work.

use crate::connection::Connection;
use crate::error::EngineResult;
use treesync_protocol::{Channel, WireBuf};

/// One unit of protocol work executed against a connection.
pub trait Request: Send {
    /// Dispatches the request over the connection. Failure here means
    /// the dispatch itself failed; completion of the work is signaled
    /// separately for requests that have one.
    fn handle(&mut self, conn: &dyn Connection) -> EngineResult<()>;
}

/// Terminal request asking the peer for an orderly shutdown.
///
/// Sent on [`Channel::Unknown`] with an empty body; typically
/// installed as a chain's terminal request via
/// [`crate::RequestChain::add_last`].
#[derive(Debug, Default)]
pub struct ShutdownRequest;

impl ShutdownRequest {
    /// Creates a shutdown request.
    pub fn new() -> Self {
        Self
    }
}

impl Request for ShutdownRequest {
    fn handle(&mut self, conn: &dyn Connection) -> EngineResult<()> {
        let mut buf = WireBuf::new();
        buf.write_byte(Channel::Unknown.to_byte());
        conn.send(Channel::Unknown, buf)
    }
}
