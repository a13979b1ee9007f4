//! Ordered request chains.

use crate::config::ChainConfig;
use crate::connection::Connection;
use crate::data_request::DataRequest;
use crate::error::{EngineError, EngineResult};
use crate::request::Request;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// An ordered sequence of [`DataRequest`]s drained one at a time over
/// a single connection, plus at most one terminal request.
///
/// Each appended request gets the next ordering key; draining always
/// takes the lowest key, so execution is FIFO. The chain does not
/// dispatch request *N+1* until request *N*'s completion has been
/// observed, even though completions arrive from another execution
/// context. A member's dispatch failure is logged and the chain moves
/// on (after still waiting for that member's completion); a drained
/// chain reports success regardless of member failures, so per-member
/// outcomes must be observed through recipients or logging.
///
/// The chain is itself a [`Request`] and can be nested or run
/// standalone.
pub struct RequestChain {
    config: ChainConfig,
    pending: BinaryHeap<PendingEntry>,
    outstanding: Arc<AtomicU64>,
    terminal: Option<Box<dyn Request>>,
    next_id: u64,
}

impl RequestChain {
    /// Creates an empty chain with default configuration.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Creates an empty chain.
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            config,
            pending: BinaryHeap::new(),
            outstanding: Arc::new(AtomicU64::new(0)),
            terminal: None,
            next_id: 0,
        }
    }

    /// Appends a request, assigning it the next ordering key.
    pub fn add(&mut self, mut request: DataRequest) -> &mut Self {
        self.next_id += 1;
        request.set_internal_id(self.next_id);
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.pending.push(PendingEntry(request));
        self
    }

    /// Sets the terminal request, run once after the chain drains.
    pub fn add_last(&mut self, request: impl Request + 'static) -> &mut Self {
        self.terminal = Some(Box::new(request));
        self
    }

    /// Requests still awaiting completion.
    pub fn outstanding(&self) -> u64 {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Returns true when no requests are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for RequestChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Request for RequestChain {
    fn handle(&mut self, conn: &dyn Connection) -> EngineResult<()> {
        while let Some(PendingEntry(mut request)) = self.pending.pop() {
            let id = request.internal_id();
            let outstanding = Arc::clone(&self.outstanding);
            request.add_recipient(move |_| {
                outstanding.fetch_sub(1, Ordering::SeqCst);
                debug!(request_id = id, "request finished");
            });

            let completion = request.completion();
            if let Err(err) = request.handle(conn) {
                error!(request_id = id, %err, "request dispatch failed");
            }

            // Suspension point: the next request is not dispatched
            // until this one's completion has been observed.
            if !completion.wait_for(self.config.request_timeout) {
                return Err(EngineError::CompletionTimeout {
                    request_id: id,
                    waited: self.config.request_timeout,
                });
            }
        }

        info!(peer = conn.remote_address(), "request chain drained");
        if let Some(mut terminal) = self.terminal.take() {
            if let Err(err) = terminal.handle(conn) {
                error!(%err, "terminal request failed");
            }
        }
        Ok(())
    }
}

/// Min-heap entry ordered by ascending ordering key.
struct PendingEntry(DataRequest);

impl PartialEq for PendingEntry {
    fn eq(&self, other: &Self) -> bool {
        self.0.internal_id() == other.0.internal_id()
    }
}

impl Eq for PendingEntry {}

impl PartialOrd for PendingEntry {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingEntry {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        // Reversed: BinaryHeap is a max-heap, draining wants the
        // lowest key first.
        other.0.internal_id().cmp(&self.0.internal_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::RequestData;
    use crate::connection::LoopbackConnection;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;
    use treesync_protocol::{Channel, ResponseCode, WireBuf};

    #[test]
    fn empty_chain_still_runs_terminal_once() {
        struct CountingRequest(Arc<AtomicU32>);
        impl Request for CountingRequest {
            fn handle(&mut self, _conn: &dyn Connection) -> EngineResult<()> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let runs = Arc::new(AtomicU32::new(0));
        let mut chain = RequestChain::new();
        chain.add_last(CountingRequest(Arc::clone(&runs)));

        let conn = LoopbackConnection::new("10.0.0.1:4020");
        chain.handle(&conn).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        // The terminal request is consumed; draining again does not
        // rerun it.
        chain.handle(&conn).unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn keys_are_assigned_in_append_order() {
        let mut chain = RequestChain::new();
        chain.add(DataRequest::new(Channel::GetData, |_| {}));
        chain.add(DataRequest::new(Channel::GetData, |_| {}));
        assert_eq!(chain.outstanding(), 2);

        let first = chain.pending.pop().unwrap().0;
        let second = chain.pending.pop().unwrap().0;
        assert_eq!(first.internal_id(), 1);
        assert_eq!(second.internal_id(), 2);
    }

    #[test]
    fn never_completing_request_times_out() {
        let mut chain =
            RequestChain::with_config(ChainConfig::default().with_request_timeout(
                Duration::from_millis(10),
            ));
        chain.add(DataRequest::new(Channel::GetData, |_| {}));

        let conn = LoopbackConnection::new("10.0.0.1:4020");
        let err = chain.handle(&conn).unwrap_err();
        assert_eq!(
            err,
            EngineError::CompletionTimeout {
                request_id: 1,
                waited: Duration::from_millis(10),
            }
        );
    }

    #[test]
    fn pre_completed_request_drains_immediately() {
        let mut chain = RequestChain::new();
        let request = DataRequest::new(Channel::CheckData, |_| {});
        let handle = request.completion_handle();
        chain.add(request);
        handle.complete(RequestData::new(ResponseCode::Success, WireBuf::new()));

        let conn = LoopbackConnection::new("10.0.0.1:4020");
        chain.handle(&conn).unwrap();
        assert_eq!(chain.outstanding(), 0);
    }
}
