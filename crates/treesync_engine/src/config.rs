//! Configuration for chain execution.

use std::time::Duration;

/// Configuration for a [`crate::RequestChain`].
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// How long the chain waits for one request's completion signal
    /// before giving up. A request that never completes would
    /// otherwise stall the chain indefinitely.
    pub request_timeout: Duration,
}

impl ChainConfig {
    /// Sets the per-request completion timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}
