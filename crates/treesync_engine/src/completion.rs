//! Exactly-once completion signaling.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use treesync_protocol::{ResponseCode, WireBuf};

/// Data produced by a completed request, handed to every recipient.
#[derive(Debug, Clone)]
pub struct RequestData {
    /// Outcome reported by the peer.
    pub code: ResponseCode,
    /// Response payload.
    pub buf: WireBuf,
}

impl RequestData {
    /// Creates response data.
    pub fn new(code: ResponseCode, buf: WireBuf) -> Self {
        Self { code, buf }
    }
}

type Recipient = Box<dyn FnOnce(&RequestData) + Send>;

struct CompletionState {
    recipients: Vec<Recipient>,
    data: Option<RequestData>,
}

/// Shared completion record for one request.
///
/// The dispatching side blocks in [`Completion::wait_for`]; the I/O
/// completion context fires [`Completion::complete`] exactly once.
/// Recipients registered before completion run when it fires;
/// recipients registered after run immediately with the stored data.
/// Repeat completions are ignored, so every recipient runs exactly
/// once.
pub(crate) struct Completion {
    state: Mutex<CompletionState>,
    signal: Condvar,
}

impl Completion {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(CompletionState {
                recipients: Vec::new(),
                data: None,
            }),
            signal: Condvar::new(),
        })
    }

    pub(crate) fn add_recipient(&self, recipient: Recipient) {
        let mut state = self.state.lock();
        match &state.data {
            Some(data) => {
                let data = data.clone();
                drop(state);
                recipient(&data);
            }
            None => state.recipients.push(recipient),
        }
    }

    pub(crate) fn complete(&self, data: RequestData) {
        let mut state = self.state.lock();
        if state.data.is_some() {
            return;
        }
        let recipients = std::mem::take(&mut state.recipients);
        state.data = Some(data.clone());
        drop(state);
        for recipient in recipients {
            recipient(&data);
        }
        self.signal.notify_all();
    }

    /// Blocks until the completion fires; returns false on timeout.
    pub(crate) fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.data.is_none() {
            if self.signal.wait_until(&mut state, deadline).timed_out() {
                return state.data.is_some();
            }
        }
        true
    }
}

/// Cloneable handle used by the I/O completion context to finish a
/// request after its [`crate::DataRequest`] has moved into a chain.
#[derive(Clone)]
pub struct CompletionHandle {
    inner: Arc<Completion>,
}

impl CompletionHandle {
    pub(crate) fn new(inner: Arc<Completion>) -> Self {
        Self { inner }
    }

    /// Completes the request with the produced data. Only the first
    /// call has any effect.
    pub fn complete(&self, data: RequestData) {
        self.inner.complete(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn data() -> RequestData {
        RequestData::new(ResponseCode::Success, WireBuf::new())
    }

    #[test]
    fn recipients_fire_exactly_once() {
        let completion = Completion::new();
        let fired = Arc::new(AtomicU32::new(0));

        let counter = Arc::clone(&fired);
        completion.add_recipient(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        completion.complete(data());
        completion.complete(data());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_recipient_runs_immediately() {
        let completion = Completion::new();
        completion.complete(data());

        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        completion.add_recipient(Box::new(move |d| {
            assert_eq!(d.code, ResponseCode::Success);
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wait_times_out_without_completion() {
        let completion = Completion::new();
        assert!(!completion.wait_for(Duration::from_millis(10)));
    }

    #[test]
    fn wait_observes_completion_from_another_thread() {
        let completion = Completion::new();
        let remote = Arc::clone(&completion);
        let worker = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(5));
            remote.complete(data());
        });
        assert!(completion.wait_for(Duration::from_secs(5)));
        worker.join().unwrap();
    }
}
