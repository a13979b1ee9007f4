//! Requests that produce data.

use crate::completion::{Completion, CompletionHandle, RequestData};
use crate::connection::Connection;
use crate::error::EngineResult;
use crate::request::Request;
use std::sync::Arc;
use treesync_protocol::{Channel, WireBuf};

/// A request that, on completion, notifies its recipients with the
/// data it produced.
///
/// The channel is an opaque command tag passed through unchanged; the
/// body writer serializes the request payload at dispatch time.
/// Completion is signaled from the I/O side through a
/// [`CompletionHandle`] taken before the request moves into a chain.
///
/// # Example
///
/// ```
/// use treesync_engine::{DataRequest, LoopbackConnection, Request, RequestData};
/// use treesync_protocol::{Channel, ResponseCode, WireBuf};
///
/// let mut request = DataRequest::new(Channel::GetData, |buf| {
///     buf.write_string("players");
/// });
/// request.add_recipient(|data| {
///     assert_eq!(data.code, ResponseCode::Success);
/// });
///
/// let handle = request.completion_handle();
/// let conn = LoopbackConnection::new("10.0.0.1:4020");
/// request.handle(&conn).unwrap();
///
/// // Normally fired from the response path.
/// handle.complete(RequestData::new(ResponseCode::Success, WireBuf::new()));
/// ```
pub struct DataRequest {
    internal_id: u64,
    channel: Channel,
    body: Box<dyn FnMut(&mut WireBuf) + Send>,
    completion: Arc<Completion>,
}

impl DataRequest {
    /// Creates a request on the given channel with a body writer.
    pub fn new(channel: Channel, body: impl FnMut(&mut WireBuf) + Send + 'static) -> Self {
        Self {
            internal_id: 0,
            channel,
            body: Box::new(body),
            completion: Completion::new(),
        }
    }

    /// The request's command channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The ordering key. Zero until the request is enqueued into a
    /// chain; chains assign keys monotonically and never reuse them.
    pub fn internal_id(&self) -> u64 {
        self.internal_id
    }

    pub(crate) fn set_internal_id(&mut self, id: u64) {
        self.internal_id = id;
    }

    /// Registers a completion recipient. Each recipient is invoked
    /// exactly once with the produced data when the request finishes.
    pub fn add_recipient(&self, recipient: impl FnOnce(&RequestData) + Send + 'static) {
        self.completion.add_recipient(Box::new(recipient));
    }

    /// A handle for the I/O completion context to finish this request.
    pub fn completion_handle(&self) -> CompletionHandle {
        CompletionHandle::new(Arc::clone(&self.completion))
    }

    pub(crate) fn completion(&self) -> Arc<Completion> {
        Arc::clone(&self.completion)
    }
}

impl Request for DataRequest {
    fn handle(&mut self, conn: &dyn Connection) -> EngineResult<()> {
        let mut buf = WireBuf::new();
        buf.write_byte(self.channel.to_byte());
        (self.body)(&mut buf);
        conn.send(self.channel, buf)
    }
}

impl std::fmt::Debug for DataRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataRequest")
            .field("internal_id", &self.internal_id)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::LoopbackConnection;
    use std::sync::atomic::{AtomicU32, Ordering};
    use treesync_protocol::ResponseCode;

    #[test]
    fn dispatch_serializes_channel_and_body() {
        let conn = LoopbackConnection::new("10.0.0.1:4020");
        let mut request = DataRequest::new(Channel::GetData, |buf| {
            buf.write_string("players");
        });
        request.handle(&conn).unwrap();

        let sent = conn.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Channel::GetData);

        let mut readback = WireBuf::from_bytes(&sent[0].1);
        assert_eq!(readback.read_byte().unwrap(), Channel::GetData.to_byte());
        assert_eq!(readback.read_string().unwrap(), "players");
    }

    #[test]
    fn recipients_observe_completion_once() {
        let request = DataRequest::new(Channel::CheckData, |_| {});
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        request.add_recipient(move |data| {
            assert_eq!(data.code, ResponseCode::Success);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let handle = request.completion_handle();
        handle.complete(RequestData::new(ResponseCode::Success, WireBuf::new()));
        handle.complete(RequestData::new(ResponseCode::Unknown, WireBuf::new()));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
