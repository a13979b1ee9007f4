//! Per-peer staleness tracking.

use parking_lot::RwLock;
use std::collections::HashSet;

/// Records, per remote peer, whether that peer's last known view of a
/// holder's subtree is stale.
///
/// A peer needs an update until it has been sent a refresh; a peer
/// the tracker has never seen therefore needs one. Clearing is
/// peer-local: refreshing one peer does not affect any other.
/// [`UpdateStatus::mark_changed`] is called by whichever component
/// mutates the subtree and invalidates every peer's view at once.
#[derive(Debug, Default)]
pub struct UpdateStatus {
    refreshed: RwLock<HashSet<String>>,
}

impl UpdateStatus {
    /// Creates a tracker with no refreshed peers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true until `peer` has been sent a refresh.
    pub fn needs_update(&self, peer: &str) -> bool {
        !self.refreshed.read().contains(peer)
    }

    /// Records that `peer` has been sent the current state. Affects
    /// that peer only.
    pub fn mark_refreshed(&self, peer: &str) {
        self.refreshed.write().insert(peer.to_owned());
    }

    /// Invalidates every peer's view of the subtree.
    pub fn mark_changed(&self) {
        self.refreshed.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_peer_needs_update() {
        let status = UpdateStatus::new();
        assert!(status.needs_update("10.0.0.1:4020"));
    }

    #[test]
    fn refresh_is_peer_local() {
        let status = UpdateStatus::new();
        status.mark_refreshed("10.0.0.1:4020");
        assert!(!status.needs_update("10.0.0.1:4020"));
        assert!(status.needs_update("10.0.0.2:4020"));
    }

    #[test]
    fn change_restales_every_peer() {
        let status = UpdateStatus::new();
        status.mark_refreshed("10.0.0.1:4020");
        status.mark_refreshed("10.0.0.2:4020");
        status.mark_changed();
        assert!(status.needs_update("10.0.0.1:4020"));
        assert!(status.needs_update("10.0.0.2:4020"));
    }
}
