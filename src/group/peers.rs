//! Peer Capabilities
//!
//! Boundary traits for delegating a lookup to another node. Peer selection
//! and transport live outside this crate.

use std::sync::Arc;

/// Chooses the node that owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns the remote peer for `key`, or None when the key should be
    /// loaded locally.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches a value from a remote node.
///
/// Calls block the requesting thread; timeouts are the transport's concern.
pub trait PeerGetter: Send + Sync {
    fn get(&self, group: &str, key: &str) -> anyhow::Result<Vec<u8>>;
}
