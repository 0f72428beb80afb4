//! Cache Group Module
//!
//! A named cache that loads missing values through peers or its loader.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::cache::{ByteView, CacheStats, CacheStore, GroupStats};
use crate::error::{CacheError, Result};
use crate::group::{Loader, PeerGetter, PeerPicker};

// == Group ==
/// A named cache namespace with its own loader and byte budget.
///
/// Lookup order for a key: local cache, then the peer picked for it (if any),
/// then the loader. Only loader results are stored locally.
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    main_cache: CacheStore,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    stats: GroupStats,
}

impl Group {
    // == Constructor ==
    /// Creates a group.
    ///
    /// # Arguments
    /// * `name` - Non-empty group name
    /// * `cache_bytes` - Byte budget of the local cache, 0 = unbounded
    /// * `loader` - Source of values on a miss
    ///
    /// # Errors
    /// Returns [`CacheError::Config`] if the name is empty or no loader is given.
    pub fn new(
        name: impl Into<String>,
        cache_bytes: usize,
        loader: Option<Arc<dyn Loader>>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CacheError::Config("group name is required".to_string()));
        }
        let loader = loader.ok_or_else(|| {
            CacheError::Config(format!("group '{}' has no loader", name))
        })?;

        Ok(Self {
            name,
            loader,
            main_cache: CacheStore::new(cache_bytes),
            peers: OnceLock::new(),
            stats: GroupStats::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Register Peers ==
    /// Attaches the peer picker. Must happen before the group serves traffic.
    ///
    /// # Errors
    /// Returns [`CacheError::Config`] on a second call; the first picker stays.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) -> Result<()> {
        self.peers.set(peers).map_err(|_| {
            CacheError::Config(format!(
                "peers registered more than once for group '{}'",
                self.name
            ))
        })?;
        info!(group = %self.name, "registered peer picker");
        Ok(())
    }

    // == Get ==
    /// Returns the value for `key`, loading it on a miss.
    ///
    /// # Errors
    /// - [`CacheError::InvalidKey`] for an empty key, before any lookup
    /// - [`CacheError::Loader`] with the loader's own error if loading fails
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }
        self.stats.record_get();

        if let Some(value) = self.main_cache.get(key) {
            self.stats.record_hit();
            debug!(group = %self.name, key, "cache hit");
            return Ok(value);
        }

        self.load(key)
    }

    fn load(&self, key: &str) -> Result<ByteView> {
        if let Some(peer) = self.peers.get().and_then(|peers| peers.pick_peer(key)) {
            match self.get_from_peer(peer.as_ref(), key) {
                Ok(value) => {
                    self.stats.record_peer_load();
                    return Ok(value);
                }
                Err(err) => {
                    self.stats.record_peer_error();
                    warn!(group = %self.name, key, error = %err, "failed to get from peer");
                }
            }
        }

        self.get_locally(key)
    }

    fn get_locally(&self, key: &str) -> Result<ByteView> {
        let bytes = self.loader.get(key).map_err(|err| {
            self.stats.record_local_load_error();
            CacheError::Loader(err)
        })?;
        self.stats.record_local_load();
        debug!(group = %self.name, key, bytes = bytes.len(), "loaded locally");

        let value = ByteView::copy_from(&bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn get_from_peer(&self, peer: &dyn PeerGetter, key: &str) -> anyhow::Result<ByteView> {
        let bytes = peer.get(&self.name, key)?;
        Ok(ByteView::from(bytes))
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    // == Stats ==
    /// Returns a snapshot of this group's statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(
            self.main_cache.evictions(),
            self.main_cache.len(),
            self.main_cache.used_bytes(),
        )
    }

    pub fn cache_bytes(&self) -> usize {
        self.main_cache.cache_bytes()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .field("has_peers", &self.peers.get().is_some())
            .finish()
    }
}
