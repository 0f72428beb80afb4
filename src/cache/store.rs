//! Cache Store Module
//!
//! Thread-safe wrapper serializing all access to one LRU cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{ByteView, LruCache, OnEvicted};

// == Cache Store ==
/// Byte-bounded LRU cache behind a single mutex.
///
/// Lookups take the same exclusive lock as inserts because a hit reorders
/// recency. The underlying [`LruCache`] is allocated on the first `add`.
#[derive(Debug)]
pub struct CacheStore {
    lru: Mutex<Option<LruCache<ByteView>>>,
    /// Byte budget handed to the LRU cache, 0 = unbounded
    cache_bytes: usize,
    /// Entries evicted so far
    evictions: Arc<AtomicU64>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. No backing structures exist until the first add.
    ///
    /// # Arguments
    /// * `cache_bytes` - Maximum resident bytes (keys + values), 0 = unbounded
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            lru: Mutex::new(None),
            cache_bytes,
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    // == Add ==
    /// Stores a value, evicting least recently used entries as needed.
    pub fn add(&self, key: &str, value: ByteView) {
        let mut guard = self.lru.lock();
        let lru = guard.get_or_insert_with(|| {
            let evictions = Arc::clone(&self.evictions);
            let on_evicted: OnEvicted<ByteView> = Box::new(move |key, value| {
                evictions.fetch_add(1, Ordering::Relaxed);
                debug!(key, bytes = value.len(), "evicted entry");
            });
            LruCache::new(self.cache_bytes, Some(on_evicted))
        });
        lru.add(key, value);
    }

    // == Get ==
    /// Retrieves a value by key, marking it most recently used.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.lru.lock();
        guard.as_mut()?.get(key).cloned()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns resident bytes (keys + values).
    pub fn used_bytes(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruCache::used_bytes)
    }

    pub fn cache_bytes(&self) -> usize {
        self.cache_bytes
    }

    /// Returns the number of entries evicted so far.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// True once the first add has allocated the LRU cache.
    pub fn is_allocated(&self) -> bool {
        self.lru.lock().is_some()
    }
}
