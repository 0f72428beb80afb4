//! Cache Statistics Module
//!
//! Tracks per-group lookup, load and eviction counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Group Stats ==
/// Lock-free counters updated by a group on every request.
#[derive(Debug, Default)]
pub struct GroupStats {
    gets: AtomicU64,
    hits: AtomicU64,
    peer_loads: AtomicU64,
    peer_errors: AtomicU64,
    local_loads: AtomicU64,
    local_load_errors: AtomicU64,
}

impl GroupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_load(&self) {
        self.peer_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_peer_error(&self) {
        self.peer_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_load(&self) {
        self.local_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_load_error(&self) {
        self.local_load_errors.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Copies the counters into a serializable snapshot.
    ///
    /// `evictions`, `entries` and `used_bytes` come from the group's cache store.
    pub fn snapshot(&self, evictions: u64, entries: usize, used_bytes: usize) -> CacheStats {
        let gets = self.gets.load(Ordering::Relaxed);
        let hits = self.hits.load(Ordering::Relaxed);
        CacheStats {
            gets,
            hits,
            misses: gets.saturating_sub(hits),
            peer_loads: self.peer_loads.load(Ordering::Relaxed),
            peer_errors: self.peer_errors.load(Ordering::Relaxed),
            local_loads: self.local_loads.load(Ordering::Relaxed),
            local_load_errors: self.local_load_errors.load(Ordering::Relaxed),
            evictions,
            entries,
            used_bytes,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of a group's statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups with a non-empty key
    pub gets: u64,
    /// Lookups answered by the local cache
    pub hits: u64,
    /// Lookups that had to load
    pub misses: u64,
    /// Values fetched from a peer
    pub peer_loads: u64,
    /// Failed peer fetches
    pub peer_errors: u64,
    /// Successful loader invocations
    pub local_loads: u64,
    /// Failed loader invocations
    pub local_load_errors: u64,
    /// Entries evicted from the local cache
    pub evictions: u64,
    /// Entries currently resident
    pub entries: usize,
    /// Bytes currently resident (keys + values)
    pub used_bytes: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Returns hits / gets, or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        if self.gets == 0 {
            0.0
        } else {
            self.hits as f64 / self.gets as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = GroupStats::new().snapshot(0, 0, 0);
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let counters = GroupStats::new();
        counters.record_get();
        counters.record_get();
        counters.record_hit();

        let stats = counters.snapshot(0, 1, 10);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.used_bytes, 10);
    }

    #[test]
    fn test_load_counters() {
        let counters = GroupStats::new();
        counters.record_peer_load();
        counters.record_peer_error();
        counters.record_peer_error();
        counters.record_local_load();
        counters.record_local_load_error();

        let stats = counters.snapshot(7, 0, 0);
        assert_eq!(stats.peer_loads, 1);
        assert_eq!(stats.peer_errors, 2);
        assert_eq!(stats.local_loads, 1);
        assert_eq!(stats.local_load_errors, 1);
        assert_eq!(stats.evictions, 7);
    }
}
