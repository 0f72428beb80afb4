//! Cache Module
//!
//! Provides the byte-bounded LRU eviction engine, its thread-safe wrapper
//! and the immutable value type stored in it.

mod byteview;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use byteview::ByteView;
pub use lru::{LruCache, OnEvicted, Value};
pub use stats::{CacheStats, GroupStats};
pub use store::CacheStore;
