//! Group Cache - A memory-bounded object cache
//!
//! Provides named cache groups with byte-budgeted LRU eviction, pluggable
//! value loaders and optional delegation to remote peers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ByteView;
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{DirLoader, Group, Loader, LoaderFn, PeerGetter, PeerPicker, Registry};
pub use tasks::spawn_stats_reporter;
