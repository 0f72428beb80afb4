//! Group Module
//!
//! Named cache groups, the capabilities they consume, and the registry
//! that owns them.

mod cache_group;
mod loader;
mod peers;
mod registry;

pub use cache_group::Group;
pub use loader::{DirLoader, Loader, LoaderFn};
pub use peers::{PeerGetter, PeerPicker};
pub use registry::Registry;
