//! Group Registry
//!
//! Directory of named groups shared by the hosting application.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::error::{CacheError, Result};
use crate::group::{Group, Loader};

// == Registry ==
/// Maps group names to groups.
///
/// The lock guards the map only; each group synchronizes its own cache.
/// Groups are never removed.
#[derive(Debug, Default)]
pub struct Registry {
    groups: RwLock<HashMap<String, Arc<Group>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Creates a group and registers it under `name`.
    ///
    /// # Errors
    /// Returns [`CacheError::Config`] if the loader is missing, the name is
    /// empty, or a group with this name already exists.
    pub fn register(
        &self,
        name: &str,
        cache_bytes: usize,
        loader: Option<Arc<dyn Loader>>,
    ) -> Result<Arc<Group>> {
        let group = Arc::new(Group::new(name, cache_bytes, loader)?);

        let mut groups = self.groups.write();
        if groups.contains_key(name) {
            return Err(CacheError::Config(format!(
                "group '{}' is already registered",
                name
            )));
        }
        groups.insert(name.to_string(), Arc::clone(&group));
        info!(group = name, cache_bytes, "registered group");

        Ok(group)
    }

    // == Get ==
    /// Looks up a group by name.
    pub fn get(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.read().get(name).cloned()
    }

    /// Registered group names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}
