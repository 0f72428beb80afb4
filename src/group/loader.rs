//! Loader Module
//!
//! The capability a group uses to produce values for uncached keys.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context};
use tracing::debug;

// == Loader Trait ==
/// Produces the value for a key that is not cached.
///
/// Invoked synchronously and possibly concurrently, including for the same
/// key, since groups do not deduplicate in-flight loads.
pub trait Loader: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

// == Loader Fn ==
/// Adapts a plain function or closure into a [`Loader`].
pub struct LoaderFn<F>(pub F);

impl<F> LoaderFn<F>
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Loader for LoaderFn<F>
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        (self.0)(key)
    }
}

// == Dir Loader ==
/// Loads `root/<key>` from disk.
///
/// Keys are relative paths; anything that would escape `root` is rejected.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(key);
        let all_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !all_normal || relative.components().next().is_none() {
            bail!("key '{}' does not name a file below the data directory", key);
        }
        Ok(self.root.join(relative))
    }
}

impl Loader for DirLoader {
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(key)?;
        debug!(path = %path.display(), "reading value from disk");
        fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "group_cache_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loader_fn_invokes_closure() {
        let calls = AtomicUsize::new(0);
        let loader = LoaderFn::new(|key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(key.to_uppercase().into_bytes())
        });

        assert_eq!(loader.get("abc").unwrap(), b"ABC");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_loader_fn_propagates_error() {
        let loader = LoaderFn::new(|key: &str| anyhow::bail!("{} not exist", key));
        let err = loader.get("unknown").unwrap_err();
        assert_eq!(err.to_string(), "unknown not exist");
    }

    #[test]
    fn test_dir_loader_reads_file() {
        let dir = scratch_dir("reads");
        fs::create_dir_all(dir.join("css")).unwrap();
        fs::write(dir.join("css/site.css"), b"body{}").unwrap();

        let loader = DirLoader::new(&dir);
        assert_eq!(loader.get("css/site.css").unwrap(), b"body{}");
        assert_eq!(loader.root(), dir.as_path());
    }

    #[test]
    fn test_dir_loader_missing_file() {
        let loader = DirLoader::new(scratch_dir("missing"));
        let err = loader.get("nope.txt").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_dir_loader_rejects_escaping_keys() {
        let loader = DirLoader::new(scratch_dir("escape"));

        assert!(loader.get("../etc/passwd").is_err());
        assert!(loader.get("/etc/passwd").is_err());
        assert!(loader.get("a/../../b").is_err());
        assert!(loader.get(".").is_err());
    }
}
