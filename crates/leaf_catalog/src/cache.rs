use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{
    error::Result,
    scan::{build_catalog, CatalogEntry},
};

pub type Catalog = Arc<[CatalogEntry]>;

/// Session-scoped catalog cache keyed by root directory.
///
/// A root is scanned once and reused until it is refreshed or invalidated.
/// Failed scans are not cached.
#[derive(Debug, Default)]
pub struct CatalogCache {
    catalogs: Mutex<HashMap<PathBuf, Catalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached catalog for `root`, scanning it on first use
    pub fn get_or_build<P: AsRef<Path>>(&self, root: P) -> Result<Catalog> {
        let key = cache_key(root.as_ref());
        if let Some(catalog) = self.lock().get(&key) {
            debug!(root = %key.display(), "catalog cache hit");
            return Ok(Arc::clone(catalog));
        }

        let catalog: Catalog = build_catalog(&key)?.into();
        Ok(Arc::clone(
            self.lock().entry(key).or_insert(catalog),
        ))
    }

    /// Rescan `root` and replace whatever was cached for it
    pub fn refresh<P: AsRef<Path>>(&self, root: P) -> Result<Catalog> {
        let key = cache_key(root.as_ref());
        self.lock().remove(&key);

        let catalog: Catalog = build_catalog(&key)?.into();
        self.lock().insert(key, Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Drop the cached catalog for `root`. Returns whether one was cached.
    pub fn invalidate<P: AsRef<Path>>(&self, root: P) -> bool {
        self.lock().remove(&cache_key(root.as_ref())).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains<P: AsRef<Path>>(&self, root: P) -> bool {
        self.lock().contains_key(&cache_key(root.as_ref()))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Catalog>> {
        self.catalogs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Different spellings of the same directory share one entry.
fn cache_key(root: &Path) -> PathBuf {
    root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
}
