use std::{path::PathBuf, sync::Arc, time::Duration};

use crate::{CacheStore, SizeOverrideHook};

pub static DEFAULT_NAMESPACE: &str = "dirsize_cache";

#[derive(Debug, Clone)]
pub struct Options {
    /// Every cache key is relative to this directory, and the ancestor walk
    /// of `invalidate` stops right before it.
    /// Default is the current directory.
    pub root: PathBuf,
    /// Scope of the cache map inside the store.
    /// Default is `"dirsize_cache"`.
    pub namespace: String,
    /// Use of store defined external, it designed to share one
    /// persisted cache between handles.
    ///
    /// - If `external_store` is `None`, use a private `MemoryStore`.
    /// - If `external_store.is_some()` is true, use this store.
    ///
    /// Default is `None`.
    pub external_store: Option<Arc<dyn CacheStore>>,
    /// Consulted before the cache for every directory.
    /// Default is `None`.
    pub hook: Option<Arc<dyn SizeOverrideHook>>,
    /// Directories that are never measured. They behave as if
    /// they did not exist.
    /// Default is `vec![]`.
    pub exclude: Vec<PathBuf>,
    /// Give up a single `size` call after this long.
    /// Default is `None`.
    pub max_duration: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        let root = std::env::current_dir().unwrap_or_default();
        let namespace = String::from(DEFAULT_NAMESPACE);
        let external_store = None;
        let hook = None;
        let exclude = vec![];
        let max_duration = None;
        Self {
            root,
            namespace,
            external_store,
            hook,
            exclude,
            max_duration,
        }
    }
}
