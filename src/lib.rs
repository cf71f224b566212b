//! # dirsize_cache
//!
//! Total byte size of a directory tree, memoized per directory.
//!
//! Every directory measured below the namespace root keeps its total in a
//! [`CacheMap`] keyed by its root-relative path. A write below the root
//! must be followed by [`Dirsize::invalidate`], which drops the entries of
//! the written directory and all its ancestors, so the next
//! [`Dirsize::size`] only re-walks what changed.
//!
//! ## How to use?
//!
//! ```rust
//! // |-- uploads
//! // |---- 2
//! // |------ 1
//! // |-------- file.dummy
//!
//! use dirsize_cache::{Dirsize, Options};
//!
//! let root = std::env::temp_dir().join("dirsize-doc-uploads");
//! # let _ = std::fs::remove_dir_all(&root);
//! std::fs::create_dir_all(root.join("2/1")).unwrap();
//! std::fs::write(root.join("2/1/file.dummy"), "12345").unwrap();
//!
//! let dirsize = Dirsize::new(Options {
//!     root: root.clone(),
//!     ..Default::default()
//! });
//!
//! assert_eq!(dirsize.size(&root.join("2")), Some(5));
//! // -> cached: "2/1" = 5, "2" = 5
//!
//! std::fs::write(root.join("2/1/other.dummy"), "123").unwrap();
//! dirsize.invalidate(&root.join("2/1/other.dummy"));
//! // -> removed: "2/1", "2"
//!
//! assert_eq!(dirsize.size(&root.join("2")), Some(8));
//! # std::fs::remove_dir_all(&root).unwrap();
//! ```
//!

mod builder;
mod cache;
mod calculate;
mod error;
pub mod fs;
mod hook;
mod invalidate;
mod log;
mod normalize;
mod options;
mod store;

pub use builder::DirsizeBuilder;
pub use cache::{CacheKey, CacheMap, CacheStore, MemoryStore};
pub use error::*;
pub use hook::{HookChain, SizeOverrideHook};
pub use normalize::{clean_path, normalize};
pub use options::{Options, DEFAULT_NAMESPACE};
pub use store::JsonFileStore;

use fs::FileSystem;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

/// Size calculator and invalidator bound to one namespace.
#[derive(Debug)]
pub struct Dirsize {
    pub options: Options,
    pub(crate) root: PathBuf,
    pub(crate) store: Arc<dyn CacheStore>,
    pub(crate) fs: Box<dyn FileSystem>,
}

pub type RResult<T> = Result<T, Error>;

impl Dirsize {
    pub fn new(options: Options) -> Self {
        DirsizeBuilder::default().build(options)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn namespace(&self) -> &str {
        &self.options.namespace
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Current cache map of this namespace. Store failures read as empty.
    pub fn cached(&self) -> CacheMap {
        self.read_map()
    }

    pub(crate) fn read_map(&self) -> CacheMap {
        match self.store.read(self.namespace()) {
            Ok(map) => map.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(
                    "Read cache '{}' failed, treat as empty: {error}",
                    self.namespace()
                );
                CacheMap::default()
            }
        }
    }

    pub(crate) fn write_map(&self, map: &CacheMap) {
        if let Err(error) = self.store.write(self.namespace(), map) {
            tracing::warn!("Write cache '{}' failed: {error}", self.namespace());
        }
    }
}
