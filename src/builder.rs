use std::sync::Arc;

use crate::fs::{FileSystem, FS};
use crate::normalize::clean_path;
use crate::{log, Dirsize, MemoryStore, Options};

#[derive(Debug)]
pub struct DirsizeBuilder {
    fs: Box<dyn FileSystem>,
}

impl Default for DirsizeBuilder {
    fn default() -> Self {
        Self::new(Box::<FS>::default())
    }
}

impl DirsizeBuilder {
    pub fn new(fs: Box<dyn FileSystem>) -> Self {
        DirsizeBuilder { fs }
    }

    pub fn build(self, options: Options) -> Dirsize {
        log::enable_by_env();

        let store = if let Some(external_store) = options.external_store.as_ref() {
            external_store.clone()
        } else {
            Arc::new(MemoryStore::default())
        };

        let root = clean_path(&options.root);
        let exclude = options.exclude.iter().map(|path| clean_path(path)).collect();
        let options = Options { root: root.clone(), exclude, ..options };
        Dirsize { options, root, store, fs: self.fs }
    }
}
