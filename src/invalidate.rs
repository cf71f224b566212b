use std::path::Path;

use crate::log::color;
use crate::normalize::clean_path;
use crate::Dirsize;

impl Dirsize {
    /// Drop the cached size of the directory touched by a write to `path`
    /// and of every ancestor below the root.
    ///
    /// `path` may be a directory, a file, or something that no longer
    /// exists. The walk starts at `path` itself: a file never has a key, so
    /// the first entry removed is the containing directory's. Unlike a walk
    /// that starts at the parent of anything that is not an existing
    /// directory, a directory deleted before this call loses its own stale
    /// entry too. The root itself is never a key and paths outside of it
    /// are ignored.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn invalidate(&self, path: &Path) {
        let path = clean_path(path);
        if !path.starts_with(&self.root) {
            tracing::debug!("{} is outside of the root", color::red(&path.display()));
            return;
        }

        let mut map = match self.store.read(self.namespace()) {
            Ok(Some(map)) => map,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(
                    "Read cache '{}' failed, nothing invalidated: {error}",
                    self.namespace()
                );
                return;
            }
        };

        let mut removed = 0;
        for dir in path.ancestors().take_while(|dir| *dir != self.root.as_path()) {
            // below a name without a key nothing is memoized, but the
            // ancestors above it are
            let Some(key) = self.cache_key(dir) else {
                continue;
            };
            if map.remove(&key).is_some() {
                tracing::debug!("Remove {}", color::cyan(&key));
                removed += 1;
            }
        }
        if removed > 0 {
            self.write_map(&map);
        }
    }
}
