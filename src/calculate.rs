use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use crate::fs::EntryKind;
use crate::log::color;
use crate::normalize::clean_path;
use crate::{CacheKey, CacheMap, Dirsize};

#[derive(Debug)]
enum Lookup {
    Found(u64),
    /// Missing, not a directory, unreadable or excluded.
    Absent,
    Walk(Frame),
}

/// A directory whose files are summed and whose subdirectories are still
/// being measured.
#[derive(Debug)]
struct Frame {
    /// `None` for the root and for paths outside of it; neither is memoized.
    key: Option<CacheKey>,
    total: u64,
    pending: Vec<PathBuf>,
}

impl Dirsize {
    /// Total byte size of the regular files below `path`.
    ///
    /// Returns `None` when `path` does not exist, is not a directory, is
    /// excluded, or the walk ran past `max_duration`. A subdirectory that
    /// vanishes during the walk counts as zero instead of failing the whole
    /// computation.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn size(&self, path: &Path) -> Option<u64> {
        let path = clean_path(path);
        if let Some(size) = self.overridden(&path) {
            return Some(size);
        }

        let cached = self.read_map();
        let frame = match self.visit(&path, &cached) {
            Lookup::Found(size) => return Some(size),
            Lookup::Absent => return None,
            Lookup::Walk(frame) => frame,
        };

        let mut computed = CacheMap::default();
        let result = self.walk(frame, &cached, &mut computed);
        if !computed.is_empty() {
            self.store_computed(computed);
        }
        result
    }

    fn overridden(&self, path: &Path) -> Option<u64> {
        let size = self.options.hook.as_ref()?.evaluate(path)?;
        tracing::debug!(
            "Override {} -> {}",
            color::cyan(&path.display()),
            color::bold(&size)
        );
        Some(size)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.options.exclude.iter().any(|excluded| excluded == path)
    }

    fn visit(&self, path: &Path, cached: &CacheMap) -> Lookup {
        let key = self.cache_key(path).filter(|key| !key.is_root());
        if let Some(key) = key.as_ref() {
            if let Some(size) = cached.get(key) {
                tracing::debug!("Cache hit {} = {size}", color::green(key));
                return Lookup::Found(size);
            }
        }
        if self.is_excluded(path) {
            return Lookup::Absent;
        }

        let entries = match self.fs.stat(path) {
            Ok(stat) if stat.kind == EntryKind::Directory => self.fs.read_directory(path),
            _ => return Lookup::Absent,
        };
        let Ok(entries) = entries else {
            return Lookup::Absent;
        };

        let mut total = 0u64;
        let mut pending = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::File => total = total.saturating_add(entry.len),
                EntryKind::Directory => pending.push(path.join(&entry.name)),
                EntryKind::Other => {}
            }
        }
        Lookup::Walk(Frame { key, total, pending })
    }

    /// Depth first over an explicit stack, so deep trees cannot exhaust the
    /// call stack. Every finished frame lands in `computed`.
    fn walk(&self, frame: Frame, cached: &CacheMap, computed: &mut CacheMap) -> Option<u64> {
        let deadline = self
            .options
            .max_duration
            .map(|duration| Instant::now() + duration);
        let mut stack = vec![frame];

        while let Some(top) = stack.last_mut() {
            if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
                tracing::debug!("{}", color::red(&"Deadline exceeded, give up walking"));
                return None;
            }

            if let Some(child) = top.pending.pop() {
                let lookup = match self.overridden(&child) {
                    Some(size) => Lookup::Found(size),
                    None => self.visit(&child, cached),
                };
                match lookup {
                    Lookup::Found(size) => top.total = top.total.saturating_add(size),
                    // vanished mid-walk or excluded
                    Lookup::Absent => {}
                    Lookup::Walk(frame) => stack.push(frame),
                }
                continue;
            }

            let total = top.total;
            if let Some(key) = top.key.take() {
                tracing::debug!("Store {} = {total}", color::cyan(&key));
                computed.insert(key, total);
            }
            stack.pop();
            match stack.last_mut() {
                Some(parent) => parent.total = parent.total.saturating_add(total),
                None => return Some(total),
            }
        }
        None
    }

    /// Merge into the latest map so entries removed by a concurrent
    /// `invalidate` of other directories stay removed.
    fn store_computed(&self, computed: CacheMap) {
        let mut latest = self.read_map();
        latest.extend(computed);
        self.write_map(&latest);
    }
}
