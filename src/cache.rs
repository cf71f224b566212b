use crate::RResult;
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Deref};

/// Root-relative, `/`-separated path of a cached directory.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace root maps to the empty key, which is never stored.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Key of the containing directory, `None` once the root is reached.
    pub fn parent(&self) -> Option<CacheKey> {
        if self.is_root() {
            return None;
        }
        let parent = self.0.rsplit_once('/').map_or("", |(parent, _)| parent);
        Some(CacheKey(parent.to_string()))
    }
}

impl Deref for CacheKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for CacheKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CacheKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Byte totals of every memoized directory in one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheMap(FxHashMap<CacheKey, u64>);

impl CacheMap {
    pub fn get(&self, k: &str) -> Option<u64> {
        self.0.get(k).copied()
    }

    pub fn insert(&mut self, k: CacheKey, v: u64) -> Option<u64> {
        self.0.insert(k, v)
    }

    pub fn remove(&mut self, k: &str) -> Option<u64> {
        self.0.remove(k)
    }

    pub fn contains_key(&self, k: &str) -> bool {
        self.0.contains_key(k)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::collections::hash_map::Iter<CacheKey, u64> {
        self.0.iter()
    }
}

impl std::borrow::Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CacheMap {
    type Item = (&'a CacheKey, &'a u64);
    type IntoIter = std::collections::hash_map::Iter<'a, CacheKey, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CacheMap {
    type Item = (CacheKey, u64);
    type IntoIter = std::collections::hash_map::IntoIter<CacheKey, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<(CacheKey, u64)> for CacheMap {
    fn extend<T: IntoIterator<Item = (CacheKey, u64)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl<K: Into<CacheKey>> FromIterator<(K, u64)> for CacheMap {
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Whole-map storage of cache maps, one per namespace.
///
/// Both `read` and `write` are expected to be atomic for the whole map.
pub trait CacheStore: Sync + Send + fmt::Debug {
    /// `Ok(None)` when nothing was written for `namespace` yet.
    fn read(&self, namespace: &str) -> RResult<Option<CacheMap>>;
    fn write(&self, namespace: &str, map: &CacheMap) -> RResult<()>;
    fn delete(&self, namespace: &str) -> RResult<()>;
}

/// Process local store.
#[derive(Default, Debug)]
pub struct MemoryStore {
    namespaces: DashMap<String, CacheMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self, namespace: &str) -> RResult<Option<CacheMap>> {
        Ok(self.namespaces.get(namespace).map(|map| map.clone()))
    }

    fn write(&self, namespace: &str, map: &CacheMap) -> RResult<()> {
        self.namespaces.insert(namespace.to_string(), map.clone());
        Ok(())
    }

    fn delete(&self, namespace: &str) -> RResult<()> {
        self.namespaces.remove(namespace);
        Ok(())
    }
}
