//! Error types for guarded maps

use indexmap::IndexMap;
use std::hash::Hash;

/// A write would have replaced an existing value with a different one
///
/// This is the map's "key error" for conflicting writes. It is always
/// returned before the offending call mutates anything, and it carries the
/// complete conflict set of that call together with a snapshot of the map
/// as it stood when the write was refused.
#[derive(Debug, Clone, thiserror::Error)]
#[error("can't overwrite keys {keys:?} in {current:?}")]
pub struct KeyClobberError<K, V> {
    keys: Vec<K>,
    current: IndexMap<K, V>,
}

impl<K, V> KeyClobberError<K, V> {
    /// Create error for the given conflicting keys and map snapshot
    #[inline]
    #[must_use]
    pub fn new(keys: Vec<K>, current: IndexMap<K, V>) -> Self {
        Self { keys, current }
    }

    /// Keys whose incoming value differed from the stored one
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Map contents at the time the write was refused
    #[inline]
    #[must_use]
    pub fn current(&self) -> &IndexMap<K, V> {
        &self.current
    }

    /// Consume the error, keeping only the conflicting keys
    #[inline]
    #[must_use]
    pub fn into_keys(self) -> Vec<K> {
        self.keys
    }
}

impl<K: Hash + Eq, V> KeyClobberError<K, V> {
    /// Whether `key` is part of the conflict set
    #[must_use]
    pub fn conflicts_on(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Value that was already stored under a conflicting key
    #[must_use]
    pub fn existing(&self, key: &K) -> Option<&V> {
        self.current.get(key)
    }
}
