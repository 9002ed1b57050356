//! Overwrite-guarded map
//!
//! Provides [`NoClobberMap`], an insertion-ordered map meant for accumulating
//! partial results from several sources. Every insertion path is fallible:
//! writing a different value under an existing key is refused with a
//! [`KeyClobberError`], while writing an equal value is a no-op.
//!
//! The map is single-owner. Reading it while another thread writes is ruled
//! out by the borrow checker, not by internal locking.

use crate::error::KeyClobberError;
use indexmap::{IndexMap, IndexSet};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

/// Insertion-ordered map that refuses silent overwrites
///
/// # Invariant
/// Once a key holds value `v`, no call may replace it with `v2 != v`.
/// Bulk updates are all-or-nothing: the full conflict set is computed before
/// anything is written.
#[derive(Clone)]
pub struct NoClobberMap<K, V> {
    inner: IndexMap<K, V>,
}

impl<K, V> NoClobberMap<K, V> {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Create empty map with room for `capacity` entries
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: IndexMap::with_capacity(capacity),
        }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if map is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate entries in insertion order
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.inner.iter()
    }

    /// Iterate keys in insertion order
    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.inner.keys()
    }

    /// Iterate values in insertion order
    #[inline]
    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.inner.values()
    }

    /// Borrow the underlying map
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &IndexMap<K, V> {
        &self.inner
    }

    /// Unwrap into the underlying map, dropping the guard
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> IndexMap<K, V> {
        self.inner
    }
}

impl<K: Hash + Eq, V> NoClobberMap<K, V> {
    /// Get value stored under `key`
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.get(key)
    }

    /// Check if `key` is present
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.contains_key(key)
    }

    /// Remove `key`, returning its value
    ///
    /// Removal is never a clobber; the key may be set again afterwards with
    /// any value. Order of the remaining entries is preserved.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.shift_remove(key)
    }
}

impl<K, V> NoClobberMap<K, V>
where
    K: Hash + Eq + Clone,
    V: PartialEq + Clone,
{
    /// Assign `value` to `key`
    ///
    /// # Errors
    /// Returns [`KeyClobberError`] naming `key` if it already holds a value
    /// that differs from `value`. The map is left untouched in that case.
    pub fn set(&mut self, key: K, value: V) -> Result<(), KeyClobberError<K, V>> {
        match self.inner.get(&key) {
            None => {
                self.inner.insert(key, value);
                Ok(())
            }
            Some(existing) if *existing == value => Ok(()),
            Some(_) => {
                tracing::debug!(len = self.inner.len(), "refusing to clobber key");
                Err(self.clobber_error(vec![key]))
            }
        }
    }

    /// Merge every entry of `other` into the map
    ///
    /// # Errors
    /// Returns [`KeyClobberError`] listing every key of `other` whose value
    /// differs from the stored one. Nothing is merged in that case.
    pub fn update<I>(&mut self, other: I) -> Result<(), KeyClobberError<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.update_with(other, std::iter::empty())
    }

    /// Merge `other` plus keyword-style `extras` into the map
    ///
    /// Both sources are checked as one batch. A key supplied twice in the
    /// batch with different values counts as a conflict, as does any key
    /// whose incoming value differs from the stored one.
    ///
    /// # Errors
    /// Returns [`KeyClobberError`] with the complete conflict set. Nothing is
    /// merged in that case.
    pub fn update_with<I, E>(&mut self, other: I, extras: E) -> Result<(), KeyClobberError<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
        E: IntoIterator<Item = (K, V)>,
    {
        let mut incoming: IndexMap<K, V> = IndexMap::new();
        let mut conflicts: IndexSet<K> = IndexSet::new();

        for (key, value) in other.into_iter().chain(extras) {
            match incoming.get(&key) {
                None => {
                    incoming.insert(key, value);
                }
                Some(previous) if *previous == value => {}
                Some(_) => {
                    conflicts.insert(key);
                }
            }
        }

        for (key, value) in &incoming {
            if let Some(existing) = self.inner.get(key) {
                if existing != value {
                    conflicts.insert(key.clone());
                }
            }
        }

        if !conflicts.is_empty() {
            tracing::debug!(
                conflicts = conflicts.len(),
                incoming = incoming.len(),
                "refusing bulk update"
            );
            return Err(self.clobber_error(conflicts.into_iter().collect()));
        }

        tracing::trace!(incoming = incoming.len(), "applying bulk update");
        self.inner.extend(incoming);
        Ok(())
    }

    /// Build a map from `(key, value)` pairs, refusing conflicting duplicates
    ///
    /// # Errors
    /// Returns [`KeyClobberError`] if the same key appears with two different
    /// values.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, KeyClobberError<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.update(iter)?;
        Ok(map)
    }

    fn clobber_error(&self, keys: Vec<K>) -> KeyClobberError<K, V> {
        KeyClobberError::new(keys, self.inner.clone())
    }
}

impl<K, V> Default for NoClobberMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NoClobberMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for NoClobberMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Hash + Eq, V: Eq> Eq for NoClobberMap<K, V> {}

impl<K, V, Q> Index<&Q> for NoClobberMap<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        &self.inner[key]
    }
}

impl<K, V> From<IndexMap<K, V>> for NoClobberMap<K, V> {
    fn from(inner: IndexMap<K, V>) -> Self {
        Self { inner }
    }
}

impl<K: Hash + Eq, V> From<HashMap<K, V>> for NoClobberMap<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        Self {
            inner: map.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for NoClobberMap<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a NoClobberMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
