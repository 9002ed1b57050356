//! Scoped defaults
//!
//! [`SetDefault`] and [`DictSetDefault`] hand out a value that is either
//! already stored (in an optional field or under a map key) or a supplied
//! default. Whatever the value holds when the guard goes out of scope is
//! what the owner ends up holding.
//!
//! ```rust
//! use hoard_scope::{DictSetDefault, SetDefault};
//! use std::collections::HashMap;
//!
//! struct Job {
//!     notes: Option<Vec<String>>,
//! }
//!
//! let mut job = Job { notes: None };
//! SetDefault::acquire(&mut job.notes, Vec::new()).push("queued".into());
//! assert_eq!(job.notes.as_deref(), Some(&["queued".to_string()][..]));
//!
//! let mut counts: HashMap<&str, u32> = HashMap::new();
//! {
//!     let mut hits = DictSetDefault::acquire(&mut counts, "home", 0);
//!     *hits += 2;
//! }
//! assert_eq!(counts["home"], 2);
//! ```

use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::ops::{Deref, DerefMut};

/// Map that can hand out a mutable slot for a key, inserting a default
pub trait MapSlot<K, V> {
    /// Value stored under `key`, after inserting `default` if absent
    fn slot_or_insert(&mut self, key: K, default: V) -> &mut V;
}

impl<K: Hash + Eq, V, S: BuildHasher> MapSlot<K, V> for HashMap<K, V, S> {
    fn slot_or_insert(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }
}

impl<K: Ord, V> MapSlot<K, V> for BTreeMap<K, V> {
    fn slot_or_insert(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> MapSlot<K, V> for IndexMap<K, V, S> {
    fn slot_or_insert(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }
}

impl MapSlot<String, serde_json::Value> for serde_json::Map<String, serde_json::Value> {
    fn slot_or_insert(
        &mut self,
        key: String,
        default: serde_json::Value,
    ) -> &mut serde_json::Value {
        self.entry(key).or_insert(default)
    }
}

/// Scoped default for an optional field
///
/// The field is exclusively borrowed for the guard's lifetime, so nothing
/// else can observe it before the scope ends.
#[derive(Debug)]
pub struct SetDefault<'a, T> {
    value: &'a mut T,
}

impl<'a, T> SetDefault<'a, T> {
    /// Take the field's value, or `default` if it is unset
    #[inline]
    pub fn acquire(slot: &'a mut Option<T>, default: T) -> Self {
        Self {
            value: slot.get_or_insert(default),
        }
    }

    /// Like [`SetDefault::acquire`], building the default only when needed
    #[inline]
    pub fn acquire_with(slot: &'a mut Option<T>, default: impl FnOnce() -> T) -> Self {
        Self {
            value: slot.get_or_insert_with(default),
        }
    }
}

impl<T> Deref for SetDefault<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value
    }
}

impl<T> DerefMut for SetDefault<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value
    }
}

/// Scoped default for a map key
#[derive(Debug)]
pub struct DictSetDefault<'a, V> {
    value: &'a mut V,
}

impl<'a, V> DictSetDefault<'a, V> {
    /// Take the value under `key`, or `default` if the key is absent
    #[inline]
    pub fn acquire<K, M>(map: &'a mut M, key: K, default: V) -> Self
    where
        M: MapSlot<K, V> + ?Sized,
    {
        Self {
            value: map.slot_or_insert(key, default),
        }
    }
}

impl<V> Deref for DictSetDefault<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.value
    }
}

impl<V> DerefMut for DictSetDefault<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Holder {
        items: Option<Vec<&'static str>>,
    }

    #[test]
    fn set_default_fills_unset_field() {
        let mut holder = Holder::default();
        {
            let mut items = SetDefault::acquire(&mut holder.items, Vec::new());
            items.push("something");
        }
        assert_eq!(holder.items, Some(vec!["something"]));
    }

    #[test]
    fn set_default_keeps_existing_value() {
        let mut holder = Holder {
            items: Some(vec!["old"]),
        };
        SetDefault::acquire(&mut holder.items, vec!["unused"]).push("new");
        assert_eq!(holder.items, Some(vec!["old", "new"]));
    }

    #[test]
    fn set_default_replacement_is_kept() {
        let mut slot: Option<u32> = None;
        {
            let mut value = SetDefault::acquire_with(&mut slot, || 1);
            *value = 42;
        }
        assert_eq!(slot, Some(42));
    }

    #[test]
    fn dict_set_default_writes_default_back() {
        let mut map: BTreeMap<String, Vec<i32>> = BTreeMap::new();
        DictSetDefault::acquire(&mut map, "k".to_string(), Vec::new()).push(1);
        DictSetDefault::acquire(&mut map, "k".to_string(), Vec::new()).push(2);
        assert_eq!(map["k"], vec![1, 2]);
    }

    #[test]
    fn dict_set_default_on_index_map_and_json() {
        let mut ordered: IndexMap<&str, u8> = IndexMap::new();
        *DictSetDefault::acquire(&mut ordered, "x", 7) += 1;
        assert_eq!(ordered["x"], 8);

        let mut object = serde_json::Map::new();
        *DictSetDefault::acquire(&mut object, "n".to_string(), json!(null)) = json!(5);
        assert_eq!(object["n"], json!(5));
    }
}
