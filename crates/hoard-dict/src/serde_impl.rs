//! Serde support for [`NoClobberMap`]
//!
//! Serializes as a plain map. Deserialization routes every entry through
//! [`NoClobberMap::set`], so an input that repeats a key with a different
//! value is rejected instead of silently keeping the last one.

use crate::map::NoClobberMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

impl<K: Serialize, V: Serialize> Serialize for NoClobberMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct NoClobberVisitor<K, V> {
    marker: PhantomData<fn() -> NoClobberMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for NoClobberVisitor<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Clone + fmt::Debug,
    V: Deserialize<'de> + PartialEq + Clone + fmt::Debug,
{
    type Value = NoClobberMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map without conflicting duplicate keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = NoClobberMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            map.set(key, value).map_err(de::Error::custom)?;
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for NoClobberMap<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Clone + fmt::Debug,
    V: Deserialize<'de> + PartialEq + Clone + fmt::Debug,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NoClobberVisitor {
            marker: PhantomData,
        })
    }
}
