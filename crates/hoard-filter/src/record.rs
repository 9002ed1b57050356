//! Record abstraction
//!
//! A [`Record`] is any string-keyed mapping the filter can inspect. Values
//! must support equality and [`Membership`], the containment test behind the
//! built-in `in` operator.

use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// String-keyed mapping inspected by a filter
///
/// Records are only ever read. Implementations must return the same value
/// for the same field for as long as they are borrowed.
pub trait Record {
    /// Value type stored under each field
    type Value: PartialEq + Membership;

    /// Value stored under `name`, if any
    fn field(&self, name: &str) -> Option<&Self::Value>;
}

/// Containment test used by the `in` operator
///
/// `container.contains_item(item)` answers "is `item` in `container`".
/// Types that are not containers keep the default, which returns `None`
/// and makes `in` report an invalid operand.
///
/// A criterion value has the same type as the record's values. On records
/// with scalar values, such as `HashMap<String, i64>`, the criterion value
/// is a scalar too, so `field__in` always fails with
/// [`FilterError::InvalidOperand`](crate::FilterError::InvalidOperand). List
/// membership needs records whose value type can hold a list, such as
/// `serde_json::Value`:
///
/// ```rust
/// use hoard_filter::prelude::*;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let rows = vec![json!({"team": "web"}), json!({"team": "core"})];
/// let hits = rows
///     .filter(Criteria::from([("team__in", json!(["web", "ops"]))]))?
///     .count();
/// assert_eq!(hits, 1);
///
/// let scalars: Vec<HashMap<String, i64>> = vec![HashMap::from([("n".to_string(), 1)])];
/// let mut filter = scalars.filter(Criteria::from([("n__in", 1)]))?;
/// assert!(matches!(filter.next(), Some(Err(FilterError::InvalidOperand { .. }))));
/// # Ok::<(), FilterError>(())
/// ```
pub trait Membership {
    /// Whether `item` is contained in `self`, or `None` if `self` is not a
    /// container
    fn contains_item(&self, item: &Self) -> Option<bool> {
        let _ = item;
        None
    }
}

impl Membership for Value {
    fn contains_item(&self, item: &Self) -> Option<bool> {
        match self {
            Value::Array(items) => Some(items.contains(item)),
            Value::Object(map) => Some(item.as_str().is_some_and(|key| map.contains_key(key))),
            Value::String(haystack) => item.as_str().map(|needle| haystack.contains(needle)),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }
}

impl Membership for String {
    fn contains_item(&self, item: &Self) -> Option<bool> {
        Some(self.contains(item.as_str()))
    }
}

impl Membership for &str {
    fn contains_item(&self, item: &Self) -> Option<bool> {
        Some(self.contains(*item))
    }
}

macro_rules! scalar_membership {
    ($($ty:ty),* $(,)?) => {
        $(impl Membership for $ty {})*
    };
}

scalar_membership!(bool, char, f32, f64);
scalar_membership!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: PartialEq + Membership,
    S: BuildHasher,
{
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: PartialEq + Membership,
{
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<K, V, S> Record for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: PartialEq + Membership,
    S: BuildHasher,
{
    type Value = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl Record for serde_json::Map<String, Value> {
    type Value = Value;

    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// JSON objects are records; any other JSON value has no fields
impl Record for Value {
    type Value = Value;

    fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(name))
    }
}
