//! Filter criteria
//!
//! A [`Criteria`] set holds named conditions. A key without the separator is
//! an equality criterion (`field`), a key with it names an operator
//! (`field__op`).

use crate::error::FilterError;
use indexmap::IndexMap;

/// Named filter conditions
///
/// Keys are unique; inserting an existing key replaces its value. Matching
/// does not depend on order, but insertion order decides the order in which
/// operator criteria are evaluated and therefore the output order.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria<V> {
    entries: IndexMap<String, V>,
}

impl<V> Criteria<V> {
    /// Create empty criteria (matches every record)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// With condition `key = value`
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: V) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    /// Insert condition, returning the value it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    /// Number of conditions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no conditions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate conditions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Split into operator and equality terms
    pub(crate) fn partition(self, separator: &str) -> Result<Terms<V>, FilterError> {
        let mut terms = Terms {
            operators: Vec::new(),
            equality: Vec::new(),
        };

        for (key, value) in self.entries {
            let Some((field, operator)) = key.split_once(separator) else {
                terms.equality.push((key, value));
                continue;
            };

            if field.is_empty() {
                return Err(FilterError::malformed(&key, "empty field name"));
            }
            if operator.is_empty() {
                return Err(FilterError::malformed(&key, "empty operator name"));
            }
            if operator.contains(separator) {
                return Err(FilterError::malformed(
                    &key,
                    format!("more than one '{separator}' separator"),
                ));
            }

            terms.operators.push(OperatorTerm {
                field: field.to_string(),
                operator: operator.to_string(),
                value,
            });
        }

        Ok(terms)
    }
}

impl<V> Default for Criteria<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Criteria<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>, V, const N: usize> From<[(K, V); N]> for Criteria<V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Criteria split by kind
#[derive(Debug)]
pub(crate) struct Terms<V> {
    pub(crate) operators: Vec<OperatorTerm<V>>,
    pub(crate) equality: Vec<(String, V)>,
}

/// `field__op = value`
#[derive(Debug)]
pub(crate) struct OperatorTerm<V> {
    pub(crate) field: String,
    pub(crate) operator: String,
    pub(crate) value: V,
}
