//! Owned filterable collection
//!
//! [`RecordSet`] turns the output of any record-producing iterator into a
//! collection that can be filtered repeatedly. Iterators can't be walked
//! twice, so the records are collected up front.

use crate::filter::FilterableCollection;
use crate::record::Record;
use std::ops::Deref;

/// Vec-backed collection of records
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet<R> {
    records: Vec<R>,
}

impl<R> RecordSet<R> {
    /// Create set from records
    #[inline]
    #[must_use]
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Append a record
    #[inline]
    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    /// Unwrap into the backing vector
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<R> {
        self.records
    }
}

/// Collect any record-producing iterator into a [`RecordSet`]
///
/// ```rust
/// use hoard_filter::{filterable, Criteria, FilterableCollection};
/// use serde_json::json;
///
/// let rows = filterable((1..=4).map(|n| json!({"n": n, "even": n % 2 == 0})));
/// let evens: Vec<_> = rows
///     .filter(Criteria::from([("even", json!(true))]))
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(evens.len(), 2);
/// ```
pub fn filterable<I>(records: I) -> RecordSet<I::Item>
where
    I: IntoIterator,
    I::Item: Record,
{
    records.into_iter().collect()
}

impl<R> Default for RecordSet<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> Deref for RecordSet<R> {
    type Target = [R];

    fn deref(&self) -> &[R] {
        &self.records
    }
}

impl<R> FromIterator<R> for RecordSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<R> From<Vec<R>> for RecordSet<R> {
    fn from(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R> IntoIterator for RecordSet<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<R: Record> FilterableCollection for RecordSet<R> {
    type Record = R;
    type Iter<'a> = std::slice::Iter<'a, R> where Self: 'a;

    fn records(&self) -> Self::Iter<'_> {
        self.records.iter()
    }
}
