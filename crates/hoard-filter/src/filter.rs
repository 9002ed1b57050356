//! Declarative filtering over collections of records
//!
//! Provides the [`FilterableCollection`] trait and the lazy [`Filter`]
//! iterator it returns.
//!
//! # Matching
//! 1. Operator criteria (`field__op`) are evaluated one after another, each
//!    over a full pass of the collection. A record matching *any* of them is
//!    yielded, once.
//! 2. If equality criteria are present, a final pass yields every record
//!    holding *all* of the required field values. Missing fields never match.
//! 3. With no criteria at all, every record is yielded.
//!
//! Identity, not structural equality, decides whether a record was already
//! yielded: two equal but distinct records are both returned. A record's
//! identity is its position in [`FilterableCollection::records`], which is
//! why that order must be stable.

use crate::config::{DedupPolicy, FilterConfig};
use crate::criteria::Criteria;
use crate::error::FilterError;
use crate::record::Record;
use crate::registry::{Handler, OperatorRegistry};
use std::collections::{HashSet, VecDeque};
use std::iter::{Enumerate, FusedIterator};

/// Value type of a collection's records
pub type RecordValue<C> = <<C as FilterableCollection>::Record as Record>::Value;

/// A collection of records that can answer filter queries
///
/// Implementors only provide iteration; filtering re-walks the collection
/// once per operator criterion plus once for the equality criteria, and
/// never copies records.
pub trait FilterableCollection {
    /// Record type held by the collection
    type Record: Record;

    /// Borrowing iterator over the records
    type Iter<'a>: Iterator<Item = &'a Self::Record>
    where
        Self: 'a;

    /// Iterate the records
    ///
    /// Every call must visit the same records in the same order; positions
    /// in this order identify records across filter passes.
    fn records(&self) -> Self::Iter<'_>;

    /// Operators available to [`FilterableCollection::filter`]
    ///
    /// Override to give a collection type its own operators.
    fn operators(&self) -> OperatorRegistry<Self::Record> {
        OperatorRegistry::with_defaults()
    }

    /// Lazily yield the records matching `criteria`
    ///
    /// # Errors
    /// Fails immediately, before any record is evaluated, if a criterion is
    /// malformed or names an operator missing from
    /// [`FilterableCollection::operators`].
    fn filter(
        &self,
        criteria: Criteria<RecordValue<Self>>,
    ) -> Result<Filter<'_, Self>, FilterError> {
        let registry = self.operators();
        Filter::new(self, &registry, &FilterConfig::default(), criteria)
    }

    /// Like [`FilterableCollection::filter`] with an explicit registry and
    /// configuration
    ///
    /// # Errors
    /// As [`FilterableCollection::filter`], plus
    /// [`FilterError::InvalidConfig`] for an unusable configuration.
    fn filter_with(
        &self,
        registry: &OperatorRegistry<Self::Record>,
        config: &FilterConfig,
        criteria: Criteria<RecordValue<Self>>,
    ) -> Result<Filter<'_, Self>, FilterError> {
        Filter::new(self, registry, config, criteria)
    }
}

/// Operator criterion with its handler already resolved
struct ResolvedOperator<R: Record> {
    field: String,
    value: R::Value,
    handler: Handler<R>,
}

enum Phase<I> {
    /// Evaluating operator criterion `term` over `records`
    Operators { term: usize, records: I },
    /// Final equality pass
    Equality { records: I },
    Done,
}

/// Lazy iterator over the records matching a set of criteria
///
/// Yields `Err` once if an operator fails on some record (for example a
/// missing field), then ends. The iterator cannot be restarted; call
/// `filter` again for a fresh pass.
pub struct Filter<'a, C: FilterableCollection + ?Sized> {
    collection: &'a C,
    operators: Vec<ResolvedOperator<C::Record>>,
    equality: Vec<(String, RecordValue<C>)>,
    dedup: DedupPolicy,
    yielded: HashSet<usize>,
    phase: Phase<Enumerate<C::Iter<'a>>>,
}

impl<'a, C: FilterableCollection + ?Sized> Filter<'a, C> {
    fn new(
        collection: &'a C,
        registry: &OperatorRegistry<C::Record>,
        config: &FilterConfig,
        criteria: Criteria<RecordValue<C>>,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        let terms = criteria.partition(&config.separator)?;

        let mut operators = Vec::with_capacity(terms.operators.len());
        for term in terms.operators {
            let Some(handler) = registry.resolve(&term.operator) else {
                let collection = std::any::type_name::<C>();
                tracing::debug!(
                    collection,
                    operator = %term.operator,
                    "unsupported filter operator"
                );
                return Err(FilterError::unsupported_operator(
                    collection,
                    term.operator,
                    registry.names().into_iter().map(str::to_string).collect(),
                ));
            };
            operators.push(ResolvedOperator {
                field: term.field,
                value: term.value,
                handler,
            });
        }

        tracing::debug!(
            collection = std::any::type_name::<C>(),
            operators = operators.len(),
            equality = terms.equality.len(),
            dedup = ?config.dedup,
            "filter criteria resolved"
        );

        let mut filter = Self {
            collection,
            operators,
            equality: terms.equality,
            dedup: config.dedup,
            yielded: HashSet::new(),
            phase: Phase::Done,
        };
        filter.phase = filter.phase_from(0);
        Ok(filter)
    }

    /// Phase that starts at operator criterion `term`
    fn phase_from(&self, term: usize) -> Phase<Enumerate<C::Iter<'a>>> {
        if term < self.operators.len() {
            Phase::Operators {
                term,
                records: self.collection.records().enumerate(),
            }
        } else if !self.equality.is_empty() || self.operators.is_empty() {
            Phase::Equality {
                records: self.collection.records().enumerate(),
            }
        } else {
            Phase::Done
        }
    }

    fn matches_equality(&self, record: &C::Record) -> bool {
        self.equality
            .iter()
            .all(|(field, expected)| record.field(field).is_some_and(|actual| actual == expected))
    }
}

impl<'a, C: FilterableCollection + ?Sized> Iterator for Filter<'a, C> {
    type Item = Result<&'a C::Record, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.phase {
                Phase::Operators { term, records } => {
                    let term = *term;
                    let Some((position, record)) = records.next() else {
                        self.phase = self.phase_from(term + 1);
                        continue;
                    };

                    let op = &self.operators[term];
                    match (op.handler)(&op.field, &op.value, record) {
                        Ok(true) => {
                            if self.yielded.insert(position) {
                                return Some(Ok(record));
                            }
                        }
                        Ok(false) => {}
                        Err(err) => {
                            tracing::debug!(
                                field = %op.field,
                                error = %err,
                                "filter operator failed"
                            );
                            self.phase = Phase::Done;
                            return Some(Err(err));
                        }
                    }
                }
                Phase::Equality { records } => {
                    let Some((position, record)) = records.next() else {
                        self.phase = Phase::Done;
                        return None;
                    };

                    if !self.matches_equality(record) {
                        continue;
                    }
                    let fresh = match self.dedup {
                        DedupPolicy::Global => self.yielded.insert(position),
                        DedupPolicy::PerPhase => true,
                    };
                    if fresh {
                        return Some(Ok(record));
                    }
                }
                Phase::Done => return None,
            }
        }
    }
}

impl<'a, C: FilterableCollection + ?Sized> FusedIterator for Filter<'a, C> {}

impl<R: Record> FilterableCollection for [R] {
    type Record = R;
    type Iter<'a> = std::slice::Iter<'a, R> where Self: 'a;

    fn records(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl<R: Record> FilterableCollection for Vec<R> {
    type Record = R;
    type Iter<'a> = std::slice::Iter<'a, R> where Self: 'a;

    fn records(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl<R: Record> FilterableCollection for VecDeque<R> {
    type Record = R;
    type Iter<'a> = std::collections::vec_deque::Iter<'a, R> where Self: 'a;

    fn records(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    type Row = HashMap<&'static str, i64>;

    fn row(pairs: &[(&'static str, i64)]) -> Row {
        pairs.iter().copied().collect()
    }

    fn sample() -> Vec<Row> {
        vec![
            row(&[("a", 1), ("b", 1)]),
            row(&[("a", 2), ("b", 2)]),
            row(&[("a", 1), ("b", 3)]),
        ]
    }

    fn positions(rows: &[Row], found: &[&Row]) -> Vec<usize> {
        let mut out: Vec<usize> = found
            .iter()
            .map(|f| rows.iter().position(|r| std::ptr::eq(r, *f)).unwrap())
            .collect();
        out.sort_unstable();
        out
    }

    fn run<'a>(rows: &'a [Row], criteria: Criteria<i64>) -> Vec<&'a Row> {
        rows.filter(criteria)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn equality_scenario() {
        let rows = sample();
        let found = run(&rows, Criteria::from([("a", 1)]));
        assert_eq!(positions(&rows, &found), vec![0, 2]);
    }

    #[test]
    fn ne_scenario() {
        let rows = sample();
        let found = run(&rows, Criteria::from([("b__ne", 2)]));
        assert_eq!(positions(&rows, &found), vec![0, 2]);
    }

    #[test]
    fn equality_requires_every_pair() {
        let rows = sample();
        let found = run(&rows, Criteria::new().with("a", 1).with("b", 3));
        assert_eq!(positions(&rows, &found), vec![2]);
    }

    #[test]
    fn empty_criteria_yields_everything() {
        let rows = sample();
        let found = run(&rows, Criteria::new());
        assert_eq!(positions(&rows, &found), vec![0, 1, 2]);
    }

    #[test]
    fn operator_criteria_are_disjunctive_and_deduplicated() {
        let rows = sample();
        // Row 0 matches both operators but must come out once.
        let found = run(&rows, Criteria::new().with("a__ne", 2).with("b__ne", 3));
        assert_eq!(positions(&rows, &found), vec![0, 1, 2]);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn global_dedup_spans_both_phases() {
        let rows = sample();
        let found = run(&rows, Criteria::new().with("b__ne", 2).with("a", 1));
        assert_eq!(positions(&rows, &found), vec![0, 2]);
    }

    #[test]
    fn per_phase_dedup_yields_twice() {
        let rows = sample();
        let config = FilterConfig::new().with_dedup(DedupPolicy::PerPhase);
        let found: Vec<&Row> = rows
            .filter_with(
                &OperatorRegistry::with_defaults(),
                &config,
                Criteria::new().with("b__ne", 2).with("a", 1),
            )
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(positions(&rows, &found), vec![0, 0, 2, 2]);
    }

    #[test]
    fn equal_but_distinct_records_are_both_yielded() {
        let rows = vec![row(&[("a", 1)]), row(&[("a", 1)])];
        let found = run(&rows, Criteria::from([("a", 1)]));
        assert_eq!(positions(&rows, &found), vec![0, 1]);
    }

    #[test]
    fn missing_field_in_equality_is_no_match() {
        let rows = vec![row(&[("a", 1)]), row(&[("z", 1)])];
        let found = run(&rows, Criteria::from([("a", 1)]));
        assert_eq!(positions(&rows, &found), vec![0]);
    }

    #[test]
    fn unknown_operator_fails_eagerly_even_when_empty() {
        let rows: Vec<Row> = Vec::new();
        let err = rows
            .filter(Criteria::from([("a__nosuchop", 1)]))
            .err()
            .unwrap();

        match err {
            FilterError::UnsupportedOperator {
                collection,
                handler,
                operator,
                registered,
            } => {
                assert!(collection.contains("Vec"));
                assert_eq!(handler, "handle__nosuchop");
                assert_eq!(operator, "nosuchop");
                assert_eq!(registered, vec!["in".to_string(), "ne".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_sized_records_are_distinct() {
        #[derive(Debug, PartialEq)]
        struct Empty;

        impl crate::record::Membership for Empty {}

        impl Record for Empty {
            type Value = Empty;

            fn field(&self, _: &str) -> Option<&Empty> {
                None
            }
        }

        let rows = vec![Empty, Empty, Empty];
        assert_eq!(rows.filter(Criteria::new()).unwrap().count(), 3);
    }

    #[test]
    fn in_on_scalar_records_is_invalid_operand() {
        let rows = sample();
        let mut filter = rows.filter(Criteria::from([("a__in", 1)])).unwrap();

        assert!(matches!(
            filter.next(),
            Some(Err(FilterError::InvalidOperand { .. }))
        ));
        assert_eq!(filter.next(), None);
    }

    #[test]
    fn missing_field_in_operator_surfaces_then_stops() {
        let rows = vec![row(&[("b", 1)]), row(&[("a", 1)]), row(&[("b", 5)])];
        let mut filter = rows.filter(Criteria::from([("b__ne", 9)])).unwrap();

        assert_eq!(filter.next(), Some(Ok(&rows[0])));
        assert_eq!(filter.next(), Some(Err(FilterError::missing_field("b"))));
        assert_eq!(filter.next(), None);
        assert_eq!(filter.next(), None);
    }

    #[test]
    fn filter_is_lazy() {
        let rows = sample();
        let mut filter = rows.filter(Criteria::from([("a", 1)])).unwrap();

        assert!(std::ptr::eq(filter.next().unwrap().unwrap(), &rows[0]));
        drop(filter);
    }

    #[test]
    fn in_operator_over_json_rows() {
        let rows = vec![
            json!({"tag": "red"}),
            json!({"tag": "green"}),
            json!({"tag": "blue"}),
        ];
        let found: Vec<&Value> = rows
            .filter(Criteria::from([("tag__in", json!(["red", "blue"]))]))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(found, vec![&rows[0], &rows[2]]);
    }

    #[test]
    fn slices_and_deques_are_filterable() {
        let rows = sample();
        let slice: &[Row] = &rows[1..];
        assert_eq!(slice.filter(Criteria::from([("a", 1)])).unwrap().count(), 1);

        let deque: VecDeque<Row> = rows.into_iter().collect();
        assert_eq!(deque.filter(Criteria::from([("a", 1)])).unwrap().count(), 2);
    }
}
