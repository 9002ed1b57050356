//! Operator registry for filter criteria
//!
//! Provides [`OperatorRegistry`] for mapping operator names (the `op` in
//! `field__op`) to handler functions.

use crate::error::FilterError;
use crate::record::{Membership, Record};
use std::collections::HashMap;
use std::fmt;

/// Operator handler
///
/// Receives the criterion's field name, the criterion's value and the
/// record under test; returns whether the record matches.
pub type Handler<R> = fn(&str, &<R as Record>::Value, &R) -> Result<bool, FilterError>;

/// Registry of operator handlers
///
/// Dispatch is an explicit name lookup. New operators are added with
/// [`OperatorRegistry::register`] without touching the filter itself.
pub struct OperatorRegistry<R: Record> {
    handlers: HashMap<String, Handler<R>>,
}

impl<R: Record> OperatorRegistry<R> {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create registry with the built-in `in` and `ne` operators
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("in", handle_in::<R>);
        registry.register("ne", handle_ne::<R>);
        registry
    }

    /// With an extra operator
    #[inline]
    #[must_use]
    pub fn with_operator(mut self, name: &str, handler: Handler<R>) -> Self {
        self.register(name, handler);
        self
    }

    /// Register an operator, returning the handler it replaced
    pub fn register(&mut self, name: &str, handler: Handler<R>) -> Option<Handler<R>> {
        self.handlers.insert(name.to_string(), handler)
    }

    /// Look up the handler for `name`
    #[inline]
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Handler<R>> {
        self.handlers.get(name).copied()
    }

    /// Check if operator exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Remove operator
    #[inline]
    pub fn remove(&mut self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// List all registered operator names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered operators
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<R: Record> Default for OperatorRegistry<R> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<R: Record> Clone for OperatorRegistry<R> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<R: Record> fmt::Debug for OperatorRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("operators", &self.names())
            .finish()
    }
}

/// Fetch `field` from `record` or report it missing
///
/// Helper for handlers, including user-registered ones.
///
/// # Errors
/// Returns [`FilterError::MissingField`] if the record has no such field.
pub fn require_field<'r, R: Record>(
    record: &'r R,
    field: &str,
) -> Result<&'r R::Value, FilterError> {
    record
        .field(field)
        .ok_or_else(|| FilterError::missing_field(field))
}

/// `field__in`: the record's value is contained in the criterion value
fn handle_in<R: Record>(field: &str, value: &R::Value, record: &R) -> Result<bool, FilterError> {
    let actual = require_field(record, field)?;
    value
        .contains_item(actual)
        .ok_or_else(|| {
            FilterError::invalid_operand("in", field, "criterion value is not a container")
        })
}

/// `field__ne`: the record's value differs from the criterion value
fn handle_ne<R: Record>(field: &str, value: &R::Value, record: &R) -> Result<bool, FilterError> {
    let actual = require_field(record, field)?;
    Ok(actual != value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    type Row = serde_json::Map<String, Value>;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn handle_gt(field: &str, value: &Value, record: &Row) -> Result<bool, FilterError> {
        let actual = require_field(record, field)?;
        match (actual.as_f64(), value.as_f64()) {
            (Some(a), Some(b)) => Ok(a > b),
            _ => Err(FilterError::invalid_operand("gt", field, "not a number")),
        }
    }

    #[test]
    fn registry_new_empty() {
        let registry = OperatorRegistry::<Row>::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_defaults() {
        let registry = OperatorRegistry::<Row>::with_defaults();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["in", "ne"]);
    }

    #[test]
    fn registry_register_and_remove() {
        let mut registry = OperatorRegistry::<Row>::with_defaults();
        assert!(registry.register("gt", handle_gt).is_none());
        assert!(registry.contains("gt"));

        assert!(registry.remove("ne"));
        assert!(!registry.contains("ne"));
        assert!(!registry.remove("ne"));
    }

    #[test]
    fn resolve_unknown_is_none() {
        let registry = OperatorRegistry::<Row>::with_defaults();
        assert!(registry.resolve("nosuchop").is_none());
    }

    #[test]
    fn builtin_in() {
        let handler = OperatorRegistry::<Row>::with_defaults().resolve("in").unwrap();
        let record = row(json!({"tag": "b"}));

        assert!(handler("tag", &json!(["a", "b"]), &record).unwrap());
        assert!(!handler("tag", &json!(["c"]), &record).unwrap());
        assert!(matches!(
            handler("tag", &json!(3), &record),
            Err(FilterError::InvalidOperand { .. })
        ));
    }

    #[test]
    fn builtin_ne() {
        let handler = OperatorRegistry::<Row>::with_defaults().resolve("ne").unwrap();
        let record = row(json!({"b": 2}));

        assert!(!handler("b", &json!(2), &record).unwrap());
        assert!(handler("b", &json!(3), &record).unwrap());
    }

    #[test]
    fn builtin_reports_missing_field() {
        let handler = OperatorRegistry::<Row>::with_defaults().resolve("ne").unwrap();
        let record = row(json!({"b": 2}));

        assert_eq!(
            handler("zzz", &json!(2), &record),
            Err(FilterError::missing_field("zzz"))
        );
    }

    #[test]
    fn custom_operator_via_closure() {
        let registry = OperatorRegistry::<Row>::new().with_operator("truthy", |field, _, record| {
            Ok(require_field(record, field)?.as_bool().unwrap_or(false))
        });
        let handler = registry.resolve("truthy").unwrap();

        assert!(handler("ok", &Value::Null, &row(json!({"ok": true}))).unwrap());
        assert!(!handler("ok", &Value::Null, &row(json!({"ok": 1}))).unwrap());
    }

    #[test]
    fn debug_lists_operator_names() {
        let registry = OperatorRegistry::<Row>::with_defaults();
        assert_eq!(
            format!("{registry:?}"),
            r#"OperatorRegistry { operators: ["in", "ne"] }"#
        );
    }
}
