//! Error types for record filtering

/// Errors raised while building or running a filter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Criterion names an operator with no registered handler
    ///
    /// Returned by `filter` itself, before any record is evaluated.
    #[error(
        "{collection} has no {handler} handler for operator '{operator}' (registered: {registered:?})"
    )]
    UnsupportedOperator {
        /// Type name of the collection being filtered
        collection: String,
        /// Name of the missing handler (`handle__<operator>`)
        handler: String,
        /// Operator that failed to resolve
        operator: String,
        /// Operators the registry does know
        registered: Vec<String>,
    },

    /// Criterion key cannot be split into field and operator
    #[error("malformed criterion '{key}': {reason}")]
    MalformedCriterion {
        /// Offending criterion key
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// Operator handler looked up a field the record does not have
    #[error("record has no field '{field}'")]
    MissingField {
        /// Missing field name
        field: String,
    },

    /// Operator cannot be applied to the given values
    #[error("operator '{operator}' cannot be applied to field '{field}': {reason}")]
    InvalidOperand {
        /// Operator being evaluated
        operator: String,
        /// Field being evaluated
        field: String,
        /// Why the operand was rejected
        reason: String,
    },

    /// Filter configuration is unusable
    #[error("invalid filter config: {0}")]
    InvalidConfig(String),
}

impl FilterError {
    /// Create unsupported operator error
    pub fn unsupported_operator(
        collection: impl Into<String>,
        operator: impl Into<String>,
        registered: Vec<String>,
    ) -> Self {
        let operator = operator.into();
        Self::UnsupportedOperator {
            collection: collection.into(),
            handler: format!("handle__{operator}"),
            operator,
            registered,
        }
    }

    /// Create malformed criterion error
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCriterion {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create invalid operand error
    pub fn invalid_operand(
        operator: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOperand {
            operator: operator.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
