//! hoard Filter
//!
//! Declarative filtering over in-memory collections of records.
//!
//! # Core Concepts
//!
//! - [`Record`]: any string-keyed mapping (`HashMap`, `BTreeMap`, `IndexMap`,
//!   JSON objects)
//! - [`FilterableCollection`]: capability trait for collections of records,
//!   exposing `filter`
//! - [`Criteria`]: `field = value` equality and `field__op = value` operator
//!   conditions
//! - [`OperatorRegistry`]: operator name to handler table (`in`, `ne`, plus
//!   anything registered)
//! - [`FilterConfig`]: separator and deduplication policy
//!
//! # Example
//!
//! ```rust
//! use hoard_filter::{Criteria, FilterableCollection};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"a": 1, "b": 1}),
//!     json!({"a": 2, "b": 2}),
//!     json!({"a": 1, "b": 3}),
//! ];
//!
//! let hits: Vec<_> = rows
//!     .filter(Criteria::from([("b__ne", json!(2))]))
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(hits, vec![&rows[0], &rows[2]]);
//!
//! // Unknown operators fail before anything is evaluated
//! assert!(rows.filter(Criteria::from([("a__nosuchop", json!(1))])).is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod record;
pub mod record_set;
pub mod registry;

// Re-exports
pub use config::{DedupPolicy, FilterConfig, DEFAULT_SEPARATOR};
pub use criteria::Criteria;
pub use error::FilterError;
pub use filter::{Filter, FilterableCollection, RecordValue};
pub use record::{Membership, Record};
pub use record_set::{filterable, RecordSet};
pub use registry::{require_field, Handler, OperatorRegistry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for filtering
    pub use crate::{
        Criteria, DedupPolicy, FilterConfig, FilterError, FilterableCollection, Membership,
        OperatorRegistry, Record, RecordSet,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
