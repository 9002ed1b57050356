//! hoard
//!
//! General-purpose data-structure helpers.
//!
//! # Components
//!
//! - [`dict`]: [`NoClobberMap`], an accumulator map that refuses silent
//!   overwrites
//! - [`filter`]: [`FilterableCollection`], declarative `field = value` /
//!   `field__op = value` queries over collections of records
//! - [`scope`]: [`SetDefault`], [`DictSetDefault`] and [`cd`]
//!
//! The components share no state and can be used independently.

#![warn(missing_docs)]

pub use hoard_dict as dict;
pub use hoard_filter as filter;
pub use hoard_scope as scope;

pub use hoard_dict::{KeyClobberError, NoClobberMap};
pub use hoard_filter::{
    filterable, Criteria, DedupPolicy, FilterConfig, FilterError, FilterableCollection,
    OperatorRegistry, Record, RecordSet,
};
pub use hoard_scope::{cd, DictSetDefault, DirGuard, ScopeError, SetDefault};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports across the workspace
    pub use crate::{
        Criteria, DictSetDefault, FilterableCollection, KeyClobberError, NoClobberMap, SetDefault,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
