//! hoard Scope
//!
//! Small scope-bound helpers.
//!
//! - [`SetDefault`] / [`DictSetDefault`]: use a stored value or a default,
//!   keeping whatever the scope leaves behind
//! - [`cd`]: enter a directory for the lifetime of a [`DirGuard`]

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod defaults;
pub mod dir;
pub mod error;

// Re-exports
pub use defaults::{DictSetDefault, MapSlot, SetDefault};
pub use dir::{cd, DirGuard};
pub use error::ScopeError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
