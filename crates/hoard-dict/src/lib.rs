//! hoard Dict
//!
//! Accumulator maps that refuse silent overwrites.
//!
//! # Overview
//!
//! - **NoClobberMap**: insertion-ordered map; writing a different value under
//!   an existing key fails, writing an equal value is a no-op
//! - **KeyClobberError**: the conflict set plus a snapshot of the map
//!
//! # Example
//!
//! ```rust
//! use hoard_dict::NoClobberMap;
//!
//! let mut totals = NoClobberMap::new();
//! totals.set("alpha", 1).unwrap();
//! totals.set("alpha", 1).unwrap(); // same value, fine
//!
//! let err = totals.update([("alpha", 2), ("beta", 3)]).unwrap_err();
//! assert_eq!(err.keys(), &["alpha"]);
//! assert!(!totals.contains_key("beta")); // nothing merged
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod map;
mod serde_impl;

// Re-exports
pub use error::KeyClobberError;
pub use map::NoClobberMap;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
