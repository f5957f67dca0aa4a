//! Value types shared by search, analysis and installation.
//!
//! Records are built per invocation by the search providers and the
//! dependency loader and dropped when the command finishes.

pub mod types;

pub use types::{PackageRecord, Source};
