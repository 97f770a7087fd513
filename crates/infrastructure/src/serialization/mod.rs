//! Deterministic JSON serialization for the preference file.
//!
//! Keeps the file diff-friendly by:
//! - Sorting object keys alphabetically (via `BTreeMap`)
//! - Using 2-space indentation
//! - Adding trailing newline

mod json;

pub use json::*;
