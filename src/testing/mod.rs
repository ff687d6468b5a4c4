//! Snapshot helpers for tests and debugging.
//!
//! Use [`tree_to_string`] to capture a subtree as a plain-text outline for
//! snapshot-style assertions.

pub mod snapshot;

pub use snapshot::tree_to_string;
