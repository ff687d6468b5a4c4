//! # slotted
//!
//! A children classification and overload engine for declarative UI trees.
//!
//! Composite components (groups, drawers, cards, menus) receive free-form
//! declarative children they did not author. slotted lets such a parent scan
//! those children, recognize the ones carrying a declared **role marker**,
//! and swap them for "overloaded" variants that carry parent-injected state
//! and callbacks — without the application author wiring anything by hand.
//!
//! ## Core Systems
//!
//! - **[`tree`]** — Slotmap-backed node arena with role markers, relay
//!   payloads, and heterogeneous-children normalization
//! - **[`value`]** — Prop values: strings, numbers, flags, lists, handlers
//! - **[`format`]** — The engine: shallow [`classify`](format::classify()),
//!   recursive [`deep_classify`](format::deep_classify()) /
//!   [`deep_rewrite`](format::deep_rewrite()), and the
//!   [`FoundChildren`](format::FoundChildren) result with bucket extraction
//! - **[`policy`]** — Cardinality/composition checks for composite parents
//! - **[`compose`]** — Built-in composites: Card, Drawer, ButtonGroup,
//!   OptionGroup
//! - **[`testing`]** — Plain-text tree outlines for snapshot assertions

// Foundation
pub mod value;

// Core systems
pub mod tree;

// The format engine
pub mod format;
pub mod policy;

// Built-in composites
pub mod compose;

// Test helpers
pub mod testing;

pub use format::{classify, deep_classify, deep_rewrite, ComponentMap, FoundChildren, ParentContext};
pub use policy::CompositionError;
pub use tree::{Child, Kind, NodeData, NodeKey, Relay, Tree};
pub use value::{Handler, Props, Value};
