//! The format engine: shallow classification, deep rewriting, and the
//! shared result/bookkeeping scaffolding.

pub mod classify;
pub mod context;
pub mod deep;
pub mod found;
pub mod map;

pub use classify::classify;
pub use context::ParentContext;
pub use deep::{deep_classify, deep_rewrite};
pub use found::{Extracted, FoundChildren};
pub use map::{ComponentMap, Renderer};
