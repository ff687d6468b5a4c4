//! Node arena: slotmap-backed declarative tree with role markers and
//! heterogeneous-children normalization.

pub mod node;
pub mod tree;

pub use node::{Forwarded, Kind, NodeData, NodeKey, Relay};
pub use tree::{Child, Tree};
