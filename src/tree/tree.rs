//! Tree operations: insert, remove, children rewiring, normalization.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use crate::value::Props;

use super::node::{NodeData, NodeKey};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeKey] = &[];

// ---------------------------------------------------------------------------
// Child
// ---------------------------------------------------------------------------

/// Heterogeneous children input, as a component caller writes it.
///
/// Callers hand a parent component whatever shape is convenient: a node, bare
/// text, nothing (a conditional branch that rendered empty), or a nested list.
/// [`Tree::adopt`] flattens this into a normalized `Vec<NodeKey>`, skipping
/// non-renderable entries.
#[derive(Debug, Clone)]
pub enum Child {
    /// An existing node.
    Node(NodeKey),
    /// Bare text; materialized as a text node on adoption.
    Text(String),
    /// A non-renderable entry; skipped.
    Empty,
    /// A nested sequence; flattened in order.
    Many(Vec<Child>),
}

impl From<NodeKey> for Child {
    fn from(key: NodeKey) -> Self {
        Child::Node(key)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<Vec<Child>> for Child {
    fn from(items: Vec<Child>) -> Self {
        Child::Many(items)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(inner) => inner.into(),
            None => Child::Empty,
        }
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// The declarative node tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that node removal is O(subtree size) and lookup is O(1).
/// Format passes rewrite child lists through [`Tree::set_children`]; replaced
/// originals stay in the arena and remain readable.
pub struct Tree {
    nodes: SlotMap<NodeKey, NodeData>,
    children: SecondaryMap<NodeKey, Vec<NodeKey>>,
    parent: SecondaryMap<NodeKey, NodeKey>,
    root: Option<NodeKey>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root: None,
        }
    }

    /// Allocate a node without touching the root or any parent links.
    fn alloc(&mut self, data: NodeData) -> NodeKey {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert a root-level node (no parent).
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, data: NodeData) -> NodeKey {
        let id = self.alloc(data);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert a node as a child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist in the tree.
    pub fn insert_child(&mut self, parent: NodeKey, data: NodeData) -> NodeKey {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );
        let id = self.alloc(data);
        self.parent.insert(id, parent);
        self.children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        id
    }

    /// Clone a node with its props replaced, returning the fresh key.
    ///
    /// The clone carries the original's kind, role, relay, and key, but starts
    /// without children and without a parent. Returns `None` if the source
    /// does not exist.
    pub fn clone_with(&mut self, source: NodeKey, props: Props) -> Option<NodeKey> {
        let mut data = self.nodes.get(source)?.clone();
        data.props = props;
        Some(self.alloc(data))
    }

    /// Flatten heterogeneous children input into a normalized key sequence.
    ///
    /// Non-renderable entries are skipped, bare text is materialized as text
    /// nodes, and nested sequences are flattened in order. The returned keys
    /// are not attached to any parent.
    pub fn adopt(&mut self, child: impl Into<Child>) -> Vec<NodeKey> {
        let mut out = Vec::new();
        self.flatten(child.into(), &mut out);
        out
    }

    fn flatten(&mut self, child: Child, out: &mut Vec<NodeKey>) {
        match child {
            Child::Node(key) => out.push(key),
            Child::Text(text) => out.push(self.alloc(NodeData::text(text))),
            Child::Empty => {}
            Child::Many(items) => {
                for item in items {
                    self.flatten(item, out);
                }
            }
        }
    }

    /// Remove a node and all its descendants recursively.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeKey) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        // Detach from parent's children list.
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }

        // Clear root if we're removing it.
        if self.root == Some(id) {
            self.root = None;
        }

        // Collect all descendants (BFS) to remove them.
        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            // Queue children before removing.
            if let Some(kids) = self.children.remove(current) {
                for &child in &kids {
                    to_remove.push_back(child);
                }
            }
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Replace `parent`'s child list wholesale, rewiring parent links.
    ///
    /// Old children that do not reappear are detached (but stay in the arena);
    /// new children are detached from any previous parent first. Subtrees move
    /// intact.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist.
    pub fn set_children(&mut self, parent: NodeKey, new_children: Vec<NodeKey>) {
        debug_assert!(
            self.nodes.contains_key(parent),
            "parent node does not exist"
        );

        // Detach incoming children from their previous parents.
        for &child in &new_children {
            if let Some(old_parent) = self.parent.remove(child) {
                if old_parent != parent {
                    if let Some(siblings) = self.children.get_mut(old_parent) {
                        siblings.retain(|&c| c != child);
                    }
                }
            }
        }

        let old = self.children.insert(parent, new_children.clone());

        // Orphan old children that were dropped from the list.
        if let Some(old) = old {
            for child in old {
                if !new_children.contains(&child) {
                    self.parent.remove(child);
                }
            }
        }

        for &child in &new_children {
            self.parent.insert(child, parent);
        }
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeKey) -> Option<NodeKey> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeKey) -> &[NodeKey] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeKey) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeKey) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    /// Explicitly set the root node.
    pub fn set_root(&mut self, id: NodeKey) {
        self.root = Some(id);
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: NodeKey) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            let kids = self.children(current);
            for &child in kids.iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Tree, NodeKey, NodeKey, NodeKey, NodeKey, NodeKey) {
        let mut tree = Tree::new();
        let root = tree.insert(NodeData::element("section"));
        let a = tree.insert_child(root, NodeData::element("div"));
        let b = tree.insert_child(root, NodeData::element("div"));
        let c = tree.insert_child(a, NodeData::element("input").with_role("Radio"));
        let d = tree.insert_child(a, NodeData::text("label"));
        (tree, root, a, b, c, d)
    }

    #[test]
    fn insert_sets_root() {
        let mut tree = Tree::new();
        let id = tree.insert(NodeData::element("root"));
        assert_eq!(tree.root(), Some(id));
    }

    #[test]
    fn insert_second_does_not_change_root() {
        let mut tree = Tree::new();
        let first = tree.insert(NodeData::element("first"));
        let _second = tree.insert(NodeData::element("second"));
        assert_eq!(tree.root(), Some(first));
    }

    #[test]
    fn insert_child_parent_relationship() {
        let (tree, root, a, _b, c, _d) = build_tree();
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn children_list() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert!(tree.children(c).is_empty());
    }

    #[test]
    fn get_and_get_mut() {
        let (mut tree, _root, a, ..) = build_tree();
        assert_eq!(tree.get(a).unwrap().name(), Some("div"));
        tree.get_mut(a).unwrap().props.insert("hidden", true);
        assert_eq!(tree.get(a).unwrap().props.get_bool("hidden"), Some(true));
    }

    #[test]
    fn len_and_is_empty() {
        let (tree, ..) = build_tree();
        assert_eq!(tree.len(), 5);
        assert!(!tree.is_empty());

        let empty = Tree::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn remove_leaf() {
        let (mut tree, _root, a, _b, c, d) = build_tree();
        let removed = tree.remove(c);
        assert!(removed.is_some());
        assert_eq!(removed.unwrap().role(), Some("Radio"));
        assert!(!tree.contains(c));
        assert_eq!(tree.children(a), &[d]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn remove_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        tree.remove(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert!(tree.contains(root));
        assert!(tree.contains(b));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_nonexistent() {
        let mut tree = Tree::new();
        let id = tree.insert(NodeData::element("x"));
        tree.remove(id);
        assert!(tree.remove(id).is_none());
    }

    #[test]
    fn set_children_replaces_list() {
        let (mut tree, root, a, b, ..) = build_tree();
        let e = tree.insert(NodeData::element("span"));
        tree.set_children(root, vec![e, b]);
        assert_eq!(tree.children(root), &[e, b]);
        assert_eq!(tree.parent(e), Some(root));
        assert_eq!(tree.parent(b), Some(root));
        // a is orphaned but still alive.
        assert!(tree.parent(a).is_none());
        assert!(tree.contains(a));
    }

    #[test]
    fn set_children_moves_subtree_intact() {
        let (mut tree, _root, a, b, c, d) = build_tree();
        // Move a (with its subtree) under b.
        tree.set_children(b, vec![a]);
        assert_eq!(tree.parent(a), Some(b));
        assert_eq!(tree.children(a), &[c, d]);
    }

    #[test]
    fn set_children_reorders_in_place() {
        let (mut tree, _root, a, _b, c, d) = build_tree();
        tree.set_children(a, vec![d, c]);
        assert_eq!(tree.children(a), &[d, c]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(d), Some(a));
    }

    #[test]
    fn clone_with_overrides_props() {
        let (mut tree, _root, _a, _b, c, _d) = build_tree();
        tree.get_mut(c).unwrap().props.insert("value", 1);
        let copy = tree
            .clone_with(c, Props::new().with("value", 2))
            .unwrap();
        assert_eq!(tree.get(copy).unwrap().props.get_int("value"), Some(2));
        assert_eq!(tree.get(copy).unwrap().role(), Some("Radio"));
        // Original untouched.
        assert_eq!(tree.get(c).unwrap().props.get_int("value"), Some(1));
        // Clone starts detached and childless.
        assert!(tree.parent(copy).is_none());
        assert!(tree.children(copy).is_empty());
    }

    #[test]
    fn clone_with_missing_source() {
        let mut tree = Tree::new();
        let id = tree.insert(NodeData::element("x"));
        tree.remove(id);
        assert!(tree.clone_with(id, Props::new()).is_none());
    }

    #[test]
    fn adopt_flattens_and_skips() {
        let mut tree = Tree::new();
        let node = tree.insert(NodeData::element("div"));
        let keys = tree.adopt(Child::Many(vec![
            Child::Empty,
            Child::Node(node),
            Child::Many(vec![Child::Text("hi".to_owned()), Child::Empty]),
            Child::Text("there".to_owned()),
        ]));
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0], node);
        assert_eq!(tree.get(keys[1]).unwrap().text_content(), Some("hi"));
        assert_eq!(tree.get(keys[2]).unwrap().text_content(), Some("there"));
    }

    #[test]
    fn adopt_single_node() {
        let mut tree = Tree::new();
        let node = tree.insert(NodeData::element("div"));
        assert_eq!(tree.adopt(node), vec![node]);
    }

    #[test]
    fn adopt_empty_yields_nothing() {
        let mut tree = Tree::new();
        assert!(tree.adopt(Child::Empty).is_empty());
        assert!(tree.adopt(Child::Many(Vec::new())).is_empty());
    }

    #[test]
    fn adopt_from_option() {
        let mut tree = Tree::new();
        let node = tree.insert(NodeData::element("div"));
        let none: Option<NodeKey> = None;
        assert!(tree.adopt(none).is_empty());
        assert_eq!(tree.adopt(Some(node)), vec![node]);
    }

    #[test]
    fn adopt_does_not_set_root() {
        let mut tree = Tree::new();
        let keys = tree.adopt("loose text");
        assert_eq!(keys.len(), 1);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn walk_depth_first() {
        let (tree, root, a, b, c, d) = build_tree();
        let order = tree.walk_depth_first(root);
        assert_eq!(order, vec![root, a, c, d, b]);
    }

    #[test]
    fn walk_depth_first_subtree() {
        let (tree, _root, a, _b, c, d) = build_tree();
        let order = tree.walk_depth_first(a);
        assert_eq!(order, vec![a, c, d]);
    }

    #[test]
    fn default_impl() {
        let tree = Tree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }
}
