//! Deep rewriting: recursive classification through wrapper markup.
//!
//! Composite components accept children as free-form declarative markup, so an
//! application author may nest a target node inside arbitrary wrapper elements
//! before it reaches the component that needs to recognize it. A shallow
//! [`classify`](super::classify::classify) would miss it; the deep pass
//! recurses through unmarked wrappers and rewrites matches wherever they sit.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::tree::{NodeKey, Tree};
use crate::value::Props;

use super::context::Tally;
use super::found::FoundChildren;
use super::map::ComponentMap;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Deep-classify a parent's children against a component map.
///
/// Each top-level child is run through [`deep_rewrite`]'s recursion. The
/// result has the same shape as the shallow pass: the rebuilt top-level
/// sequence, per-role buckets (here collecting matches found at *any* depth,
/// in document order), and "other" holding the top-level children that were
/// not themselves replaced (wrappers whose descendants were rewritten keep
/// their identity and stay in "other").
pub fn deep_classify(
    tree: &mut Tree,
    children: &[NodeKey],
    map: &ComponentMap,
    parent_props: Props,
) -> FoundChildren {
    let mut pass = DeepPass::new(map, parent_props);
    let mut found = FoundChildren::new();

    for (index, &child) in children.iter().enumerate() {
        match pass.rewrite(tree, child, index, &mut found) {
            Outcome::Replaced(key) => found.push_rebuilt(key),
            Outcome::Kept(key) => {
                found.push_other(key);
                found.push_rebuilt(key);
            }
        }
    }

    debug!(
        children = children.len(),
        matched = found.matched_len(),
        other = found.other().len(),
        "deep-classified children"
    );
    found
}

/// Deep-rewrite a single node, returning the node that should take its place.
///
/// A matched node is replaced by its renderer's output; recursion stops there
/// because the renderer owns the matched subtree. A relay wrapper whose declared
/// roles intersect `map` gets the pass stamped into its payload and is
/// returned unchanged. An unmarked node with children is reconstructed with
/// its children rewritten recursively; everything else passes through with a
/// fresh synthetic key only.
pub fn deep_rewrite(
    tree: &mut Tree,
    node: NodeKey,
    map: &ComponentMap,
    parent_props: Props,
) -> NodeKey {
    let mut pass = DeepPass::new(map, parent_props);
    let mut found = FoundChildren::new();
    pass.rewrite(tree, node, 0, &mut found).key()
}

// ---------------------------------------------------------------------------
// Pass state
// ---------------------------------------------------------------------------

enum Outcome {
    /// The node was matched and replaced by its renderer's output.
    Replaced(NodeKey),
    /// The node kept its identity (possibly with rewritten children).
    Kept(NodeKey),
}

impl Outcome {
    fn key(&self) -> NodeKey {
        match *self {
            Outcome::Replaced(key) | Outcome::Kept(key) => key,
        }
    }
}

struct DeepPass<'m> {
    map: &'m ComponentMap,
    props: Rc<Props>,
    tally: Tally,
    /// Pass-local allocator for synthetic keys. Monotonic, so keys are
    /// collision-free across the whole rewritten tree even where structural
    /// position alone would collide between depths.
    next_key: u64,
}

impl<'m> DeepPass<'m> {
    fn new(map: &'m ComponentMap, parent_props: Props) -> Self {
        Self {
            map,
            props: Rc::new(parent_props),
            tally: Tally::new(),
            next_key: 0,
        }
    }

    fn rewrite(
        &mut self,
        tree: &mut Tree,
        node: NodeKey,
        child_index: usize,
        found: &mut FoundChildren,
    ) -> Outcome {
        self.tally.visit();

        let Some(data) = tree.get(node) else {
            return Outcome::Kept(node);
        };
        let role = data.role.clone();
        let relay_wants = data.relay.as_ref().is_some_and(|relay| relay.wants(self.map));

        // 1. Matched: replace and stop. The renderer owns the subtree.
        if let Some(role) = role.as_deref() {
            if let Some(renderer) = self.map.get(role).cloned() {
                let ctx = self.tally.context(role, child_index, Rc::clone(&self.props));
                let original = tree
                    .get(node)
                    .map(|data| data.props.clone())
                    .unwrap_or_default();
                trace!(child_index, role = %role, "replacing matched descendant");
                let replaced = renderer(tree, original, &ctx);
                self.stamp(tree, replaced);
                found.push_matched(role, replaced, ctx);
                return Outcome::Replaced(replaced);
            }
        }

        // 2. Relay wrapper: stamp the pass into the payload and defer; the
        //    wrapper's own later pass finishes the job.
        if relay_wants {
            let map = self.map.clone();
            let props = Rc::clone(&self.props);
            if let Some(relay) = tree.get_mut(node).and_then(|data| data.relay.as_mut()) {
                relay.forward(map, props);
            }
            trace!(child_index, "stamped relay wrapper");
            self.stamp(tree, node);
            return Outcome::Kept(node);
        }

        // 3. Leaf, or a role recognized by nobody here: pass through.
        let kids: Vec<NodeKey> = tree.children(node).to_vec();
        if kids.is_empty() || role.is_some() {
            self.stamp(tree, node);
            return Outcome::Kept(node);
        }

        // 4. Unmarked wrapper: rewrite its children in place.
        let new_kids: Vec<NodeKey> = kids
            .iter()
            .enumerate()
            .map(|(index, &kid)| self.rewrite(tree, kid, index, found).key())
            .collect();
        tree.set_children(node, new_kids);
        self.stamp(tree, node);
        Outcome::Kept(node)
    }

    fn stamp(&mut self, tree: &mut Tree, key: NodeKey) {
        if let Some(data) = tree.get_mut(key) {
            data.key = Some(self.next_key);
            self.next_key += 1;
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
