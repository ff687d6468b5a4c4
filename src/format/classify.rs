//! Shallow classification: one pass over an immediate child list.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::tree::{NodeKey, Tree};
use crate::value::Props;

use super::context::Tally;
use super::found::FoundChildren;
use super::map::ComponentMap;

/// Classify a parent's immediate children against a component map.
///
/// Walks `children` in order. A child whose declared role appears in `map` is
/// replaced: its renderer is invoked with the child's original props and a
/// fresh [`ParentContext`](super::context::ParentContext) carrying
/// `parent_props`, and the produced node lands in both the rebuilt sequence
/// and that role's bucket. Every other child (unmarked, text, or carrying an
/// unrecognized role) passes through untouched into the rebuilt sequence and
/// the "other" bucket.
///
/// Every node in the rebuilt sequence gets a synthetic key derived from its
/// position, so substrate reconciliation keeps per-node state when unrelated
/// props change between renders.
///
/// This is a total function: it classifies anything, raises nothing, and
/// leaves cardinality/composition policy to the caller (see
/// [`policy`](crate::policy)).
pub fn classify(
    tree: &mut Tree,
    children: &[NodeKey],
    map: &ComponentMap,
    parent_props: Props,
) -> FoundChildren {
    let props = Rc::new(parent_props);
    let mut tally = Tally::new();
    let mut found = FoundChildren::new();

    for (index, &child) in children.iter().enumerate() {
        tally.visit();

        let role = tree.get(child).and_then(|data| data.role.clone());
        let renderer = role.as_deref().and_then(|r| map.get(r)).cloned();

        match (role, renderer) {
            (Some(role), Some(renderer)) => {
                let ctx = tally.context(&role, index, Rc::clone(&props));
                let original = tree
                    .get(child)
                    .map(|data| data.props.clone())
                    .unwrap_or_default();
                trace!(index, role = %role, "replacing matched child");
                let replaced = renderer(tree, original, &ctx);
                if let Some(data) = tree.get_mut(replaced) {
                    data.key = Some(index as u64);
                }
                found.push_matched(&role, replaced, ctx);
                found.push_rebuilt(replaced);
            }
            _ => {
                if let Some(data) = tree.get_mut(child) {
                    data.key = Some(index as u64);
                }
                found.push_other(child);
                found.push_rebuilt(child);
            }
        }
    }

    debug!(
        children = children.len(),
        matched = found.matched_len(),
        other = found.other().len(),
        "classified children"
    );
    found
}

// ===========================================================================
// Tests
// ===========================================================================
