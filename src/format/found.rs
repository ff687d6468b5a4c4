//! The result of a format pass: rebuilt sequence, buckets, extraction.

use std::collections::BTreeMap;

use slotmap::SecondaryMap;

use crate::tree::NodeKey;

use super::context::ParentContext;

/// Empty slice constant for missing buckets.
const EMPTY_BUCKET: &[NodeKey] = &[];

/// Role → extracted node sequence, as returned by [`FoundChildren::extract`].
pub type Extracted = BTreeMap<String, Vec<NodeKey>>;

/// What a format pass found.
///
/// Holds the complete rebuilt sibling sequence (order-preserving relative to
/// the input), per-role buckets of matched, rewritten nodes, the "other"
/// bucket of untouched nodes, and the parent context injected into each
/// matched node.
#[derive(Debug, Default)]
pub struct FoundChildren {
    rebuilt: Vec<NodeKey>,
    buckets: BTreeMap<String, Vec<NodeKey>>,
    other: Vec<NodeKey>,
    contexts: SecondaryMap<NodeKey, ParentContext>,
}

impl FoundChildren {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_rebuilt(&mut self, key: NodeKey) {
        self.rebuilt.push(key);
    }

    pub(crate) fn push_matched(&mut self, role: &str, key: NodeKey, ctx: ParentContext) {
        self.buckets.entry(role.to_owned()).or_default().push(key);
        self.contexts.insert(key, ctx);
    }

    pub(crate) fn push_other(&mut self, key: NodeKey) {
        self.other.push(key);
    }

    /// The complete rebuilt sibling sequence, ready to render.
    pub fn children(&self) -> &[NodeKey] {
        &self.rebuilt
    }

    /// The matched, rewritten nodes of a role, in input order. Empty if the
    /// role never matched or was already extracted.
    pub fn matched(&self, role: &str) -> &[NodeKey] {
        self.buckets
            .get(role)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_BUCKET)
    }

    /// Whether at least one node of the given role matched (and has not been
    /// extracted).
    pub fn has(&self, role: &str) -> bool {
        !self.matched(role).is_empty()
    }

    /// The unmatched nodes, in original relative order.
    pub fn other(&self) -> &[NodeKey] {
        &self.other
    }

    /// The roles that currently hold a bucket, in name order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// The parent context that was injected into a matched node.
    pub fn context(&self, key: NodeKey) -> Option<&ParentContext> {
        self.contexts.get(key)
    }

    /// Total number of matched nodes across all buckets.
    pub fn matched_len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Remove the named role buckets from the rebuilt sequence and return
    /// them.
    ///
    /// Extraction never re-scans nodes removed by an earlier call, and
    /// extracting the same role twice is a no-op that returns nothing. The
    /// extracted nodes themselves (and their contexts) are untouched.
    pub fn extract(&mut self, roles: &[&str]) -> Extracted {
        let mut out = Extracted::new();
        for &role in roles {
            if let Some(bucket) = self.buckets.remove(role) {
                out.insert(role.to_owned(), bucket);
            }
        }
        if !out.is_empty() {
            let gone: Vec<NodeKey> = out.values().flatten().copied().collect();
            self.rebuilt.retain(|key| !gone.contains(key));
        }
        out
    }

    /// Extract a single role, returning its bucket (empty if the role never
    /// matched or was already extracted).
    pub fn extract_one(&mut self, role: &str) -> Vec<NodeKey> {
        self.extract(&[role]).remove(role).unwrap_or_default()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::format::context::Tally;
    use crate::tree::{NodeData, Tree};
    use crate::value::Props;

    use super::*;

    fn keyed(tree: &mut Tree, n: usize) -> Vec<NodeKey> {
        (0..n).map(|_| tree.insert(NodeData::element("x"))).collect()
    }

    fn ctx(tally: &mut Tally, role: &str, index: usize) -> ParentContext {
        tally.context(role, index, Rc::new(Props::new()))
    }

    #[test]
    fn empty_result() {
        let found = FoundChildren::new();
        assert!(found.children().is_empty());
        assert!(found.other().is_empty());
        assert!(found.matched("Header").is_empty());
        assert!(!found.has("Header"));
        assert_eq!(found.matched_len(), 0);
        assert_eq!(found.roles().count(), 0);
    }

    #[test]
    fn buckets_accumulate_in_order() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 3);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        for (i, &k) in keys.iter().enumerate() {
            let c = ctx(&mut tally, "Radio", i);
            found.push_matched("Radio", k, c);
            found.push_rebuilt(k);
        }
        assert_eq!(found.matched("Radio"), keys.as_slice());
        assert_eq!(found.children(), keys.as_slice());
        assert!(found.has("Radio"));
        assert_eq!(found.matched_len(), 3);
    }

    #[test]
    fn context_lookup() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 2);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        found.push_matched("Radio", keys[0], ctx(&mut tally, "Radio", 0));
        found.push_matched("Radio", keys[1], ctx(&mut tally, "Radio", 1));
        assert_eq!(found.context(keys[0]).unwrap().child_type_index(), 0);
        assert_eq!(found.context(keys[1]).unwrap().child_type_index(), 1);
    }

    #[test]
    fn extract_removes_from_rebuilt() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 3);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        found.push_matched("Header", keys[0], ctx(&mut tally, "Header", 0));
        found.push_rebuilt(keys[0]);
        found.push_other(keys[1]);
        found.push_rebuilt(keys[1]);
        found.push_matched("Footer", keys[2], ctx(&mut tally, "Footer", 2));
        found.push_rebuilt(keys[2]);

        let extracted = found.extract(&["Header", "Footer"]);
        assert_eq!(extracted["Header"], vec![keys[0]]);
        assert_eq!(extracted["Footer"], vec![keys[2]]);
        assert_eq!(found.children(), &[keys[1]]);
        assert!(!found.has("Header"));
        assert!(!found.has("Footer"));
    }

    #[test]
    fn double_extract_is_noop() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 1);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        found.push_matched("Header", keys[0], ctx(&mut tally, "Header", 0));
        found.push_rebuilt(keys[0]);

        let first = found.extract(&["Header"]);
        assert_eq!(first.len(), 1);
        let second = found.extract(&["Header"]);
        assert!(second.is_empty());
    }

    #[test]
    fn extract_unknown_role_returns_nothing() {
        let mut found = FoundChildren::new();
        assert!(found.extract(&["Header"]).is_empty());
    }

    #[test]
    fn extract_keeps_contexts_alive() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 1);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        found.push_matched("Header", keys[0], ctx(&mut tally, "Header", 0));
        found.push_rebuilt(keys[0]);
        found.extract(&["Header"]);
        // The extracted node's context is still queryable.
        assert!(found.context(keys[0]).is_some());
    }

    #[test]
    fn extract_one_convenience() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 2);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        found.push_matched("Menu", keys[0], ctx(&mut tally, "Menu", 0));
        found.push_rebuilt(keys[0]);
        found.push_matched("Menu", keys[1], ctx(&mut tally, "Menu", 1));
        found.push_rebuilt(keys[1]);

        assert_eq!(found.extract_one("Menu"), keys);
        assert!(found.extract_one("Menu").is_empty());
        assert!(found.children().is_empty());
    }

    #[test]
    fn roles_in_name_order() {
        let mut tree = Tree::new();
        let keys = keyed(&mut tree, 2);
        let mut tally = Tally::new();
        let mut found = FoundChildren::new();
        found.push_matched("Zeta", keys[0], ctx(&mut tally, "Zeta", 0));
        found.push_matched("Alpha", keys[1], ctx(&mut tally, "Alpha", 1));
        let roles: Vec<&str> = found.roles().collect();
        assert_eq!(roles, vec!["Alpha", "Zeta"]);
    }
}
