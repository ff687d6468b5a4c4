//! Component map: role → replacement renderer.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::tree::{NodeKey, Tree};
use crate::value::Props;

use super::context::ParentContext;

/// A replacement renderer: builds the overloaded node for one matched child.
///
/// Receives the arena, the matched node's original props (marker bookkeeping
/// already stripped), and the injected parent context. Returns the key of the
/// node it built. The renderer owns whatever happens to the matched node's
/// subtree; format passes never descend into its result.
pub type Renderer = Rc<dyn Fn(&mut Tree, Props, &ParentContext) -> NodeKey>;

/// Mapping from role marker to replacement renderer.
///
/// Supplied fresh by each parent invocation; roles are unique and order is
/// irrelevant. Cheap to clone (renderers are shared), so a map can be stashed
/// in a relay payload.
#[derive(Clone, Default)]
pub struct ComponentMap {
    entries: HashMap<String, Renderer>,
}

impl ComponentMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer for a role (builder). Replaces any previous
    /// renderer under the same role.
    pub fn on(
        mut self,
        role: impl Into<String>,
        renderer: impl Fn(&mut Tree, Props, &ParentContext) -> NodeKey + 'static,
    ) -> Self {
        self.entries.insert(role.into(), Rc::new(renderer));
        self
    }

    /// Look up the renderer for a role.
    pub fn get(&self, role: &str) -> Option<&Renderer> {
        self.entries.get(role)
    }

    /// Whether a role is recognized.
    pub fn contains(&self, role: &str) -> bool {
        self.entries.contains_key(role)
    }

    /// Number of registered roles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the registered roles (arbitrary order).
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for ComponentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut roles: Vec<&str> = self.roles().collect();
        roles.sort_unstable();
        f.debug_struct("ComponentMap").field("roles", &roles).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
