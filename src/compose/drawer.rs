//! Drawer: a panel that docks at most one immediate Menu.

use crate::format::{classify, ComponentMap};
use crate::policy::{at_most_one, CompositionError};
use crate::tree::{NodeData, NodeKey, Tree};
use crate::value::Props;

/// A sliding panel. Accepts arbitrary children plus at most one immediate
/// `Menu`-marked child, which is pulled out of the flow and docked.
pub struct Drawer {
    open: bool,
}

/// What a drawer renders: the docked menu (if any) and the inline children.
#[derive(Debug)]
pub struct DrawerParts {
    /// The overloaded menu, extracted from the flow.
    pub menu: Option<NodeKey>,
    /// The remaining children, in original order.
    pub children: Vec<NodeKey>,
}

impl Drawer {
    /// Create a drawer with the given open state.
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    /// Classify `children`, overloading and extracting the docked menu.
    ///
    /// # Errors
    ///
    /// [`CompositionError::TooMany`] if more than one immediate child carries
    /// the `Menu` role.
    pub fn format(
        &self,
        tree: &mut Tree,
        children: &[NodeKey],
    ) -> Result<DrawerParts, CompositionError> {
        let map = ComponentMap::new().on("Menu", |tree, props, ctx| {
            let mut overloaded = props;
            overloaded.insert("docked", true);
            if let Some(open) = ctx.get("open") {
                overloaded.insert("open", open.clone());
            }
            tree.insert(NodeData::element("menu").with_props(overloaded))
        });

        let mut found = classify(tree, children, &map, Props::new().with("open", self.open));
        let menu = at_most_one(&found, "Menu")?;
        found.extract(&["Menu"]);
        Ok(DrawerParts {
            menu,
            children: found.children().to_vec(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
