//! Button group: a strict composite that accepts only Button children.

use crate::format::{classify, ComponentMap};
use crate::policy::{no_strays, CompositionError};
use crate::tree::{NodeData, NodeKey, Tree};
use crate::value::Props;

/// A horizontal run of buttons sharing group styling and disabled state.
///
/// Any non-`Button` child is a composition violation.
pub struct ButtonGroup {
    disabled: bool,
}

impl ButtonGroup {
    /// Create an enabled button group.
    pub fn new() -> Self {
        Self { disabled: false }
    }

    /// Set the disabled flag (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Classify `children`, overloading every button with group context.
    ///
    /// # Errors
    ///
    /// [`CompositionError::Unexpected`] if any child is not `Button`-marked.
    pub fn format(
        &self,
        tree: &mut Tree,
        children: &[NodeKey],
    ) -> Result<Vec<NodeKey>, CompositionError> {
        let map = ComponentMap::new().on("Button", |tree, props, ctx| {
            let mut overloaded = props;
            overloaded.insert("grouped", true);
            overloaded.insert("position", ctx.child_type_index());
            if let Some(disabled) = ctx.get("disabled") {
                overloaded.insert("disabled", disabled.clone());
            }
            tree.insert(NodeData::element("button").with_props(overloaded))
        });

        let found = classify(
            tree,
            children,
            &map,
            Props::new().with("disabled", self.disabled),
        );
        no_strays(&found, "ButtonGroup", "Button")?;
        Ok(found.children().to_vec())
    }
}

impl Default for ButtonGroup {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
