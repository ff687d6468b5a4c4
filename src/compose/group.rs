//! Option group: value/handler injection into Radio descendants.
//!
//! The canonical deep-pass consumer. A group owns the current selection and a
//! change handler; every `Radio`-marked descendant, however deeply wrapped in
//! styling markup, is overloaded to know whether it is checked and how to
//! report a selection.

use crate::format::{deep_classify, ComponentMap, FoundChildren};
use crate::tree::{NodeData, NodeKey, Tree};
use crate::value::{Handler, Props, Value};

/// A selection group controlling `Radio`-marked descendants.
pub struct OptionGroup {
    name: String,
    value: Value,
    on_change: Handler,
}

impl OptionGroup {
    /// Create a group with the given name, current value, and change handler.
    pub fn new(name: impl Into<String>, value: impl Into<Value>, on_change: Handler) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            on_change,
        }
    }

    /// The group's name, shared with every overloaded radio.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deep-rewrite `children`, overloading every `Radio` descendant.
    ///
    /// Each overloaded radio receives the group `name`, a `checked` flag
    /// (whether its own `value` equals the group's current value), and the
    /// group's `on_change` handler.
    pub fn format(&self, tree: &mut Tree, children: &[NodeKey]) -> FoundChildren {
        let parent = Props::new()
            .with("name", self.name.clone())
            .with("value", self.value.clone())
            .with("on_change", self.on_change.clone());

        let map = ComponentMap::new().on("Radio", |tree, props, ctx| {
            let checked = props.get("value").is_some() && props.get("value") == ctx.get("value");
            let mut overloaded = props;
            overloaded.insert("checked", checked);
            if let Some(name) = ctx.get("name") {
                overloaded.insert("name", name.clone());
            }
            if let Some(on_change) = ctx.get("on_change") {
                overloaded.insert("on_change", on_change.clone());
            }
            tree.insert(NodeData::element("radio").with_props(overloaded))
        });

        deep_classify(tree, children, &map, parent)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
