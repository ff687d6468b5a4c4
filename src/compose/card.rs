//! Card: fixed header/footer slots around free-form body children.

use crate::format::{classify, ComponentMap};
use crate::policy::{at_most_one, CompositionError};
use crate::tree::{NodeData, NodeKey, Tree};
use crate::value::Props;

/// A panel with optional header and footer slots.
///
/// At most one `Header`- and one `Footer`-marked child are pulled out of the
/// flow and rendered in fixed layout slots; everything else stays inline as
/// the body.
pub struct Card;

/// A card's resolved layout.
#[derive(Debug)]
pub struct CardLayout {
    /// The header slot, if a `Header` child was supplied.
    pub header: Option<NodeKey>,
    /// The footer slot, if a `Footer` child was supplied.
    pub footer: Option<NodeKey>,
    /// The inline body, in original order.
    pub body: Vec<NodeKey>,
}

impl Card {
    /// Split `children` into header/footer slots and inline body.
    ///
    /// # Errors
    ///
    /// [`CompositionError::TooMany`] if more than one `Header` or more than
    /// one `Footer` child is supplied.
    pub fn split(tree: &mut Tree, children: &[NodeKey]) -> Result<CardLayout, CompositionError> {
        let map = ComponentMap::new()
            .on("Header", |tree, props, _ctx| {
                tree.insert(NodeData::element("header").with_props(props))
            })
            .on("Footer", |tree, props, _ctx| {
                tree.insert(NodeData::element("footer").with_props(props))
            });

        let mut found = classify(tree, children, &map, Props::new());
        let header = at_most_one(&found, "Header")?;
        let footer = at_most_one(&found, "Footer")?;
        found.extract(&["Header", "Footer"]);
        Ok(CardLayout {
            header,
            footer,
            body: found.children().to_vec(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
