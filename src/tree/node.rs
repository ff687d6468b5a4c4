//! Node types: `NodeKey`, `Kind`, `NodeData`, relay payload.

use std::fmt;
use std::rc::Rc;

use slotmap::new_key_type;

use crate::format::map::ComponentMap;
use crate::value::{Props, Value};

new_key_type! {
    /// Unique identifier for a tree node. Copy, lightweight (u64).
    pub struct NodeKey;
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// What a node fundamentally is: an element with a substrate name, or plain
/// text content.
///
/// The element name is the substrate's own identity ("div", "Radio") and is
/// never consulted for classification; only the declared role marker is.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// A named element.
    Element(String),
    /// Opaque text content. Text nodes carry no props and no role.
    Text(String),
}

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// Pass-through payload for wrapper components.
///
/// A component author attaches a `Relay` naming the roles the wrapper is
/// willing to forward to its own descendants. When a deep pass recognizes at
/// least one of those roles, it stamps its component map and parent props into
/// the payload instead of recursing; the wrapper's own later pass reads them
/// back via [`Relay::forwarded`] and runs the deferred rewrite itself.
#[derive(Clone)]
pub struct Relay {
    roles: Vec<String>,
    forwarded: Option<Forwarded>,
}

impl Relay {
    /// Declare a relay forwarding the given roles.
    pub fn new(roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            forwarded: None,
        }
    }

    /// The roles this relay is willing to forward.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether any of the declared roles appears in `map`.
    pub fn wants(&self, map: &ComponentMap) -> bool {
        self.roles.iter().any(|role| map.contains(role))
    }

    /// The stamped pass, if a deep rewrite has reached this relay.
    pub fn forwarded(&self) -> Option<&Forwarded> {
        self.forwarded.as_ref()
    }

    /// Stamp a pass into the payload. Called by the deep rewriter.
    pub(crate) fn forward(&mut self, map: ComponentMap, props: Rc<Props>) {
        self.forwarded = Some(Forwarded { map, props });
    }
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("roles", &self.roles)
            .field("forwarded", &self.forwarded.is_some())
            .finish()
    }
}

/// The component map and parent props a deep pass left behind on a relay.
#[derive(Clone)]
pub struct Forwarded {
    map: ComponentMap,
    props: Rc<Props>,
}

impl Forwarded {
    /// The forwarded component map.
    pub fn map(&self) -> &ComponentMap {
        &self.map
    }

    /// The forwarded parent props.
    pub fn props(&self) -> &Props {
        &self.props
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Data associated with a single tree node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Element name or text content.
    pub kind: Kind,
    /// Optional role marker: the classification identity a format pass reads.
    pub role: Option<String>,
    /// Optional relay payload for pass-through wrappers.
    pub relay: Option<Relay>,
    /// The props bag.
    pub props: Props,
    /// Synthetic reconciliation key, assigned by format passes.
    pub key: Option<u64>,
}

impl NodeData {
    /// Create an element node with the given substrate name.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            kind: Kind::Element(name.into()),
            role: None,
            relay: None,
            props: Props::new(),
            key: None,
        }
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: Kind::Text(content.into()),
            role: None,
            relay: None,
            props: Props::new(),
            key: None,
        }
    }

    /// Declare the role marker (builder).
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Attach a relay payload (builder).
    pub fn with_relay(mut self, relay: Relay) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Set a single prop (builder).
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name, value);
        self
    }

    /// Replace the whole props bag (builder).
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// The element name, if this is an element.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            Kind::Element(name) => Some(name),
            Kind::Text(_) => None,
        }
    }

    /// The text content, if this is a text node.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            Kind::Text(content) => Some(content),
            Kind::Element(_) => None,
        }
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.kind, Kind::Text(_))
    }

    /// The declared role marker, if any. Text nodes never have one.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
