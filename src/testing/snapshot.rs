//! Snapshot rendering helpers.
//!
//! Functions for converting a node tree into a plain-text outline suitable
//! for snapshot testing and assertions. One node per line, children indented
//! two spaces. Elements print their substrate name, role marker (bracketed),
//! and props (name-ordered); text nodes print quoted. Synthetic keys are
//! deliberately omitted so snapshots stay stable across unrelated passes.

use std::fmt::Write as _;

use crate::tree::{NodeKey, Tree};
use crate::value::Value;

/// Render the subtree rooted at `root` as a plain-text outline.
///
/// # Examples
///
/// ```ignore
/// use slotted::testing::tree_to_string;
///
/// let outline = tree_to_string(&tree, root);
/// assert!(outline.contains("[Radio]"));
/// ```
pub fn tree_to_string(tree: &Tree, root: NodeKey) -> String {
    let mut out = String::new();
    write_node(tree, root, 0, &mut out);
    out.trim_end().to_owned()
}

fn write_node(tree: &Tree, node: NodeKey, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(data) = tree.get(node) else {
        let _ = writeln!(out, "{indent}<missing>");
        return;
    };

    match data.text_content() {
        Some(text) => {
            let _ = writeln!(out, "{indent}\"{text}\"");
        }
        None => {
            let name = data.name().unwrap_or("?");
            let _ = write!(out, "{indent}{name}");
            if let Some(role) = data.role() {
                let _ = write!(out, " [{role}]");
            }
            if !data.props.is_empty() {
                let entries: Vec<String> = data
                    .props
                    .iter()
                    .map(|(k, v)| format!("{k}={}", fmt_value(v)))
                    .collect();
                let _ = write!(out, " {{{}}}", entries.join(", "));
            }
            out.push('\n');
            for &child in tree.children(node) {
                write_node(tree, child, depth + 1, out);
            }
        }
    }
}

fn fmt_value(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("\"{s}\""),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(fmt_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Handler(_) => "fn".to_owned(),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
