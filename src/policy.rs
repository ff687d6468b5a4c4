//! Composition policy checks for composite parents.
//!
//! The format passes are total and never fail; what counts as misuse is a
//! per-parent policy. These helpers implement the shared taxonomy of
//! cardinality violations ("at most one Menu") and composition violations
//! ("only Buttons allowed") as `Result`s a composite propagates with `?`
//! during the render pass that discovers them. Misuse is a programming error:
//! there is no recovery path.

use crate::format::FoundChildren;
use crate::tree::NodeKey;

/// Errors raised by composite parents over a format pass result.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    /// More children of a role than the parent allows.
    #[error("at most one `{role}` child is allowed, found {found}")]
    TooMany { role: String, found: usize },
    /// A required role never matched.
    #[error("a `{role}` child is required")]
    Missing { role: String },
    /// Children outside the allowed set.
    #[error("`{parent}` accepts only {allowed} children, found {found} other node(s)")]
    Unexpected {
        parent: String,
        allowed: String,
        found: usize,
    },
}

/// At most one match of `role`: returns it, or `None` if the role never
/// matched.
pub fn at_most_one(
    found: &FoundChildren,
    role: &str,
) -> Result<Option<NodeKey>, CompositionError> {
    let bucket = found.matched(role);
    match bucket.len() {
        0 => Ok(None),
        1 => Ok(Some(bucket[0])),
        n => Err(CompositionError::TooMany {
            role: role.to_owned(),
            found: n,
        }),
    }
}

/// Exactly one match of `role`.
pub fn exactly_one(found: &FoundChildren, role: &str) -> Result<NodeKey, CompositionError> {
    at_most_one(found, role)?.ok_or_else(|| CompositionError::Missing {
        role: role.to_owned(),
    })
}

/// No unmatched children: everything must have landed in a bucket.
///
/// `parent` and `allowed` only feed the error message.
pub fn no_strays(
    found: &FoundChildren,
    parent: &str,
    allowed: &str,
) -> Result<(), CompositionError> {
    let strays = found.other().len();
    if strays == 0 {
        Ok(())
    } else {
        Err(CompositionError::Unexpected {
            parent: parent.to_owned(),
            allowed: allowed.to_owned(),
            found: strays,
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
