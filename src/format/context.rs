//! Parent-prop bookkeeping: `ParentContext` and the per-pass tally.
//!
//! Both format passes build one `ParentContext` per matched child. The context
//! merges the caller's domain props with position bookkeeping and lazy size
//! accessors. The accessors are closures over counters owned by the pass, not
//! precomputed values: read from inside a replacement renderer (mid-pass) they
//! report the counts seen so far; read after the pass completes they report
//! the final totals. Renderers that need the final total must defer the read.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::{Props, Value};

// ---------------------------------------------------------------------------
// ParentContext
// ---------------------------------------------------------------------------

/// The read-only bag a format pass injects into each matched child.
///
/// Cheap to clone; renderers may move clones into the nodes they build.
#[derive(Clone)]
pub struct ParentContext {
    child_index: usize,
    child_type_index: usize,
    total: Rc<Cell<usize>>,
    same_role: Rc<Cell<usize>>,
    props: Rc<Props>,
}

impl ParentContext {
    /// Position of this child within its immediate sibling list (0-based).
    pub fn child_index(&self) -> usize {
        self.child_index
    }

    /// Position of this child among siblings sharing its role (0-based).
    pub fn child_type_index(&self) -> usize {
        self.child_type_index
    }

    /// Number of siblings the pass has visited. Final only after the pass
    /// completes.
    pub fn sibling_count(&self) -> usize {
        self.total.get()
    }

    /// Number of same-role matches the pass has seen. Final only after the
    /// pass completes.
    pub fn role_count(&self) -> usize {
        self.same_role.get()
    }

    /// The caller-supplied parent props.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Look up a caller-supplied parent prop by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }
}

impl std::fmt::Debug for ParentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParentContext")
            .field("child_index", &self.child_index)
            .field("child_type_index", &self.child_type_index)
            .field("sibling_count", &self.total.get())
            .field("role_count", &self.same_role.get())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Per-pass counters backing the lazy accessors.
///
/// One `Tally` lives for the duration of a single format pass. Every context
/// built by the pass shares the same counter cells, which is what makes the
/// accessors lazy: late reads observe later increments.
pub(crate) struct Tally {
    total: Rc<Cell<usize>>,
    by_role: HashMap<String, Rc<Cell<usize>>>,
}

impl Tally {
    pub(crate) fn new() -> Self {
        Self {
            total: Rc::new(Cell::new(0)),
            by_role: HashMap::new(),
        }
    }

    /// Record one visited sibling (shallow) or node (deep).
    pub(crate) fn visit(&mut self) {
        self.total.set(self.total.get() + 1);
    }

    /// Build the context for a matched child of `role` at `child_index`,
    /// bumping the role counter.
    ///
    /// `child_type_index` is the counter value before the bump, so N matches
    /// of one role receive exactly 0..N-1 in visit order.
    pub(crate) fn context(
        &mut self,
        role: &str,
        child_index: usize,
        props: Rc<Props>,
    ) -> ParentContext {
        let same_role = self
            .by_role
            .entry(role.to_owned())
            .or_insert_with(|| Rc::new(Cell::new(0)));
        let child_type_index = same_role.get();
        same_role.set(child_type_index + 1);
        ParentContext {
            child_index,
            child_type_index,
            total: Rc::clone(&self.total),
            same_role: Rc::clone(same_role),
            props,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
