use crate::token::Origin;
use crate::tree::{NodeId, Tree};

/// What a single pass function receives: the part of the global compile
/// context relevant to tree-rewriting passes, threaded explicitly rather
/// than read from ambient global state (spec.md §9's "explicitly-threaded
/// global compile context" redesign note).
pub struct PassContext<'t> {
    pub tree: &'t mut Tree,
    pub root: NodeId,
    /// 0-indexed position of the currently running pass within its list,
    /// used by [`super::treecheck::TreeChecker`] to evaluate node-tag
    /// pass bounds.
    pub pass_index: usize,
    pub errors: Vec<(Origin, String)>,
    pub warnings: Vec<(Origin, String)>,
}

impl<'t> PassContext<'t> {
    pub fn new(tree: &'t mut Tree, root: NodeId, pass_index: usize) -> Self {
        Self {
            tree,
            root,
            pass_index,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn report_error(&mut self, origin: Origin, message: impl Into<String>) {
        self.errors.push((origin, message.into()));
    }
    pub fn report_warning(&mut self, origin: Origin, message: impl Into<String>) {
        self.warnings.push((origin, message.into()));
    }
}
