//! Name scoping (spec.md §3's `Name` registry, recovered from
//! `include/prescope.h`'s `scopein`/`scopeout` phases): a stack of scope
//! frames giving passes a concrete `scope_enter`/`scope_leave`/
//! `scope_declare`/`scope_lookup` API rather than leaving scope handling
//! entirely to per-language passes.

use crate::token::Origin;
use crate::tree::NodeId;
use std::collections::HashMap;

/// A declared name: the node that introduced it and where.
#[derive(Debug, Clone)]
pub struct NameEntry {
    pub node: NodeId,
    pub origin: Origin,
}

#[derive(Debug, Default)]
struct ScopeFrame {
    declarations: HashMap<String, NameEntry>,
}

/// Stack of lexical scope frames shared by every pass that needs name
/// resolution. One `Scope` is threaded alongside the `PassContext` of the
/// tree being walked; it is not part of the tree itself, since scoping is a
/// pass-time concern, not a structural one.
#[derive(Debug, Default)]
pub struct Scope {
    frames: Vec<ScopeFrame>,
}

impl Scope {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// `scope_enter`: push a fresh, empty frame.
    pub fn scope_enter(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// `scope_leave`: pop the innermost frame. A no-op returning `false` if
    /// there is nothing to pop, rather than panicking — callers that mis-pair
    /// enter/leave calls get a signal instead of a crash.
    pub fn scope_leave(&mut self) -> bool {
        self.frames.pop().is_some()
    }

    /// `scope_declare`: bind `name` in the innermost frame. Returns the
    /// previous binding in this same frame, if any (a redeclaration in the
    /// same scope, which callers typically treat as an error).
    pub fn scope_declare(
        &mut self,
        name: impl Into<String>,
        node: NodeId,
        origin: Origin,
    ) -> Option<NameEntry> {
        let frame = self
            .frames
            .last_mut()
            .expect("scope_declare called with no active scope frame");
        frame.declarations.insert(name.into(), NameEntry { node, origin })
    }

    /// `scope_lookup`: search frames from innermost to outermost.
    pub fn scope_lookup(&self, name: &str) -> Option<&NameEntry> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.declarations.get(name))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeId;

    #[test]
    fn inner_scope_shadows_outer() {
        let mut scope = Scope::new();
        scope.scope_enter();
        scope.scope_declare("x", NodeId::from_raw(1), Origin::Synthetic);
        scope.scope_enter();
        scope.scope_declare("x", NodeId::from_raw(2), Origin::Synthetic);

        assert_eq!(scope.scope_lookup("x").unwrap().node, NodeId::from_raw(2));
        scope.scope_leave();
        assert_eq!(scope.scope_lookup("x").unwrap().node, NodeId::from_raw(1));
        scope.scope_leave();
        assert!(scope.scope_lookup("x").is_none());
    }
}
