use crate::error::DfaError;
use crate::dfa::node::{DfaArc, DfaNode, DfaNodeId, DfaPush, ReductionRule};
use crate::token::TokenKind;
use std::collections::HashMap;

/// Which field of which node a deferred by-name reference will resolve
/// into, once the named node exists. The side table recording these is the
/// Rust realization of the "id-indexed edge list + side table of unresolved
/// by-name pushto references" redesign note (spec.md §9): resolution is a
/// single linear pass rather than a pointer fixed up at registration time.
enum DeferredSlot {
    Match { token: TokenKind },
    Push { token: TokenKind, return_to: DfaNodeId },
    DefaultTo,
    DefaultPush,
}

struct Deferred {
    node: DfaNodeId,
    slot: DeferredSlot,
    name: String,
}

/// An id-indexed arena of [`DfaNode`]s plus the deferred by-name reference
/// side table (spec.md §4.C).
#[derive(Default)]
pub struct DfaGraph {
    nodes: Vec<DfaNode>,
    by_name: HashMap<String, DfaNodeId>,
    deferred: Vec<Deferred>,
    error_handler: Option<DfaNodeId>,
}

impl DfaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// `dfa_newnode`.
    pub fn new_node(&mut self) -> DfaNodeId {
        let id = DfaNodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(DfaNode::default());
        id
    }

    /// `dfa_newnode_init`: a new node pre-registered under `name`.
    pub fn new_node_init(&mut self, name: impl Into<String>) -> DfaNodeId {
        let id = self.new_node();
        let name = name.into();
        self.nodes[id.raw() as usize].name = Some(name.clone());
        self.by_name.insert(name, id);
        id
    }

    /// `dfa_setname`: attach (or rename) a node's nonterminal name.
    pub fn set_name(&mut self, node: DfaNodeId, name: impl Into<String>) {
        let name = name.into();
        self.nodes[node.raw() as usize].name = Some(name.clone());
        self.by_name.insert(name, node);
    }

    /// `dfa_lookupbyname`.
    pub fn lookup_by_name(&self, name: &str) -> Option<DfaNodeId> {
        self.by_name.get(name).copied()
    }

    fn node_mut(&mut self, id: DfaNodeId) -> &mut DfaNode {
        &mut self.nodes[id.raw() as usize]
    }

    pub fn node(&self, id: DfaNodeId) -> &DfaNode {
        &self.nodes[id.raw() as usize]
    }

    /// `dfa_addmatch`: add a resolved match arc.
    pub fn add_match(&mut self, node: DfaNodeId, on: TokenKind, target: DfaNodeId) {
        self.node_mut(target).incoming += 1;
        self.node_mut(node).arcs.push(DfaArc { on, target });
    }

    /// A match arc whose target is only known by name so far; resolved by
    /// [`DfaGraph::resolve_deferred`].
    pub fn add_match_deferred(&mut self, node: DfaNodeId, on: TokenKind, target_name: impl Into<String>) {
        self.deferred.push(Deferred {
            node,
            slot: DeferredSlot::Match { token: on },
            name: target_name.into(),
        });
    }

    /// `dfa_addpush`: add a resolved push arc.
    pub fn add_push(&mut self, node: DfaNodeId, on: TokenKind, nonterminal: DfaNodeId, return_to: DfaNodeId) {
        self.node_mut(nonterminal).incoming += 1;
        self.node_mut(node).pushes.push(DfaPush {
            on,
            nonterminal,
            return_to,
        });
    }

    /// `dfa_matchpush`: push to a nonterminal only known by name so far.
    pub fn match_push_deferred(
        &mut self,
        node: DfaNodeId,
        on: TokenKind,
        nonterminal_name: impl Into<String>,
        return_to: DfaNodeId,
    ) {
        self.deferred.push(Deferred {
            node,
            slot: DeferredSlot::Push { token: on, return_to },
            name: nonterminal_name.into(),
        });
    }

    /// `dfa_defaultto`.
    pub fn default_to(&mut self, node: DfaNodeId, target: DfaNodeId) {
        self.node_mut(target).incoming += 1;
        self.node_mut(node).default_to = Some(target);
    }
    pub fn default_to_deferred(&mut self, node: DfaNodeId, target_name: impl Into<String>) {
        self.deferred.push(Deferred {
            node,
            slot: DeferredSlot::DefaultTo,
            name: target_name.into(),
        });
    }

    /// `dfa_defaultpush`.
    pub fn default_push(&mut self, node: DfaNodeId, target: DfaNodeId) {
        self.node_mut(target).incoming += 1;
        self.node_mut(node).default_push = Some(target);
    }
    pub fn default_push_deferred(&mut self, node: DfaNodeId, target_name: impl Into<String>) {
        self.deferred.push(Deferred {
            node,
            slot: DeferredSlot::DefaultPush,
            name: target_name.into(),
        });
    }

    /// `dfa_defaultreturn`: mark a node as reducing (popping the DFA state
    /// stack) when nothing else matches, rather than erroring.
    pub fn default_return(&mut self, node: DfaNodeId) {
        self.node_mut(node).default_return = true;
    }

    pub fn set_reduction(&mut self, node: DfaNodeId, reduction: ReductionRule) {
        self.node_mut(node).reduction = Some(reduction);
    }

    /// `dfa_seterrorhandler`.
    pub fn set_error_handler(&mut self, node: DfaNodeId) {
        self.error_handler = Some(node);
    }
    /// `dfa_geterrorhandler`.
    pub fn error_handler(&self) -> Option<DfaNodeId> {
        self.error_handler
    }

    /// `dfa_findmatch`.
    pub fn find_match(&self, node: DfaNodeId, token: TokenKind) -> Option<DfaNodeId> {
        self.node(node).find_match(token)
    }

    /// `dfa_clear_deferred`: drop all pending deferred references without
    /// resolving them (used when discarding a partially-built table).
    pub fn clear_deferred(&mut self) {
        self.deferred.clear();
    }

    /// `dfa_dumpdeferred`: list the still-unresolved references, for
    /// diagnostics.
    pub fn dump_deferred(&self) -> Vec<String> {
        self.deferred.iter().map(|d| d.name.clone()).collect()
    }

    /// `dfa_match_deferred`: resolve every deferred by-name reference in one
    /// linear pass now that all named nodes should exist. Returns an error
    /// naming every reference that still could not be resolved.
    pub fn resolve_deferred(&mut self) -> Result<(), DfaError> {
        let pending = std::mem::take(&mut self.deferred);
        let mut unresolved = Vec::new();

        for d in pending {
            match self.by_name.get(&d.name).copied() {
                Some(target) => {
                    self.node_mut(target).incoming += 1;
                    match d.slot {
                        DeferredSlot::Match { token } => {
                            self.node_mut(d.node).arcs.push(DfaArc { on: token, target });
                        }
                        DeferredSlot::Push { token, return_to } => {
                            self.node_mut(d.node).pushes.push(DfaPush {
                                on: token,
                                nonterminal: target,
                                return_to,
                            });
                        }
                        DeferredSlot::DefaultTo => {
                            self.node_mut(d.node).default_to = Some(target);
                        }
                        DeferredSlot::DefaultPush => {
                            self.node_mut(d.node).default_push = Some(target);
                        }
                    }
                }
                None => unresolved.push(d.name),
            }
        }

        if unresolved.is_empty() {
            Ok(())
        } else {
            Err(DfaError::UnresolvedDeferred {
                unresolved: unresolved.len(),
                names: unresolved,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_reference_resolves_once_target_is_named() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node();
        graph.add_match_deferred(start, TokenKind::Name, "expr");
        let expr = graph.new_node_init("expr");

        graph.resolve_deferred().unwrap();
        assert_eq!(graph.find_match(start, TokenKind::Name), Some(expr));
    }

    #[test]
    fn unresolved_reference_is_reported() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node();
        graph.add_match_deferred(start, TokenKind::Name, "missing");

        let err = graph.resolve_deferred().unwrap_err();
        match err {
            DfaError::UnresolvedDeferred { unresolved, .. } => assert_eq!(unresolved, 1),
            _ => panic!("wrong error variant"),
        }
    }
}
