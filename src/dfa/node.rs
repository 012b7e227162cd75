use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DfaNodeId(u32);

impl DfaNodeId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// A reduction rule fired when the walker backs out of a node that carries
/// one: builds a tree node from whatever the parser substrate has
/// accumulated since the matching nonterminal was entered. `arg` is the
/// reduction's opaque numeric argument (e.g. a node-tag short id), mirroring
/// the original's "reduction + opaque arg" pairing.
#[derive(Debug, Clone)]
pub struct ReductionRule {
    pub name: String,
    pub arg: Option<i64>,
}

/// A single outgoing match arc: on seeing `on`, transition straight to
/// `target` within the same DFA.
#[derive(Debug, Clone, Copy)]
pub struct DfaArc {
    pub on: TokenKind,
    pub target: DfaNodeId,
}

/// A "push" arc: on seeing `on`, push `nonterminal`'s start node onto the
/// parser's DFA-state stack and resume at `return_to` once that nonterminal
/// reduces — the substrate's subroutine-call mechanism for nested grammar.
#[derive(Debug, Clone, Copy)]
pub struct DfaPush {
    pub on: TokenKind,
    pub nonterminal: DfaNodeId,
    pub return_to: DfaNodeId,
}

/// One node of a DFA graph: parallel match/push arc lists, optional
/// defaults, and an optional reduction fired on return. Incoming-edge count
/// is tracked so a langdef reload can tell whether a node is still
/// reachable before discarding it.
#[derive(Debug, Clone, Default)]
pub struct DfaNode {
    pub name: Option<String>,
    pub arcs: Vec<DfaArc>,
    pub pushes: Vec<DfaPush>,
    pub default_to: Option<DfaNodeId>,
    pub default_push: Option<DfaNodeId>,
    pub default_return: bool,
    pub reduction: Option<ReductionRule>,
    pub incoming: u32,
}

impl DfaNode {
    /// `dfa_findmatch`: first-match-wins over arcs in insertion order.
    pub fn find_match(&self, token: TokenKind) -> Option<DfaNodeId> {
        self.arcs.iter().find(|arc| arc.on == token).map(|arc| arc.target)
    }

    pub fn find_push(&self, token: TokenKind) -> Option<DfaPush> {
        self.pushes.iter().find(|p| p.on == token).copied()
    }
}
