use crate::dfa::graph::DfaGraph;
use crate::error::DfaError;
use crate::token::TokenKind;
use std::collections::HashMap;

/// One textual rule contributed by a langdef's BNF-like grammar section,
/// before it has been built into actual [`crate::dfa::DfaNode`]s. This is
/// the intermediate form `dfa_mergetables` operates on: grammar text is
/// decoded into a flat op list per nonterminal, lists from different
/// langdef sections are merged, and only then is the merged list turned
/// into a real graph by [`DfaTbl::build`].
#[derive(Debug, Clone)]
pub enum TblOp {
    Match { on: TokenKind, target: String },
    /// Push `nonterminal` and resume in this same state once it reduces.
    /// One DFA node per nonterminal is a simplification over the general
    /// form (which can resume at an arbitrary sibling state); every rule
    /// built by [`DfaTbl::build`] is single-state, so "resume here" is the
    /// only resumption a flat rule list can express.
    Push { on: TokenKind, nonterminal: String },
    DefaultTo(String),
    DefaultPush(String),
    DefaultReturn,
    Reduce { name: String, arg: Option<i64> },
}

#[derive(Debug, Clone, Default)]
struct Entry {
    ops: Vec<TblOp>,
    replace: bool,
}

/// A nonterminal-name-keyed table of [`TblOp`] lists, merged across
/// however many langdef sections contribute to one grammar before being
/// built into a [`DfaGraph`].
#[derive(Debug, Clone, Default)]
pub struct DfaTbl {
    by_name: HashMap<String, Entry>,
    order: Vec<String>,
}

impl DfaTbl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one nonterminal's rule body. `replace` mirrors a langdef's `:=!`
    /// override form: a later `add_rule` for the same name with
    /// `replace = true` discards whatever was registered before it rather
    /// than appending to it.
    pub fn add_rule(&mut self, name: impl Into<String>, ops: Vec<TblOp>, replace: bool) {
        let name = name.into();
        let entry = self.by_name.entry(name.clone()).or_insert_with(|| {
            self.order.push(name.clone());
            Entry::default()
        });
        if replace {
            entry.ops = ops;
            entry.replace = true;
        } else {
            entry.ops.extend(ops);
        }
    }

    /// `dfa_mergetables`: fold `other`'s rules into `self`, preserving BNF
    /// alternative priority order (earlier-registered alternatives are
    /// tried first by [`crate::dfa::DfaNode::find_match`]'s first-match-wins
    /// semantics). A name marked `replace` in `other` overrides `self`'s
    /// entry outright instead of concatenating onto it; a name present in
    /// both tables without either side marked `replace` is a conflict.
    pub fn merge(&mut self, other: DfaTbl) -> Result<(), DfaError> {
        for name in other.order {
            let incoming = other.by_name.get(&name).cloned().unwrap_or_default();
            match self.by_name.get_mut(&name) {
                Some(existing) => {
                    if incoming.replace {
                        *existing = incoming;
                    } else if existing.replace {
                        // existing already overrides; incoming alternatives lose.
                    } else {
                        existing.ops.extend(incoming.ops);
                    }
                }
                None => {
                    self.order.push(name.clone());
                    self.by_name.insert(name, incoming);
                }
            }
        }
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `dfa_tbltodfa`: construct real DFA nodes for every nonterminal named
    /// in this table and wire up their arcs. By-name references are
    /// registered as deferred and must be resolved afterwards with
    /// [`DfaGraph::resolve_deferred`], since a forward reference to a
    /// nonterminal appearing later in `order` would otherwise be unbuildable
    /// in one pass.
    pub fn build(&self, graph: &mut DfaGraph) {
        for name in &self.order {
            if graph.lookup_by_name(name).is_none() {
                graph.new_node_init(name.clone());
            }
        }

        for name in &self.order {
            let node = graph.lookup_by_name(name).expect("just registered above");
            let entry = &self.by_name[name];
            for op in &entry.ops {
                match op {
                    TblOp::Match { on, target } => graph.add_match_deferred(node, *on, target.clone()),
                    TblOp::Push { on, nonterminal } => {
                        graph.match_push_deferred(node, *on, nonterminal.clone(), node)
                    }
                    TblOp::DefaultTo(target) => graph.default_to_deferred(node, target.clone()),
                    TblOp::DefaultPush(target) => graph.default_push_deferred(node, target.clone()),
                    TblOp::DefaultReturn => graph.default_return(node),
                    TblOp::Reduce { name, arg } => graph.set_reduction(
                        node,
                        crate::dfa::node::ReductionRule {
                            name: name.clone(),
                            arg: *arg,
                        },
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmarked_conflicting_rules_concatenate_preserving_order() {
        let mut a = DfaTbl::new();
        a.add_rule("expr", vec![TblOp::Match { on: TokenKind::Name, target: "a".into() }], false);
        let mut b = DfaTbl::new();
        b.add_rule("expr", vec![TblOp::Match { on: TokenKind::Integer, target: "b".into() }], false);

        a.merge(b).unwrap();
        let entry = &a.by_name["expr"];
        assert_eq!(entry.ops.len(), 2);
    }

    #[test]
    fn replace_rule_discards_prior_alternatives() {
        let mut a = DfaTbl::new();
        a.add_rule("expr", vec![TblOp::Match { on: TokenKind::Name, target: "a".into() }], false);
        let mut b = DfaTbl::new();
        b.add_rule("expr", vec![TblOp::Match { on: TokenKind::Integer, target: "b".into() }], true);

        a.merge(b).unwrap();
        let entry = &a.by_name["expr"];
        assert_eq!(entry.ops.len(), 1);
    }

    #[test]
    fn build_registers_every_nonterminal_and_resolves_forward_refs() {
        let mut tbl = DfaTbl::new();
        tbl.add_rule(
            "start",
            vec![TblOp::Match { on: TokenKind::Name, target: "expr".into() }],
            false,
        );
        tbl.add_rule("expr", vec![TblOp::DefaultReturn], false);

        let mut graph = DfaGraph::new();
        tbl.build(&mut graph);
        graph.resolve_deferred().unwrap();

        let start = graph.lookup_by_name("start").unwrap();
        let expr = graph.lookup_by_name("expr").unwrap();
        assert_eq!(graph.find_match(start, TokenKind::Name), Some(expr));
    }
}
