use crate::dfa::graph::DfaGraph;
use crate::dfa::node::DfaNodeId;
use crate::error::DfaError;
use crate::token::TokenKind;

/// What the walker needs from whatever is feeding it tokens. Kept as a
/// trait rather than a hard dependency on the parser substrate's token
/// stream, so the DFA module stays usable standalone (e.g. from tests, or
/// a future tool that only wants to run a grammar over raw tokens).
pub trait TokenSource {
    fn peek(&self) -> TokenKind;
    fn advance(&mut self) -> TokenKind;
}

/// One reduction fired by [`walk`], in the order the walker backed out of
/// matching nonterminals. A caller (the parser substrate) turns these into
/// tree nodes; the DFA substrate itself has no notion of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub name: String,
    pub arg: Option<i64>,
}

/// Outcome of running the walker to completion or to a stopping point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The start nonterminal reduced and its stack emptied normally.
    Reduced(Vec<Reduction>),
    /// No arc matched the current token and no error handler is installed.
    Unhandled { node: String, token: TokenKind },
}

/// `dfa_walk`: drive a token source through the graph starting at `start`.
///
/// Each step: fetch the lookahead token, try a match arc first, then a push
/// arc, then the node's default-to/default-push/default-return in that
/// order; a node with none of those and no matching arc either invokes the
/// graph's error handler (if installed) or reports [`WalkOutcome::Unhandled`].
/// The DFA-state stack models the push/return subroutine-call mechanism:
/// pushing a nonterminal suspends the current node until the pushed one
/// reduces (default-return, or running out of its own arcs), at which point
/// the walk resumes at the return node recorded with the push.
pub fn walk<T: TokenSource>(
    graph: &DfaGraph,
    start: DfaNodeId,
    tokens: &mut T,
) -> Result<WalkOutcome, DfaError> {
    let mut stack: Vec<DfaNodeId> = Vec::new();
    let mut reductions = Vec::new();
    let mut current = start;

    loop {
        let token = tokens.peek();
        let node = graph.node(current);

        if let Some(target) = node.find_match(token) {
            tokens.advance();
            current = target;
            continue;
        }

        if let Some(push) = node.find_push(token) {
            tokens.advance();
            stack.push(push.return_to);
            current = push.nonterminal;
            continue;
        }

        if let Some(target) = node.default_to {
            current = target;
            continue;
        }

        if let Some(target) = node.default_push {
            stack.push(current);
            current = target;
            continue;
        }

        if node.default_return {
            if let Some(reduction) = &node.reduction {
                reductions.push(Reduction {
                    name: reduction.name.clone(),
                    arg: reduction.arg,
                });
            }
            match stack.pop() {
                Some(return_to) => {
                    current = return_to;
                    continue;
                }
                None => return Ok(WalkOutcome::Reduced(reductions)),
            }
        }

        if let Some(handler) = graph.error_handler() {
            current = handler;
            continue;
        }

        let name = node.name.clone().unwrap_or_else(|| format!("#{}", current.raw()));
        return Ok(WalkOutcome::Unhandled { node: name, token });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<TokenKind>, usize);
    impl TokenSource for Fixed {
        fn peek(&self) -> TokenKind {
            self.0.get(self.1).copied().unwrap_or(TokenKind::End)
        }
        fn advance(&mut self) -> TokenKind {
            let t = self.peek();
            self.1 += 1;
            t
        }
    }

    #[test]
    fn single_match_then_default_return_reduces_cleanly() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node_init("start");
        let after = graph.new_node();
        graph.add_match(start, TokenKind::Name, after);
        graph.default_return(after);
        graph.set_reduction(
            after,
            crate::dfa::node::ReductionRule { name: "name_expr".into(), arg: None },
        );

        let mut tokens = Fixed(vec![TokenKind::Name], 0);
        let outcome = walk(&graph, start, &mut tokens).unwrap();
        assert_eq!(
            outcome,
            WalkOutcome::Reduced(vec![Reduction { name: "name_expr".into(), arg: None }])
        );
    }

    #[test]
    fn unmatched_token_with_no_handler_is_reported() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node_init("start");
        let mut tokens = Fixed(vec![TokenKind::Integer], 0);
        let outcome = walk(&graph, start, &mut tokens).unwrap();
        assert_eq!(
            outcome,
            WalkOutcome::Unhandled { node: "start".into(), token: TokenKind::Integer }
        );
    }

    #[test]
    fn push_arc_resumes_at_return_node_after_pushed_nonterminal_reduces() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node_init("start");
        let sub = graph.new_node_init("sub");
        let done = graph.new_node();

        graph.add_push(start, TokenKind::Name, sub, done);
        graph.default_return(sub);
        graph.default_return(done);

        let mut tokens = Fixed(vec![TokenKind::Name], 0);
        let outcome = walk(&graph, start, &mut tokens).unwrap();
        assert_eq!(outcome, WalkOutcome::Reduced(vec![]));
    }
}
