use crate::dfa::{walk, DfaGraph, DfaNodeId, TokenSource, WalkOutcome};
use crate::token::{Token, TokenKind};

/// A read-only cursor over a token slice, used only to run a lookahead DFA
/// without disturbing the real parser stream's position.
struct Peeking<'t> {
    tokens: &'t [Token],
    cursor: usize,
}

impl<'t> TokenSource for Peeking<'t> {
    fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.cursor)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::End)
    }
    fn advance(&mut self) -> TokenKind {
        let t = self.peek();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        t
    }
}

/// `testtruetag`: does the lookahead DFA rooted at `start` reduce cleanly
/// against the tokens beginning at `from`, without consuming the real
/// stream? Ambiguous grammar points (e.g. "is this a declaration or an
/// expression statement") are resolved by running a disposable DFA over a
/// copy of the upcoming tokens and checking whether it accepts.
pub fn test_true_tag(graph: &DfaGraph, start: DfaNodeId, tokens: &[Token], from: usize) -> bool {
    let mut peeking = Peeking { tokens, cursor: from };
    matches!(walk(graph, start, &mut peeking), Ok(WalkOutcome::Reduced(_)))
}

/// `testfalsetag`: the negation of [`test_true_tag`], provided separately
/// since callers in the original read more naturally testing for rejection
/// directly rather than via `!testtruetag(...)`.
pub fn test_false_tag(graph: &DfaGraph, start: DfaNodeId, tokens: &[Token], from: usize) -> bool {
    !test_true_tag(graph, start, tokens, from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Origin, TokenPayload};

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, TokenPayload::None, Origin::Synthetic, 1)
    }

    #[test]
    fn accepting_lookahead_reports_true() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node_init("start");
        graph.default_return(start);
        let tokens = vec![tok(TokenKind::Name)];
        assert!(test_true_tag(&graph, start, &tokens, 0));
        assert!(!test_false_tag(&graph, start, &tokens, 0));
    }

    #[test]
    fn unmatched_lookahead_reports_false() {
        let mut graph = DfaGraph::new();
        let start = graph.new_node_init("start");
        let tokens = vec![tok(TokenKind::Name)];
        assert!(!test_true_tag(&graph, start, &tokens, 0));
    }
}
