use crate::dfa::TokenSource;
use crate::error::ParserError;
use crate::token::{Token, TokenKind};

/// The parser substrate's view of a file's tokens: a cursor over an
/// already-lexed slice, with a single-slot pushback (spec.md §4.D's
/// `parser_gettok`/`parser_pushback`). Only one token of lookahead can be
/// pushed back at a time, matching the original's single-slot design —
/// grammars needing more lookahead use [`crate::dfa`] DFAs instead of
/// chained pushbacks.
pub struct ParserStream<'t> {
    tokens: &'t [Token],
    cursor: usize,
    pushed_back: bool,
}

impl<'t> ParserStream<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            cursor: 0,
            pushed_back: false,
        }
    }

    fn current(&self) -> &'t Token {
        self.tokens.get(self.cursor).unwrap_or_else(|| self.tokens.last().expect("at least an End token"))
    }

    /// `parser_gettok`: consume and return the next token.
    pub fn get_tok(&mut self) -> &'t Token {
        self.pushed_back = false;
        let tok = self.current();
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        tok
    }

    /// `parser_peek`: look at the next token without consuming it.
    pub fn peek(&self) -> &'t Token {
        self.current()
    }

    /// `parser_pushback`: undo the most recent [`ParserStream::get_tok`].
    /// Calling this twice without an intervening `get_tok` is a misuse
    /// error, matching the original's single-slot pushback contract.
    pub fn push_back(&mut self) -> Result<(), ParserError> {
        if self.pushed_back || self.cursor == 0 {
            return Err(ParserError::NothingToPushBack);
        }
        self.cursor -= 1;
        self.pushed_back = true;
        Ok(())
    }

    pub fn at_eof(&self) -> bool {
        self.current().kind == TokenKind::End
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl<'t> TokenSource for ParserStream<'t> {
    fn peek(&self) -> TokenKind {
        self.current().kind
    }
    fn advance(&mut self) -> TokenKind {
        self.get_tok().kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Origin, TokenPayload};

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, TokenPayload::None, Origin::Synthetic, 1)
    }

    #[test]
    fn pushback_restores_the_same_token() {
        let tokens = vec![tok(TokenKind::Name), tok(TokenKind::Symbol), tok(TokenKind::End)];
        let mut stream = ParserStream::new(&tokens);
        let first = stream.get_tok();
        assert_eq!(first.kind, TokenKind::Name);
        stream.push_back().unwrap();
        let again = stream.get_tok();
        assert_eq!(again.kind, TokenKind::Name);
    }

    #[test]
    fn double_pushback_is_an_error() {
        let tokens = vec![tok(TokenKind::Name), tok(TokenKind::End)];
        let mut stream = ParserStream::new(&tokens);
        stream.get_tok();
        stream.push_back().unwrap();
        assert!(stream.push_back().is_err());
    }
}
