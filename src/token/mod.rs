//! Symbol, keyword and token tables (spec.md §4.A): the kernel's interning
//! layer and the closed set of token kinds shared by every front end.

mod keyword;
mod origin;
mod symbol;

pub use keyword::{Keyword, KeywordTable};
pub use origin::Origin;
pub use symbol::{Symbol, SymbolTable};

use crate::lexer::TokenImpl;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// Closed set of token kinds the kernel understands, per spec.md §3.
/// `Lang(u16)` is the escape hatch a front end uses for kinds it needs but
/// the kernel has no opinion about (e.g. a language-specific pragma token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Integer,
    Real,
    StringLit,
    Name,
    Comment,
    Newline,
    Indent,
    Outdent,
    End,
    Lang(u16),
    None,
}

impl TokenImpl for TokenKind {
    fn eof() -> Self {
        TokenKind::End
    }

    /// Comments carry no grammatical meaning and are filtered from the
    /// structural token stream the parser substrate walks; everything else,
    /// including layout tokens, is structural (indentation-sensitive
    /// front ends dispatch on `Indent`/`Outdent` directly).
    fn is_structural(&self) -> bool {
        !matches!(self, TokenKind::Comment | TokenKind::None)
    }
}

/// Interned payload carried by a token alongside its `TokenKind`.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPayload {
    Keyword(Keyword),
    Symbol(Symbol),
    Integer(i64),
    Real(f64),
    Text(Box<str>),
    None,
}

impl Default for TokenPayload {
    fn default() -> Self {
        TokenPayload::None
    }
}

/// A fully-formed token: kind, interned payload, origin and source width.
/// `token_new`/`token_match` from spec.md §4.A are realized as `Token::new`
/// and `Token::matches` below; `token_free` has no Rust counterpart beyond
/// ordinary drop glue, so it is omitted here (`Token` owns no external
/// resources a front end would need to release by hand).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub payload: TokenPayload,
    pub origin: Origin,
    pub width: usize,
}

impl Token {
    pub fn new(kind: TokenKind, payload: TokenPayload, origin: Origin, width: usize) -> Self {
        Self {
            kind,
            payload,
            origin,
            width,
        }
    }

    /// `token_match`: true when this token has the given kind and, if a
    /// payload is supplied, the same payload.
    pub fn matches(&self, kind: TokenKind, payload: Option<&TokenPayload>) -> bool {
        self.kind == kind && payload.map_or(true, |p| &self.payload == p)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.kind, self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_match_ignores_payload_when_unspecified() {
        let token = Token::new(TokenKind::Newline, TokenPayload::None, Origin::Synthetic, 1);
        assert!(token.matches(TokenKind::Newline, None));
        assert!(!token.matches(TokenKind::Indent, None));
    }

    #[test]
    fn token_kind_eof_is_end() {
        assert_eq!(TokenKind::eof(), TokenKind::End);
    }
}
