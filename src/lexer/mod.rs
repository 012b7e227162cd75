//! Generic lexical-analysis substrate shared by every front end: the
//! [`ILexeme`] contract a front end's lexer utilities implement, the token
//! stream they produce, and the pointer types used to index it.
//!
//! The higher-level lexeme combinators built on top of [`ILexeme`] (regex
//! patterns, constant/punctuation tables, stateful mixins) live in
//! [`crate::lex_util`].

mod stream;
mod tokenizer;

pub use stream::{FltrPtr, TokenPtr, TokenStream};
pub use tokenizer::{CombinedTokenizer, Tokenizer};

use crate::util::Code;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::rc::Rc;
use thiserror::Error;

/// A token kind usable by the lexer/parser substrate: small, `Copy`, and
/// totally ordered so it can be used as a lookup key in DFA transition
/// tables.
pub trait TokenImpl: Copy + Debug + Eq + Hash + Ord {
    fn eof() -> Self;
    /// Whether this kind carries grammatical meaning. Non-structural tokens
    /// (whitespace, comments) are dropped from the filtered stream the
    /// parser substrate walks.
    fn is_structural(&self) -> bool;
}

/// One element of a tokenized stream: a token kind and its byte-offset span.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub struct Lex<TToken> {
    pub token: TToken,
    pub start: usize,
    pub end: usize,
}

impl<TToken> Lex<TToken> {
    pub fn new(token: TToken, start: usize, end: usize) -> Self {
        Self { token, start, end }
    }
}

impl<TToken: Debug> Display for Lex<TToken> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}[{}..{}]", self.token, self.start, self.end)
    }
}

/// An interface implemented by every lexeme utility: the primitive unit of
/// composition a tokenizer calls in sequence at each input position.
pub trait ILexeme {
    type Token: Copy + Debug + Eq + Ord;
    type State: Copy + Debug + Eq + Ord;

    fn consume(
        &self,
        code: &Code,
        pointer: usize,
        tokenized_stream: &Vec<Lex<Self::Token>>,
        state_stack: &mut Vec<Self::State>,
    ) -> Option<Lex<Self::Token>>;

    fn get_grammar_field(&self) -> Vec<(Self::Token, String)>;
}

/// Splits input bytes into a token stream and optionally renders the
/// grammar fragment it recognizes (used by `--dump-grammar`).
pub trait ITokenization {
    type Token;
    fn tokenize(&self, code: &Code) -> Result<Vec<Lex<Self::Token>>, LexError>;
    fn build_grammar(&self) -> Result<String, std::fmt::Error>;
}

#[derive(Debug, Error)]
#[error("lexical error at byte {pointer}: {message}")]
pub struct LexError {
    pub pointer: usize,
    pub message: String,
}

impl LexError {
    pub fn new(pointer: usize, message: String) -> Self {
        Self { pointer, message }
    }
}

/// Convenience alias matching the `Rc<dyn ILexeme<...>>` shape the builtin
/// lexeme combinators in [`crate::lex_util`] are parameterized over.
pub type LexemeRef<TToken, TState> = Rc<dyn ILexeme<Token = TToken, State = TState>>;
