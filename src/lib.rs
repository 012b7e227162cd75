//! `nocc-core`: the language-agnostic kernel shared by every NOCC front end
//! and back end.
//!
//! The kernel owns four things: a uniform tree representation with an
//! extensible node-type/tag/hook registry ([`tree`]), a DFA-driven,
//! table-merged parser substrate ([`dfa`], [`parser`]), a named-pass
//! pipeline with per-node operation dispatch ([`pass`]), and compile
//! orchestration ([`orchestrator`]). Concrete front ends plug in through a
//! language-definition loader ([`langdef`]) and front-end unit glue
//! ([`feunit`]); concrete languages, code generation, signing and CLI
//! plumbing beyond the reserved option surface are out of scope.
//!
//! # License
//! Provided under the MIT license. See [LICENSE](https://github.com/nocc-project/nocc-core/blob/main/LICENSE).

pub mod dfa;
pub mod diagnostics;
pub mod error;
pub mod feunit;
pub mod langdef;
pub mod lex_util;
pub mod lexer;
pub mod name;
pub mod orchestrator;
pub mod parser;
pub mod pass;
pub mod token;
pub mod tree;
pub mod util;

pub use diagnostics::{Diagnostic, Severity};
pub use error::{
    DfaError, FeunitError, LangdefError, OrchestratorError, ParserError, PassError, TreeError,
};
pub use lexer::{ILexeme, ITokenization, Lex, LexError, TokenImpl};
pub use token::{Keyword, KeywordTable, Origin, Symbol, SymbolTable, Token, TokenKind};
pub use tree::Tree;
