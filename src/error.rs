//! Per-component `thiserror` error enums. These are the Rust-level
//! `Result` plumbing: they report API misuse and conditions fatal enough
//! to unwind out of the offending call (spec.md §7's internal/fatal split).
//! Recoverable, user-visible conditions are accumulated as
//! [`crate::diagnostics::Diagnostic`]s on the compile context instead.

use thiserror::Error;

/// Failures from the tree kernel (component B): node-type/tag/hook registry
/// misuse, arity mismatches, malformed copies.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("node type '{0}' is already registered")]
    DuplicateNodeType(String),
    #[error("node tag '{0}' is already registered")]
    DuplicateNodeTag(String),
    #[error("operation '{op}' on node type '{node_type}' expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        op: String,
        node_type: String,
        expected: usize,
        actual: usize,
    },
    #[error("node type '{0}' has no operation named '{1}' in its table or any parent table")]
    UnknownOperation(String, String),
    #[error("compiler hook '{0}' is already registered")]
    DuplicateHook(String),
    #[error("attempted to walk a tree containing a dangling node reference")]
    DanglingNodeRef,
}

/// Failures from the DFA substrate (component C): malformed tables,
/// unresolved deferred references, walk errors with no handler.
#[derive(Debug, Error)]
pub enum DfaError {
    #[error("dfa node '{0}' is not registered")]
    UnknownNode(String),
    #[error("{unresolved} deferred push-to reference(s) could not be resolved: {names:?}")]
    UnresolvedDeferred {
        unresolved: usize,
        names: Vec<String>,
    },
    #[error("dfa table merge of '{0}' conflicts with an existing entry and neither side is marked replace")]
    MergeConflict(String),
    #[error("dfa walk at node '{node}' found no matching arc and no error handler installed")]
    UnhandledError { node: String },
    #[error("bnf rule could not be decoded: {0}")]
    MalformedRule(String),
}

/// Failures from the parser substrate (component D): list-API misuse,
/// stream exhaustion, malformed error marks.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("attempted to operate on a list node with a non-list node type")]
    NotAList,
    #[error("token stream exhausted while expecting more input")]
    UnexpectedEof,
    #[error("parser_pushback called with no prior parser_gettok on this stream")]
    NothingToPushBack,
}

/// Failures from the language-definition loader (component E).
#[derive(Debug, Error)]
pub enum LangdefError {
    #[error("langdef file '{0}' could not be read: {1}")]
    Io(String, String),
    #[error("langdef '{ident}' line {line}: {message}")]
    Parse {
        ident: String,
        line: usize,
        message: String,
    },
    #[error("langdef section '{0}' references unknown import '{1}'")]
    UnknownImport(String, String),
    #[error("langdef '{0}' was requested but never registered")]
    NotFound(String),
}

/// Failures from front-end unit composition (component F).
#[derive(Debug, Error)]
pub enum FeunitError {
    #[error("front-end unit '{0}' failed during {1} and earlyfail is set")]
    EarlyFail(String, &'static str),
    #[error("front-end unit '{0}' is already registered")]
    Duplicate(String),
}

/// Failures from the pass pipeline (component G).
#[derive(Debug, Error)]
pub enum PassError {
    #[error("pass '{0}' is already registered")]
    DuplicatePass(String),
    #[error("cannot insert pass '{new}' relative to unknown pass '{anchor}'")]
    UnknownAnchor { new: String, anchor: String },
    #[error("tree-checker violation in pass '{pass}' on node tag '{tag}' with no error budget remaining")]
    TreeCheckViolation { pass: String, tag: String },
    #[error("pass '{0}' reported a fatal error and the pipeline was aborted")]
    Fatal(String),
}

/// Failures from compiler orchestration (component H): CLI parsing, specs
/// file loading, stage table misuse.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("unknown compiler stage '{0}'")]
    UnknownStage(String),
    #[error("stage '{0}' is already registered")]
    DuplicateStage(String),
    #[error("specs file error: {0}")]
    Specs(#[from] crate::orchestrator::specs::SpecsError),
    #[error("no main source module was given and --not-main-module was not set")]
    NoMainModule,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
