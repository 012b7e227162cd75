//! Crate-wide diagnostic value (spec.md §7): the Rust realization of the
//! lex-error/parse-error/semantic-error/warning taxonomy the original keeps
//! as return-code categories on the compile context.

use crate::token::Origin;
use std::fmt::{Display, Formatter};

/// Severity of a [`Diagnostic`]. `Internal` and `Fatal` correspond to
/// spec.md §7's "serious"/"fatal" categories: conditions a pass cannot
/// recover from by continuing the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    LexError,
    ParseError,
    SemanticError,
    Internal,
    Fatal,
}

impl Severity {
    /// Whether this severity should increment the compile context's error
    /// counter (as opposed to its warning counter) and thus affect the
    /// derived process exit code.
    pub fn is_error(&self) -> bool {
        !matches!(self, Severity::Warning)
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Warning => "warning",
            Severity::LexError => "lex-error",
            Severity::ParseError => "parse-error",
            Severity::SemanticError => "semantic-error",
            Severity::Internal => "internal",
            Severity::Fatal => "fatal",
        };
        write!(f, "{}", s)
    }
}

/// A single diagnosable event: a pass or stage reporting something to the
/// user, accumulated on the compile context rather than raised as a Rust
/// error. Fatal/internal conditions detected before they would become a
/// user-facing diagnostic are instead `Err(_)` returns from the offending
/// component's `thiserror` error type (see [`crate::error`]).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub origin: Origin,
    pub message: String,
    /// Name of the pass or stage that raised this diagnostic, if any.
    pub raised_by: Option<&'static str>,
}

impl Diagnostic {
    pub fn new(severity: Severity, origin: Origin, message: impl Into<String>) -> Self {
        Self {
            severity,
            origin,
            message: message.into(),
            raised_by: None,
        }
    }

    pub fn raised_by(mut self, name: &'static str) -> Self {
        self.raised_by = Some(name);
        self
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.raised_by {
            Some(name) => write!(f, "{} [{}]: {} ({})", self.severity, name, self.message, self.origin),
            None => write!(f, "{}: {} ({})", self.severity, self.message, self.origin),
        }
    }
}
