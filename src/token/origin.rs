use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Identifies what produced a diagnosable entity: a token, a tree node, a
/// langdef entry. Recovered from `include/origin.h` in the original
/// implementation, which tags entities with either a source position or a
/// language-definition position rather than a single flat triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A position inside a compiled source file.
    Source {
        file: Rc<str>,
        line: usize,
        column: usize,
    },
    /// A position inside a language-definition (`.ldef`) file.
    LangDef { ident: Rc<str>, line: usize },
    /// No origin is known, e.g. a synthesized node with no source position.
    Synthetic,
}

impl Origin {
    pub fn source(file: impl Into<Rc<str>>, line: usize, column: usize) -> Self {
        Self::Source {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn langdef(ident: impl Into<Rc<str>>, line: usize) -> Self {
        Self::LangDef {
            ident: ident.into(),
            line,
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Source { file, line, column } => write!(f, "{}:{}:{}", file, line, column),
            Origin::LangDef { ident, line } => write!(f, "{}.ldef:{}", ident, line),
            Origin::Synthetic => write!(f, "<synthetic>"),
        }
    }
}
