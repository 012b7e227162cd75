//! The parser substrate (spec.md §4.D): a token cursor, generic list-node
//! operations, error-position deduplication and DFA lookahead helpers,
//! bundled so a front end's recursive-descent rules can be written against
//! one `Parser` value instead of threading four pieces of state by hand.

mod error;
mod list;
mod lookahead;
mod stream;

pub use error::ErrorMarks;
pub use list::ListOps;
pub use lookahead::{test_false_tag, test_true_tag};
pub use stream::ParserStream;

use crate::token::Token;
use crate::tree::NodeTypeId;

/// Bundles the parser substrate's per-file state: the token cursor, the
/// list-node operations bound to this language's reserved list node type,
/// and the error-position tracker.
pub struct Parser<'t> {
    pub stream: ParserStream<'t>,
    pub lists: ListOps,
    pub errors: ErrorMarks,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], list_node_type: NodeTypeId) -> Self {
        Self {
            stream: ParserStream::new(tokens),
            lists: ListOps::new(list_node_type),
            errors: ErrorMarks::new(),
        }
    }
}
