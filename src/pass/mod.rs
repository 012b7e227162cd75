//! The named pass pipeline (spec.md §4.G): an ordered list of passes run
//! over a front end's (or back end's) tree, with optional per-pass
//! tree-checking and stop-point support.

mod context;
mod pipeline;
mod treecheck;

pub use context::PassContext;
pub use pipeline::{run_fe_passes, PassDescriptor, PassFn, PassList, PassOutcome, PassRunReport};
pub use treecheck::{TreeChecker, Violation};
