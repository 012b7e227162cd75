//! The DFA substrate (spec.md §4.C): table-driven automata that the parser
//! substrate and the langdef loader both depend on. A langdef's grammar
//! text compiles down to a [`table::DfaTbl`], multiple sections' tables
//! merge via [`table::DfaTbl::merge`], and the merged table is built into a
//! real [`graph::DfaGraph`] for [`walk::walk`] to drive.

mod graph;
mod node;
mod table;
mod walk;

pub use graph::DfaGraph;
pub use node::{DfaArc, DfaNode, DfaNodeId, DfaPush, ReductionRule};
pub use table::{DfaTbl, TblOp};
pub use walk::{walk, Reduction, TokenSource, WalkOutcome};
