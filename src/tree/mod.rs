//! The tree kernel (spec.md §4.B): a uniform node representation shared by
//! every front end, with an extensible registry of node types (with their
//! operation tables), node tags (shape flags + pass-validity bounds), and
//! sparse per-node compiler hooks.

mod chook;
mod names;
mod node;
mod nodetag;
mod nodetype;
mod walk;

pub use chook::{ChookMap, ChookPayload, HookId, HookRegistry};
pub use names::{Name, NameId, NameTable};
pub use node::{NodeId, Tree, TreeNode};
pub use nodetag::{NodeTagDef, NodeTagFlags, NodeTagId, NodeTagRegistry};
pub use nodetype::{Arity, CompOp, LangOp, NodeTypeDef, NodeTypeId, NodeTypeRegistry, OpArgs, OpOutcome, OpTableId};
pub use walk::{walk_post, walk_pre, walk_pre_modifying, walk_pre_post, WalkSignal};

/// The three frozen-after-load registries every tree node is interpreted
/// against. Kept as one bundle so passes and the orchestrator thread a
/// single value rather than three.
#[derive(Default)]
pub struct Registry {
    pub node_types: NodeTypeRegistry,
    pub node_tags: NodeTagRegistry,
    pub hooks: HookRegistry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
}
