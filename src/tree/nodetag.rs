use crate::error::TreeError;
use crate::tree::nodetype::NodeTypeId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeTagId(u32);

/// Shape flags carried by a node tag, per spec.md §4.B. These gate how the
/// parser substrate and pass pipeline treat nodes of this tag: whether it
/// is a transparent wrapper collapsed during tree construction, whether it
/// introduces a long-form declaration/process/action, whether it marks a
/// DFA synchronisation point, and whether its children are an
/// indentation-delimited list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeTagFlags {
    pub transparent: bool,
    pub long_decl: bool,
    pub short_decl: bool,
    pub long_proc: bool,
    pub long_action: bool,
    pub synchronising_type: bool,
    pub indented_list: bool,
}

#[derive(Debug, Clone)]
pub struct NodeTagDef {
    pub name: String,
    /// The node-type this tag belongs to (`tnode_newnodetag`'s `tnd`
    /// argument). A tag always belongs to exactly one node-type.
    pub owner: NodeTypeId,
    pub flags: NodeTagFlags,
    /// Pass index below which a node of this tag must not appear (from the
    /// `tnode` langdef entry's `invbefore`/`invafter`, recovered from
    /// `include/langdef.h`). `None` means unconstrained.
    pub invalid_before: Option<usize>,
    pub invalid_after: Option<usize>,
}

/// Registry of node tags (spec.md §4.B `tnode_newnodetag`).
#[derive(Default)]
pub struct NodeTagRegistry {
    defs: Vec<NodeTagDef>,
    by_name: HashMap<String, NodeTagId>,
}

impl NodeTagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tnode_newnodetag(name, &id_out, tnd, flags)`.
    pub fn new_node_tag(
        &mut self,
        name: impl Into<String>,
        owner: NodeTypeId,
        flags: NodeTagFlags,
    ) -> Result<NodeTagId, TreeError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TreeError::DuplicateNodeTag(name));
        }
        let id = NodeTagId(self.defs.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.defs.push(NodeTagDef {
            name,
            owner,
            flags,
            invalid_before: None,
            invalid_after: None,
        });
        Ok(id)
    }

    pub fn set_pass_bounds(
        &mut self,
        tag: NodeTagId,
        invalid_before: Option<usize>,
        invalid_after: Option<usize>,
    ) {
        let def = &mut self.defs[tag.0 as usize];
        def.invalid_before = invalid_before;
        def.invalid_after = invalid_after;
    }

    pub fn lookup(&self, name: &str) -> Option<NodeTagId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: NodeTagId) -> &NodeTagDef {
        &self.defs[id.0 as usize]
    }

    /// Whether a node of this tag is valid to still be present at the given
    /// (0-indexed) position in the ordered pass list — the check
    /// `TreeChecker` runs after every pass (spec.md §4.G).
    pub fn valid_at_pass(&self, tag: NodeTagId, pass_index: usize) -> bool {
        let def = self.get(tag);
        if let Some(before) = def.invalid_before {
            if pass_index < before {
                return false;
            }
        }
        if let Some(after) = def.invalid_after {
            if pass_index > after {
                return false;
            }
        }
        true
    }
}
