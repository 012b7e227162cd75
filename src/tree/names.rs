use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(u32);

/// A declared identifier (spec.md §3 `name`): an owning declaration node,
/// an optional type node, an optional name-node reference, and a scope
/// level. Distinct from [`crate::name::Scope`], which is the pass-time
/// lexical-scope stack a front end's passes use to find a `NameId` by
/// spelling — this is the per-declaration record that stack's frames
/// point at.
#[derive(Debug, Clone)]
pub struct Name {
    pub decl: NodeId,
    pub type_node: Option<NodeId>,
    pub name_node: Option<NodeId>,
    pub scope_level: usize,
}

/// Arena of declared names. A node's name slots (`TreeNode::names`) hold
/// `NameId`s into this table rather than owning a `Name` directly, per
/// spec.md §3's "name-slot references never own their target" invariant.
#[derive(Debug, Default)]
pub struct NameTable {
    names: Vec<Name>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new name, returning its stable id.
    pub fn declare(
        &mut self,
        decl: NodeId,
        type_node: Option<NodeId>,
        name_node: Option<NodeId>,
        scope_level: usize,
    ) -> NameId {
        let id = NameId(self.names.len() as u32);
        self.names.push(Name {
            decl,
            type_node,
            name_node,
            scope_level,
        });
        id
    }

    pub fn get(&self, id: NameId) -> &Name {
        &self.names[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Origin;
    use crate::tree::{NodeTypeRegistry, Tree};

    #[test]
    fn declared_name_records_its_declaration_node() {
        let mut registry = NodeTypeRegistry::new();
        let nt = registry
            .new_node_type("decl", crate::tree::Arity::Fixed(0), 0, 0)
            .unwrap();
        let mut tree = Tree::new();
        let decl = tree.create(&registry, nt, None, Origin::Synthetic, vec![]).unwrap();

        let mut names = NameTable::new();
        let id = names.declare(decl, None, None, 0);
        assert_eq!(names.get(id).decl, decl);
        assert_eq!(names.get(id).scope_level, 0);
    }
}
