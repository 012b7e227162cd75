use crate::error::TreeError;
use crate::token::{Origin, Token};
use crate::tree::chook::ChookMap;
use crate::tree::names::NameId;
use crate::tree::nodetag::NodeTagId;
use crate::tree::nodetype::{Arity, NodeTypeId, NodeTypeRegistry};

/// Stable index of a node inside a [`Tree`]'s arena. Identity is the arena
/// index (the "pointer-identity interning" redesign note applied to tree
/// nodes, not just symbols): two `NodeId`s are the same node iff equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
    pub fn raw(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub node_type: NodeTypeId,
    pub tag: Option<NodeTagId>,
    pub origin: Origin,
    pub token: Option<Token>,
    pub children: Vec<NodeId>,
    /// Name slots (`nname` of this node's type): references to names
    /// declared elsewhere. These never own their target — a name's
    /// lifetime is governed by its declaration node, not by whichever
    /// nodes happen to reference it.
    pub names: Vec<Option<NameId>>,
    pub hooks: ChookMap,
}

/// An arena of [`TreeNode`]s. Nodes are never physically removed once
/// created — `tnode_free` in the original releases a malloc'd node back to
/// a free list, but under Rust's ownership model a subtree that becomes
/// unreachable from the compile context's root is simply garbage the arena
/// never walks again; nothing reads a dangling node because nothing holds
/// its `NodeId` once its parent stops pointing at it.
#[derive(Debug, Default)]
pub struct Tree {
    arena: Vec<TreeNode>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// `tnode_create(tag, origin, subnode_0…subnode_nsub-1, hook_0…hook_nhook-1)`:
    /// the count of `children` must match `node_type`'s subnode arity
    /// (`Arity::Variable` node-types, i.e. the reserved list type, are
    /// exempt). A mismatch is the "fatal internal error" spec.md §3's
    /// arity invariant calls for, surfaced as a `TreeError` the caller
    /// propagates with `?` rather than a silent truncation.
    pub fn create(
        &mut self,
        node_types: &NodeTypeRegistry,
        node_type: NodeTypeId,
        tag: Option<NodeTagId>,
        origin: Origin,
        children: Vec<NodeId>,
    ) -> Result<NodeId, TreeError> {
        self.check_arity(node_types, node_type, children.len())?;
        let nname = node_types.nname(node_type);
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(TreeNode {
            node_type,
            tag,
            origin,
            token: None,
            children,
            names: vec![None; nname],
            hooks: ChookMap::new(),
        });
        Ok(id)
    }

    /// Create a leaf node carrying a token (e.g. a name or literal). Always
    /// zero subnodes, so `node_type` must be registered `Arity::Fixed(0)`
    /// or `Arity::Variable`.
    pub fn create_leaf(
        &mut self,
        node_types: &NodeTypeRegistry,
        node_type: NodeTypeId,
        tag: Option<NodeTagId>,
        token: Token,
    ) -> Result<NodeId, TreeError> {
        self.check_arity(node_types, node_type, 0)?;
        let nname = node_types.nname(node_type);
        let id = NodeId(self.arena.len() as u32);
        let origin = token.origin.clone();
        self.arena.push(TreeNode {
            node_type,
            tag,
            origin,
            token: Some(token),
            children: Vec::new(),
            names: vec![None; nname],
            hooks: ChookMap::new(),
        });
        Ok(id)
    }

    fn check_arity(&self, node_types: &NodeTypeRegistry, node_type: NodeTypeId, actual: usize) -> Result<(), TreeError> {
        if let Arity::Fixed(expected) = node_types.nsub(node_type) {
            if expected != actual {
                return Err(TreeError::ArityMismatch {
                    op: "create".to_string(),
                    node_type: node_types.name(node_type).to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.arena[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.arena[id.0 as usize]
    }

    pub fn try_get(&self, id: NodeId) -> Result<&TreeNode, TreeError> {
        self.arena.get(id.0 as usize).ok_or(TreeError::DanglingNodeRef)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// `tnode_nthsubof`: the `n`th subnode.
    pub fn nth_sub(&self, id: NodeId, n: usize) -> NodeId {
        self.arena[id.0 as usize].children[n]
    }

    /// `tnode_nthsubaddr`: a mutable slot reference, standing in for the
    /// original's `tnode **` in-place-swap pointer.
    pub fn nth_sub_mut(&mut self, id: NodeId, n: usize) -> &mut NodeId {
        &mut self.arena[id.0 as usize].children[n]
    }

    /// `tnode_setnthsub`.
    pub fn set_nth_sub(&mut self, id: NodeId, n: usize, value: NodeId) {
        self.arena[id.0 as usize].children[n] = value;
    }

    /// `tnode_nthnameof`.
    pub fn nth_name(&self, id: NodeId, n: usize) -> Option<NameId> {
        self.arena[id.0 as usize].names[n]
    }

    /// `tnode_setnthname`.
    pub fn set_nth_name(&mut self, id: NodeId, n: usize, value: Option<NameId>) {
        self.arena[id.0 as usize].names[n] = value;
    }

    /// `tnode_copytree`: deep-copy a subtree, assigning every copied node a
    /// fresh `NodeId` and cloning its hooks via [`ChookMap::clone`].
    pub fn copy_tree(&mut self, root: NodeId) -> NodeId {
        let node = self.arena[root.0 as usize].clone();
        let new_children: Vec<NodeId> = node
            .children
            .clone()
            .into_iter()
            .map(|child| self.copy_tree(child))
            .collect();
        let id = NodeId(self.arena.len() as u32);
        self.arena.push(TreeNode {
            node_type: node.node_type,
            tag: node.tag,
            origin: node.origin,
            token: node.token,
            children: new_children,
            names: node.names,
            hooks: node.hooks,
        });
        id
    }

    /// `tnode_copyoraliastree`: a leaf with no hooks carries no mutable
    /// state a second reference could corrupt, so it is aliased (the same
    /// `NodeId` is returned) rather than copied; anything else is deep
    /// copied via [`Tree::copy_tree`].
    pub fn copy_or_alias_tree(&mut self, root: NodeId) -> NodeId {
        let node = &self.arena[root.0 as usize];
        if node.children.is_empty() && node.hooks.is_empty() {
            root
        } else {
            self.copy_tree(root)
        }
    }

    /// `tnode_promotechooks`: collapse `outer` into `inner` by merging
    /// `outer`'s hooks onto `inner` (prefer-inner collision policy) and
    /// returning `inner` as the surviving node. Used when a transparent
    /// wrapper node (per its tag's `transparent` flag) has exactly one
    /// child and the wrapper itself should disappear from the tree.
    pub fn promote_chooks(&mut self, outer: NodeId, inner: NodeId) -> Result<NodeId, TreeError> {
        let outer_hooks = self.arena[outer.0 as usize].hooks.clone();
        self.arena[inner.0 as usize].hooks.promote_from(&outer_hooks)?;
        Ok(inner)
    }

    /// Replace a node's children wholesale, e.g. after a pass rewrites a
    /// subtree.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.arena[id.0 as usize].children = children;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::nodetype::{Arity, NodeTypeRegistry};

    #[test]
    fn copy_tree_assigns_fresh_ids_but_preserves_shape() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let parent_ty = registry.new_node_type("parent", Arity::Fixed(2), 0, 0).unwrap();
        let mut tree = Tree::new();
        let leaf1 = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let leaf2 = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let parent = tree
            .create(&registry, parent_ty, None, Origin::Synthetic, vec![leaf1, leaf2])
            .unwrap();

        let copied = tree.copy_tree(parent);
        assert_ne!(copied, parent);
        assert_eq!(tree.get(copied).children.len(), 2);
        assert_ne!(tree.get(copied).children[0], leaf1);
    }

    #[test]
    fn alias_returns_same_id_for_hookless_leaf() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let mut tree = Tree::new();
        let leaf = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        assert_eq!(tree.copy_or_alias_tree(leaf), leaf);
    }

    #[test]
    fn mismatched_child_count_is_rejected() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let mut tree = Tree::new();
        assert!(tree
            .create(&registry, leaf_ty, None, Origin::Synthetic, vec![NodeId::from_raw(0)])
            .is_err());
    }
}
