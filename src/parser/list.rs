use crate::error::ParserError;
use crate::token::Origin;
use crate::tree::{NodeId, NodeTypeId, NodeTypeRegistry, Tree};

/// Generic list-node operations (spec.md §4.D): comma-separated argument
/// lists, statement blocks and the like are all built as ordinary tree
/// nodes of one reserved `list` node type, manipulated through this API
/// rather than each grammar rule hand-rolling its own vector-of-children
/// logic.
pub struct ListOps {
    list_type: NodeTypeId,
}

impl ListOps {
    pub fn new(list_type: NodeTypeId) -> Self {
        Self { list_type }
    }

    fn check(&self, tree: &Tree, list: NodeId) -> Result<(), ParserError> {
        if tree.get(list).node_type != self.list_type {
            return Err(ParserError::NotAList);
        }
        Ok(())
    }

    /// `parser_newlistnode`. The reserved list node type is always
    /// registered `Arity::Variable`, so creating one with no children up
    /// front can never trip the arity check.
    pub fn new_list_node(&self, tree: &mut Tree, node_types: &NodeTypeRegistry, origin: Origin) -> NodeId {
        tree.create(node_types, self.list_type, None, origin, Vec::new())
            .expect("list node type is registered Arity::Variable")
    }

    /// `parser_addtolist`: append at the end.
    pub fn add_to_list(&self, tree: &mut Tree, list: NodeId, item: NodeId) -> Result<(), ParserError> {
        self.check(tree, list)?;
        tree.get_mut(list).children.push(item);
        Ok(())
    }

    /// `parser_insertinlist`: insert at a given position.
    pub fn insert_in_list(&self, tree: &mut Tree, list: NodeId, at: usize, item: NodeId) -> Result<(), ParserError> {
        self.check(tree, list)?;
        let children = &mut tree.get_mut(list).children;
        let at = at.min(children.len());
        children.insert(at, item);
        Ok(())
    }

    /// `parser_delfromlist`: remove the item at `at`, if present.
    pub fn del_from_list(&self, tree: &mut Tree, list: NodeId, at: usize) -> Result<Option<NodeId>, ParserError> {
        self.check(tree, list)?;
        let children = &mut tree.get_mut(list).children;
        if at < children.len() {
            Ok(Some(children.remove(at)))
        } else {
            Ok(None)
        }
    }

    /// `parser_mergeinlist`: splice another list's items into this one at
    /// `at`, consuming the other list's children (the other node itself is
    /// left empty and orphaned).
    pub fn merge_in_list(&self, tree: &mut Tree, list: NodeId, at: usize, other: NodeId) -> Result<(), ParserError> {
        self.check(tree, list)?;
        self.check(tree, other)?;
        let taken = std::mem::take(&mut tree.get_mut(other).children);
        let children = &mut tree.get_mut(list).children;
        let at = at.min(children.len());
        for (offset, item) in taken.into_iter().enumerate() {
            children.insert(at + offset, item);
        }
        Ok(())
    }

    /// `parser_countlist`.
    pub fn count_list(&self, tree: &Tree, list: NodeId) -> Result<usize, ParserError> {
        self.check(tree, list)?;
        Ok(tree.get(list).children.len())
    }

    /// `parser_getlistitems`: a read-only view of the list's children.
    pub fn get_list_items<'t>(&self, tree: &'t Tree, list: NodeId) -> Result<&'t [NodeId], ParserError> {
        self.check(tree, list)?;
        Ok(&tree.get(list).children)
    }

    /// `parser_sortlist`: reorder children in place by a caller-supplied key.
    pub fn sort_list<K, F>(&self, tree: &mut Tree, list: NodeId, mut key: F) -> Result<(), ParserError>
    where
        F: FnMut(NodeId) -> K,
        K: Ord,
    {
        self.check(tree, list)?;
        tree.get_mut(list).children.sort_by_key(|&id| key(id));
        Ok(())
    }

    /// `parser_collapselist`: a single-item list degenerates to that item
    /// directly, dropping the wrapper; anything else is returned unchanged.
    pub fn collapse_list(&self, tree: &Tree, list: NodeId) -> Result<NodeId, ParserError> {
        self.check(tree, list)?;
        let children = &tree.get(list).children;
        if children.len() == 1 {
            Ok(children[0])
        } else {
            Ok(list)
        }
    }

    /// `parser_trashlist`: empty the list without deleting the node (its
    /// former children, if unreferenced elsewhere, simply become
    /// unreachable garbage per [`Tree`]'s arena model).
    pub fn trash_list(&self, tree: &mut Tree, list: NodeId) -> Result<(), ParserError> {
        self.check(tree, list)?;
        tree.get_mut(list).children.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Arity, NodeTypeRegistry};

    fn setup() -> (ListOps, Tree, NodeTypeRegistry, NodeTypeId) {
        let mut registry = NodeTypeRegistry::new();
        let list_type = registry.new_node_type("list", Arity::Variable, 0, 0).unwrap();
        let item_type = registry.new_node_type("item", Arity::Fixed(0), 0, 0).unwrap();
        (ListOps::new(list_type), Tree::new(), registry, item_type)
    }

    #[test]
    fn add_and_count_round_trip() {
        let (ops, mut tree, registry, item_type) = setup();
        let list = ops.new_list_node(&mut tree, &registry, Origin::Synthetic);
        let item = tree.create(&registry, item_type, None, Origin::Synthetic, vec![]).unwrap();
        ops.add_to_list(&mut tree, list, item).unwrap();
        assert_eq!(ops.count_list(&tree, list).unwrap(), 1);
    }

    #[test]
    fn operating_on_a_non_list_node_is_an_error() {
        let (ops, mut tree, registry, item_type) = setup();
        let item = tree.create(&registry, item_type, None, Origin::Synthetic, vec![]).unwrap();
        assert!(ops.count_list(&tree, item).is_err());
    }

    #[test]
    fn collapse_unwraps_a_single_item_list() {
        let (ops, mut tree, registry, item_type) = setup();
        let list = ops.new_list_node(&mut tree, &registry, Origin::Synthetic);
        let item = tree.create(&registry, item_type, None, Origin::Synthetic, vec![]).unwrap();
        ops.add_to_list(&mut tree, list, item).unwrap();
        assert_eq!(ops.collapse_list(&tree, list).unwrap(), item);
    }
}
