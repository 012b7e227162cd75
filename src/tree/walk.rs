use crate::error::TreeError;
use crate::tree::node::{NodeId, Tree};

/// Whether a walk should continue descending, or stop entirely — the
/// Rust realization of the continue/stop convention a walker callback
/// returns in the original (spec.md §4.B, §4.G).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkSignal {
    Continue,
    Stop,
}

enum Frame {
    Enter(NodeId),
    Leave(NodeId),
}

/// Pre-order walk over a subtree using an explicit work-stack rather than
/// recursion (spec.md §9 redesign note), visiting a node before its
/// children. `visit` returning [`WalkSignal::Stop`] halts the whole walk
/// without descending into that node's children.
pub fn walk_pre<F>(tree: &Tree, root: NodeId, visit: &mut F) -> Result<(), TreeError>
where
    F: FnMut(NodeId) -> Result<WalkSignal, TreeError>,
{
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if visit(id)? == WalkSignal::Stop {
            return Ok(());
        }
        let node = tree.try_get(id)?;
        for &child in node.children.iter().rev() {
            stack.push(child);
        }
    }
    Ok(())
}

/// Post-order walk: visits a node only after all of its children.
pub fn walk_post<F>(tree: &Tree, root: NodeId, visit: &mut F) -> Result<(), TreeError>
where
    F: FnMut(NodeId) -> Result<WalkSignal, TreeError>,
{
    let mut stack = vec![Frame::Enter(root)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                let node = tree.try_get(id)?;
                stack.push(Frame::Leave(id));
                for &child in node.children.iter().rev() {
                    stack.push(Frame::Enter(child));
                }
            }
            Frame::Leave(id) => {
                if visit(id)? == WalkSignal::Stop {
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

/// Combined pre+post walk: `pre` fires on entry, `post` on exit, matching
/// the original's combined-walker variant used by passes that need to push
/// and pop scope around a subtree.
pub fn walk_pre_post<FPre, FPost>(
    tree: &Tree,
    root: NodeId,
    pre: &mut FPre,
    post: &mut FPost,
) -> Result<(), TreeError>
where
    FPre: FnMut(NodeId) -> Result<WalkSignal, TreeError>,
    FPost: FnMut(NodeId) -> Result<(), TreeError>,
{
    let mut stack = vec![Frame::Enter(root)];
    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                if pre(id)? == WalkSignal::Stop {
                    return Ok(());
                }
                let node = tree.try_get(id)?;
                stack.push(Frame::Leave(id));
                for &child in node.children.iter().rev() {
                    stack.push(Frame::Enter(child));
                }
            }
            Frame::Leave(id) => post(id)?,
        }
    }
    Ok(())
}

/// One node's children, being visited left to right; `index` is the next
/// child slot to process.
struct ChildCursor {
    node: NodeId,
    index: usize,
    count: usize,
}

/// Modifying pre-order walk: `visit` may replace a node with a different
/// `NodeId` (e.g. simplifying a subtree, or collapsing a transparent
/// wrapper via [`Tree::promote_chooks`]). The replacement is swapped into
/// the parent's child slot in place; the walk then continues over the
/// replacement's own children. Uses an explicit work-stack rather than
/// recursion, the same as the other three walkers in this file, so a deep
/// tree (a long indented statement list) cannot blow the call stack.
pub fn walk_pre_modifying<F>(tree: &mut Tree, root: NodeId, visit: &mut F) -> Result<NodeId, TreeError>
where
    F: FnMut(NodeId, &mut Tree) -> Result<Option<NodeId>, TreeError>,
{
    let root = visit(root, tree)?.unwrap_or(root);

    let mut stack = Vec::new();
    let count = tree.try_get(root)?.children.len();
    if count > 0 {
        stack.push(ChildCursor { node: root, index: 0, count });
    }

    while let Some(cursor) = stack.pop() {
        let child = tree.get(cursor.node).children[cursor.index];
        let replaced = visit(child, tree)?.unwrap_or(child);
        if replaced != child {
            tree.get_mut(cursor.node).children[cursor.index] = replaced;
        }

        if cursor.index + 1 < cursor.count {
            stack.push(ChildCursor {
                node: cursor.node,
                index: cursor.index + 1,
                count: cursor.count,
            });
        }

        let grandchild_count = tree.try_get(replaced)?.children.len();
        if grandchild_count > 0 {
            stack.push(ChildCursor {
                node: replaced,
                index: 0,
                count: grandchild_count,
            });
        }
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Origin;
    use crate::tree::nodetype::{Arity, NodeTypeRegistry};

    #[test]
    fn pre_order_visits_parent_before_children() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let root_ty = registry.new_node_type("root", Arity::Fixed(1), 0, 0).unwrap();
        let mut tree = Tree::new();
        let leaf = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let root = tree
            .create(&registry, root_ty, None, Origin::Synthetic, vec![leaf])
            .unwrap();

        let mut order = Vec::new();
        walk_pre(&tree, root, &mut |id| {
            order.push(id);
            Ok(WalkSignal::Continue)
        })
        .unwrap();
        assert_eq!(order, vec![root, leaf]);
    }

    #[test]
    fn post_order_visits_children_before_parent() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let root_ty = registry.new_node_type("root", Arity::Fixed(1), 0, 0).unwrap();
        let mut tree = Tree::new();
        let leaf = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let root = tree
            .create(&registry, root_ty, None, Origin::Synthetic, vec![leaf])
            .unwrap();

        let mut order = Vec::new();
        walk_post(&tree, root, &mut |id| {
            order.push(id);
            Ok(WalkSignal::Continue)
        })
        .unwrap();
        assert_eq!(order, vec![leaf, root]);
    }

    #[test]
    fn modifying_walk_can_replace_a_child() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let root_ty = registry.new_node_type("root", Arity::Fixed(1), 0, 0).unwrap();
        let mut tree = Tree::new();
        let old_leaf = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let new_leaf = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        let root = tree
            .create(&registry, root_ty, None, Origin::Synthetic, vec![old_leaf])
            .unwrap();

        walk_pre_modifying(&mut tree, root, &mut |id, _tree| {
            if id == old_leaf {
                Ok(Some(new_leaf))
            } else {
                Ok(None)
            }
        })
        .unwrap();

        assert_eq!(tree.get(root).children[0], new_leaf);
    }

    #[test]
    fn modifying_walk_descends_into_a_deep_chain_without_recursing() {
        let mut registry = NodeTypeRegistry::new();
        let leaf_ty = registry.new_node_type("leaf", Arity::Fixed(0), 0, 0).unwrap();
        let root_ty = registry.new_node_type("root", Arity::Fixed(1), 0, 0).unwrap();
        let mut tree = Tree::new();

        let mut node = tree.create(&registry, leaf_ty, None, Origin::Synthetic, vec![]).unwrap();
        for _ in 0..5000 {
            node = tree
                .create(&registry, root_ty, None, Origin::Synthetic, vec![node])
                .unwrap();
        }

        let mut visited = 0usize;
        let result = walk_pre_modifying(&mut tree, node, &mut |_id, _tree| {
            visited += 1;
            Ok(None)
        })
        .unwrap();

        assert_eq!(result, node);
        assert_eq!(visited, 5001);
    }
}
