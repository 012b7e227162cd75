use crate::token::Origin;
use crate::tree::{walk_pre, NodeTagRegistry, Tree, WalkSignal};
use crate::tree::NodeId;

/// One node found to violate its tag's pass-validity bounds: present at a
/// pass index earlier than `invalid_before` or later than `invalid_after`
/// (spec.md §4.E `tnode` entries, recovered from
/// `original_source/include/langdef.h`'s `invbefore`/`invafter` fields).
#[derive(Debug, Clone)]
pub struct Violation {
    pub node: NodeId,
    pub tag_name: String,
    pub origin: Origin,
}

/// Optional per-pass tree validation (spec.md §4.G): walks every node
/// reachable from the pass's root and checks its tag's `invalid_before`/
/// `invalid_after` bounds against the current pass index. A pass list with
/// tree-checking enabled treats any [`Violation`] as consuming from the
/// compile's error budget; spec.md's "tree-checker violations with no
/// error budget remaining — abort the compile" is the caller's decision
/// once it sees a non-empty violation list (see [`super::PassError::TreeCheckViolation`]).
pub struct TreeChecker;

impl TreeChecker {
    /// Run the check over the subtree rooted at `root`, returning every
    /// violation found (an empty result means the tree is well-formed at
    /// this pass index).
    pub fn check(tree: &Tree, node_tags: &NodeTagRegistry, root: NodeId, pass_index: usize) -> Vec<Violation> {
        let mut violations = Vec::new();
        let _ = walk_pre(tree, root, &mut |id| {
            let node = tree.get(id);
            if let Some(tag) = node.tag {
                if !node_tags.valid_at_pass(tag, pass_index) {
                    violations.push(Violation {
                        node: id,
                        tag_name: node_tags.get(tag).name.clone(),
                        origin: node.origin.clone(),
                    });
                }
            }
            Ok::<_, crate::error::TreeError>(WalkSignal::Continue)
        });
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Origin as Org;
    use crate::tree::{Arity, NodeTagFlags, NodeTypeRegistry};

    #[test]
    fn node_outside_its_tags_pass_bounds_is_flagged() {
        let mut node_types = NodeTypeRegistry::new();
        let nt = node_types.new_node_type("expr", Arity::Fixed(0), 0, 0).unwrap();
        let mut node_tags = NodeTagRegistry::new();
        let tag = node_tags.new_node_tag("late_only", nt, NodeTagFlags::default()).unwrap();
        node_tags.set_pass_bounds(tag, Some(2), None);

        let mut tree = Tree::new();
        let root = tree
            .create(&node_types, nt, Some(tag), Org::Synthetic, vec![])
            .unwrap();

        let violations = TreeChecker::check(&tree, &node_tags, root, 0);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].tag_name, "late_only");

        let violations = TreeChecker::check(&tree, &node_tags, root, 2);
        assert!(violations.is_empty());
    }
}
