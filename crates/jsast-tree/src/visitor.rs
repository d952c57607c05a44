//! Node Visitor Pattern
//!
//! A walker decides, for each node, whether to descend into its children.
//! That single decision is the whole extension point: there is no post-order
//! hook and no way to skip one child once descent is granted.
//!
//! # Usage
//!
//! ```rust
//! use jsast_tree::{NodeArena, NodeIndex, NodeKind};
//!
//! let mut arena = NodeArena::new();
//! let array = arena.add_node(NodeKind::ArrayLiteral, 0, 6);
//! let one = arena.add_number_literal(1, "1");
//! let two = arena.add_number_literal(4, "2");
//! arena.set_elements(array, vec![one, two]).unwrap();
//!
//! let mut kinds = Vec::new();
//! arena.visit(array, &mut |arena: &NodeArena, idx: NodeIndex| {
//!     kinds.extend(arena.kind(idx));
//!     true
//! });
//! assert_eq!(kinds, [NodeKind::ArrayLiteral, NodeKind::NumberLiteral, NodeKind::NumberLiteral]);
//! ```

use crate::base::NodeIndex;
use crate::node::NodeArena;

/// Visitor over an arena-backed tree.
pub trait NodeVisitor {
    /// Called on each node in pre-order. Return `true` to descend into the
    /// node's children, `false` to skip the whole subtree below it.
    fn visit(&mut self, arena: &NodeArena, index: NodeIndex) -> bool;
}

impl<F> NodeVisitor for F
where
    F: FnMut(&NodeArena, NodeIndex) -> bool,
{
    #[inline]
    fn visit(&mut self, arena: &NodeArena, index: NodeIndex) -> bool {
        self(arena, index)
    }
}

impl NodeArena {
    /// Depth-first, pre-order walk of the subtree rooted at `root`.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees are fine. Children
    /// come in `get_children` order; absent slots are never visited.
    pub fn visit<V: NodeVisitor + ?Sized>(&self, root: NodeIndex, visitor: &mut V) {
        if !self.contains(root) {
            return;
        }
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if !visitor.visit(self, index) {
                continue;
            }
            // Reverse so the first child is popped first.
            stack.extend(self.get_children(index).into_iter().rev());
        }
    }

    /// Pre-order list of every node in the subtree.
    pub fn collect_preorder(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        self.visit(root, &mut |_: &NodeArena, idx: NodeIndex| {
            out.push(idx);
            true
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;

    #[test]
    fn returning_false_prunes_only_that_subtree() {
        let mut arena = NodeArena::new();
        let outer = arena.add_node(NodeKind::ArrayLiteral, 0, 10);
        let inner = arena.add_node(NodeKind::ArrayLiteral, 1, 5);
        let hidden = arena.add_name(2, "hidden");
        let after = arena.add_name(8, "after");
        arena.set_elements(inner, vec![hidden]).unwrap();
        arena.set_elements(outer, vec![inner, after]).unwrap();

        let mut seen = Vec::new();
        arena.visit(outer, &mut |_: &NodeArena, idx: NodeIndex| {
            seen.push(idx);
            idx != inner
        });
        assert_eq!(seen, vec![outer, inner, after]);
    }

    #[test]
    fn visiting_none_is_a_no_op() {
        let arena = NodeArena::new();
        let mut calls = 0;
        arena.visit(NodeIndex::NONE, &mut |_: &NodeArena, _: NodeIndex| {
            calls += 1;
            true
        });
        assert_eq!(calls, 0);
    }
}
