//! Deep subtree cloning.
//!
//! A clone is allocated in the same arena as its source. It copies every
//! scalar (header, pool data, annotations) and shares the source's node ids,
//! so `id_map` can cross-reference a transformed tree back to its origin.

use crate::base::NodeIndex;
use crate::error::{AstError, AstResult};
use crate::kind::NodeKind;
use crate::node::{Node, NodeArena};
use jsast_common::limits::MAX_TREE_DEPTH;
use rustc_hash::FxHashMap;
use tracing::debug;

impl NodeArena {
    /// Deep-copy the subtree rooted at `index`, parented under `new_parent`
    /// (`NodeIndex::NONE` for a detached root). Returns the copy's index.
    ///
    /// The subtree's height is checked before anything is allocated, so a
    /// failed clone leaves the arena unchanged.
    pub fn clone_subtree(&mut self, index: NodeIndex, new_parent: NodeIndex) -> AstResult<NodeIndex> {
        self.try_get(index)?;
        if new_parent.is_some() {
            self.try_get(new_parent)?;
        }
        let height = self.subtree_height(index);
        if height > MAX_TREE_DEPTH {
            return Err(AstError::DepthLimitExceeded(MAX_TREE_DEPTH));
        }
        let before = self.nodes.len();

        // Copy every node first (pre-order, explicit stack), then point the
        // copies' child slots at the copied children.
        let mut copies: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
        let mut order = Vec::new();
        let mut stack = vec![(index, new_parent)];
        while let Some((source, parent)) = stack.pop() {
            let copy = self.copy_node(source, parent)?;
            copies.insert(source, copy);
            order.push(copy);
            stack.extend(
                self.get_children(source)
                    .into_iter()
                    .rev()
                    .map(|child| (child, copy)),
            );
        }
        for &copy in &order {
            self.relink_children(copy, &copies)?;
        }

        let copy = copies
            .get(&index)
            .copied()
            .ok_or(AstError::UnknownNode(index))?;
        debug!(
            source = index.0,
            copy = copy.0,
            nodes = self.nodes.len() - before,
            height,
            "clone subtree"
        );
        Ok(copy)
    }

    /// Number of levels in the subtree (1 for a leaf).
    pub fn subtree_height(&self, root: NodeIndex) -> u32 {
        if !self.contains(root) {
            return 0;
        }
        let mut max = 0;
        let mut stack = vec![(root, 1u32)];
        while let Some((index, level)) = stack.pop() {
            max = max.max(level);
            stack.extend(self.get_children(index).into_iter().map(|c| (c, level + 1)));
        }
        max
    }

    /// Copy one node's header, pool entry and extended info. The copy's
    /// child slots still name the source's children.
    fn copy_node(&mut self, index: NodeIndex, new_parent: NodeIndex) -> AstResult<NodeIndex> {
        let node = *self.try_get(index)?;

        macro_rules! dup {
            ($pool:ident) => {{
                let data = self
                    .$pool
                    .get(node.data_index as usize)
                    .cloned()
                    .ok_or(AstError::UnknownNode(index))?;
                let at = self.$pool.len() as u32;
                self.$pool.push(data);
                at
            }};
        }

        let data_index = match node.kind {
            NodeKind::Name => dup!(names),
            NodeKind::NumberLiteral => dup!(number_literals),
            NodeKind::StringLiteral => dup!(string_literals),
            NodeKind::KeywordLiteral => dup!(keyword_literals),
            NodeKind::ArrayLiteral => dup!(array_literals),
            NodeKind::ObjectLiteral => dup!(object_literals),
            NodeKind::ObjectProperty => dup!(object_properties),
            NodeKind::Block => dup!(blocks),
            NodeKind::ExpressionStatement => dup!(expr_statements),
            NodeKind::IfStatement => dup!(if_statements),
            NodeKind::TryStatement => dup!(try_data),
            NodeKind::CatchClause => dup!(catch_clauses),
            NodeKind::ForInLoop => dup!(for_in_loops),
            NodeKind::DoLoop => dup!(do_loops),
            NodeKind::WhileLoop => dup!(while_loops),
            NodeKind::EmptyExpression | NodeKind::EmptyStatement => Node::NO_DATA,
        };

        let mut info = self
            .get_extended(index)
            .cloned()
            .ok_or(AstError::UnknownNode(index))?;
        info.parent = new_parent;

        let copy = NodeIndex(self.nodes.len() as u32);
        self.nodes
            .push(Node::with_data(node.kind, node.pos, node.len, data_index));
        self.extended_info.push(info);
        Ok(copy)
    }

    /// Rewrite every child slot of `copy` through the source-to-copy map.
    fn relink_children(
        &mut self,
        copy: NodeIndex,
        copies: &FxHashMap<NodeIndex, NodeIndex>,
    ) -> AstResult<()> {
        let map = |child: &mut NodeIndex| {
            if child.is_some() {
                *child = copies.get(&*child).copied().unwrap_or(NodeIndex::NONE);
            }
        };

        match self.try_get(copy)?.kind {
            NodeKind::ArrayLiteral => self.array_literal_mut(copy)?.elements.nodes.iter_mut().for_each(map),
            NodeKind::ObjectLiteral => self.object_literal_mut(copy)?.elements.nodes.iter_mut().for_each(map),
            NodeKind::ObjectProperty => {
                let data = self.object_property_mut(copy)?;
                map(&mut data.left);
                map(&mut data.right);
            }
            NodeKind::Block => self.block_mut(copy)?.statements.nodes.iter_mut().for_each(map),
            NodeKind::ExpressionStatement => map(&mut self.expr_statement_mut(copy)?.expression),
            NodeKind::IfStatement => {
                let data = self.if_statement_mut(copy)?;
                map(&mut data.condition);
                map(&mut data.then_part);
                map(&mut data.else_part);
            }
            NodeKind::TryStatement => {
                let data = self.try_mut(copy)?;
                map(&mut data.try_block);
                data.catch_clauses.nodes.iter_mut().for_each(map);
                map(&mut data.finally_block);
            }
            NodeKind::CatchClause => {
                let data = self.catch_clause_mut(copy)?;
                map(&mut data.var_name);
                map(&mut data.catch_condition);
                map(&mut data.body);
            }
            NodeKind::ForInLoop => {
                let data = self.for_in_loop_mut(copy)?;
                map(&mut data.iterator);
                map(&mut data.iterated_object);
                map(&mut data.base.body);
            }
            NodeKind::DoLoop => {
                let data = self.do_loop_mut(copy)?;
                map(&mut data.base.body);
                map(&mut data.condition);
            }
            NodeKind::WhileLoop => {
                let data = self.while_loop_mut(copy)?;
                map(&mut data.condition);
                map(&mut data.base.body);
            }
            NodeKind::Name
            | NodeKind::NumberLiteral
            | NodeKind::StringLiteral
            | NodeKind::KeywordLiteral
            | NodeKind::EmptyExpression
            | NodeKind::EmptyStatement => {}
        }
        Ok(())
    }
}
