//! NodeArena access methods, NodeView, and read-side context queries.
//!
//! This module contains node lookup, typed pool accessors, structural child
//! enumeration and the parent-link queries (`ancestors`, `depth`, ...).

use crate::base::{NodeIndex, NodeList};
use crate::error::{AstError, AstResult};
use crate::kind::NodeKind;
use crate::node::*;
use jsast_common::{AnnotationSet, ChangeKind, NodeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Children of one node in structural order.
pub type ChildList = SmallVec<[NodeIndex; 4]>;

/// Generates `get_x(&Node)`, `get_x_at(NodeIndex)` and the crate-private
/// `x_mut(NodeIndex)` for a typed pool.
macro_rules! typed_pool {
    ($(#[$doc:meta])* $get:ident, $get_at:ident, $get_mut:ident, $pool:ident, $data:ty, $kind:ident) => {
        $(#[$doc])*
        #[inline]
        pub fn $get(&self, node: &Node) -> Option<&$data> {
            if node.kind == NodeKind::$kind && node.has_data() {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }

        $(#[$doc])*
        #[inline]
        pub fn $get_at(&self, index: NodeIndex) -> Option<&$data> {
            let node = self.get(index)?;
            self.$get(node)
        }

        #[inline]
        pub(crate) fn $get_mut(&mut self, index: NodeIndex) -> AstResult<&mut $data> {
            let node = *self.try_get(index)?;
            if node.kind != NodeKind::$kind {
                return Err(AstError::UnexpectedKind {
                    expected: stringify!($kind),
                    found: node.kind,
                });
            }
            self.$pool
                .get_mut(node.data_index as usize)
                .ok_or(AstError::UnknownNode(index))
        }
    };
}

impl NodeArena {
    /// Get a node header by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a node header, failing with `UnknownNode` for foreign or absent indices.
    #[inline]
    pub fn try_get(&self, index: NodeIndex) -> AstResult<&Node> {
        self.get(index).ok_or(AstError::UnknownNode(index))
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub(crate) fn extended_mut(&mut self, index: NodeIndex) -> AstResult<&mut ExtendedNodeInfo> {
        if index.is_none() {
            return Err(AstError::UnknownNode(index));
        }
        self.extended_info
            .get_mut(index.0 as usize)
            .ok_or(AstError::UnknownNode(index))
    }

    #[inline]
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.get(index).is_some()
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(|n| n.kind)
    }

    // =========================================================================
    // Typed pool accessors
    // =========================================================================

    typed_pool!(
        /// Identifier data
        get_name, get_name_at, name_mut, names, NameData, Name
    );
    typed_pool!(
        /// Numeric literal data
        get_number_literal, get_number_literal_at, number_literal_mut,
        number_literals, NumberLiteralData, NumberLiteral
    );
    typed_pool!(
        /// String literal data
        get_string_literal, get_string_literal_at, string_literal_mut,
        string_literals, StringLiteralData, StringLiteral
    );
    typed_pool!(
        /// Keyword literal data
        get_keyword_literal, get_keyword_literal_at, keyword_literal_mut,
        keyword_literals, KeywordLiteralData, KeywordLiteral
    );
    typed_pool!(
        /// Array literal data
        get_array_literal, get_array_literal_at, array_literal_mut,
        array_literals, ArrayLiteralData, ArrayLiteral
    );
    typed_pool!(
        /// Object literal data
        get_object_literal, get_object_literal_at, object_literal_mut,
        object_literals, ObjectLiteralData, ObjectLiteral
    );
    typed_pool!(
        /// Object property data
        get_object_property, get_object_property_at, object_property_mut,
        object_properties, ObjectPropertyData, ObjectProperty
    );
    typed_pool!(
        /// Block data
        get_block, get_block_at, block_mut, blocks, BlockData, Block
    );
    typed_pool!(
        /// Expression statement data
        get_expr_statement, get_expr_statement_at, expr_statement_mut,
        expr_statements, ExprStatementData, ExpressionStatement
    );
    typed_pool!(
        /// If statement data
        get_if_statement, get_if_statement_at, if_statement_mut,
        if_statements, IfStatementData, IfStatement
    );
    typed_pool!(
        /// Try statement data
        get_try, get_try_at, try_mut, try_data, TryData, TryStatement
    );
    typed_pool!(
        /// Catch clause data
        get_catch_clause, get_catch_clause_at, catch_clause_mut,
        catch_clauses, CatchClauseData, CatchClause
    );
    typed_pool!(
        /// For-in loop data
        get_for_in_loop, get_for_in_loop_at, for_in_loop_mut,
        for_in_loops, ForInLoopData, ForInLoop
    );
    typed_pool!(
        /// Do loop data
        get_do_loop, get_do_loop_at, do_loop_mut, do_loops, DoLoopData, DoLoop
    );
    typed_pool!(
        /// While loop data
        get_while_loop, get_while_loop_at, while_loop_mut,
        while_loops, WhileLoopData, WhileLoop
    );

    /// Shared loop slots of any iteration construct.
    pub fn get_loop_base(&self, node: &Node) -> Option<&LoopBase> {
        match node.kind {
            NodeKind::ForInLoop => self.get_for_in_loop(node).map(|l| &l.base),
            NodeKind::DoLoop => self.get_do_loop(node).map(|l| &l.base),
            NodeKind::WhileLoop => self.get_while_loop(node).map(|l| &l.base),
            _ => None,
        }
    }

    pub(crate) fn loop_base_mut(&mut self, index: NodeIndex) -> AstResult<&mut LoopBase> {
        match self.try_get(index)?.kind {
            NodeKind::ForInLoop => self.for_in_loop_mut(index).map(|l| &mut l.base),
            NodeKind::DoLoop => self.do_loop_mut(index).map(|l| &mut l.base),
            NodeKind::WhileLoop => self.while_loop_mut(index).map(|l| &mut l.base),
            found => Err(AstError::UnexpectedKind {
                expected: "a loop",
                found,
            }),
        }
    }

    // =========================================================================
    // Slot queries
    // =========================================================================

    /// Elements of an array or object literal. Empty for every other kind and
    /// for literals without elements.
    pub fn elements(&self, index: NodeIndex) -> &[NodeIndex] {
        let Some(node) = self.get(index) else {
            return &[];
        };
        self.element_list(node)
            .map(NodeList::as_slice)
            .unwrap_or(&[])
    }

    fn element_list(&self, node: &Node) -> Option<&NodeList> {
        match node.kind {
            NodeKind::ArrayLiteral => self.get_array_literal(node).map(|a| &a.elements),
            NodeKind::ObjectLiteral => self.get_object_literal(node).map(|o| &o.elements),
            _ => None,
        }
    }

    /// Element at `position`, failing with `IndexOutOfBounds` past the end.
    pub fn element_at(&self, index: NodeIndex, position: usize) -> AstResult<NodeIndex> {
        let node = self.try_get(index)?;
        let list = self.element_list(node).ok_or(AstError::UnexpectedKind {
            expected: "ArrayLiteral or ObjectLiteral",
            found: node.kind,
        })?;
        list.nodes
            .get(position)
            .copied()
            .ok_or(AstError::IndexOutOfBounds {
                kind: node.kind,
                slot: "elements",
                index: position,
                len: list.len(),
            })
    }

    /// Number of elements, elisions included.
    pub fn element_count(&self, index: NodeIndex) -> usize {
        self.elements(index).len()
    }

    /// Parser-computed destructuring length of an array literal.
    pub fn destructuring_length(&self, index: NodeIndex) -> i32 {
        self.get_array_literal_at(index)
            .map_or(0, |a| a.destructuring_length)
    }

    pub fn skip_count(&self, index: NodeIndex) -> i32 {
        self.get_array_literal_at(index).map_or(0, |a| a.skip_count)
    }

    /// Catch clauses of a try statement, in source order.
    pub fn catch_clauses(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get_try_at(index)
            .map(|t| t.catch_clauses.as_slice())
            .unwrap_or(&[])
    }

    /// Statements of a block, in source order.
    pub fn statements(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get_block_at(index)
            .map(|b| b.statements.as_slice())
            .unwrap_or(&[])
    }

    /// Body of a loop, `NONE` if not yet set or not a loop.
    pub fn loop_body(&self, index: NodeIndex) -> NodeIndex {
        self.get(index)
            .and_then(|n| self.get_loop_base(n))
            .map_or(NodeIndex::NONE, |b| b.body)
    }

    /// Labels attached to a loop.
    pub fn loop_labels(&self, index: NodeIndex) -> &[String] {
        self.get(index)
            .and_then(|n| self.get_loop_base(n))
            .map(|b| b.labels.as_slice())
            .unwrap_or(&[])
    }

    /// Condition of an if statement, do loop or while loop.
    pub fn condition(&self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        match node.kind {
            NodeKind::IfStatement => self.get_if_statement(node).map(|d| d.condition),
            NodeKind::DoLoop => self.get_do_loop(node).map(|d| d.condition),
            NodeKind::WhileLoop => self.get_while_loop(node).map(|d| d.condition),
            _ => None,
        }
        .unwrap_or(NodeIndex::NONE)
    }

    /// Whether an array or object literal is marked as a destructuring target.
    pub fn is_destructuring(&self, index: NodeIndex) -> bool {
        let Some(node) = self.get(index) else {
            return false;
        };
        match node.kind {
            NodeKind::ArrayLiteral => self.get_array_literal(node).is_some_and(|a| a.is_destructuring),
            NodeKind::ObjectLiteral => {
                self.get_object_literal(node).is_some_and(|o| o.is_destructuring)
            }
            _ => false,
        }
    }

    /// Identifier text of a `Name` node.
    pub fn identifier(&self, index: NodeIndex) -> Option<&str> {
        self.get_name_at(index).map(|n| n.identifier.as_str())
    }

    /// Source token of a `NumberLiteral` node.
    pub fn number_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_number_literal_at(index)
            .and_then(|n| n.value.as_deref())
    }

    // =========================================================================
    // Identity and annotations
    // =========================================================================

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |e| e.parent)
    }

    #[inline]
    pub fn id(&self, index: NodeIndex) -> Option<NodeId> {
        self.get_extended(index).map(|e| e.id)
    }

    pub fn change_kind(&self, index: NodeIndex) -> Option<ChangeKind> {
        self.get_extended(index).map(|e| e.change)
    }

    pub fn change_kind_no_propagate(&self, index: NodeIndex) -> Option<ChangeKind> {
        self.get_extended(index).map(|e| e.change_no_propagate)
    }

    pub fn criteria(&self, index: NodeIndex) -> Option<&AnnotationSet> {
        self.get_extended(index).and_then(|e| e.criteria.as_ref())
    }

    pub fn dependencies(&self, index: NodeIndex) -> Option<&AnnotationSet> {
        self.get_extended(index)
            .and_then(|e| e.dependencies.as_ref())
    }

    // =========================================================================
    // Read-side context
    // =========================================================================

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut current = self.parent(index);
        while current.is_some() {
            out.push(current);
            current = self.parent(current);
        }
        out
    }

    /// Number of ancestors; 0 for a root.
    pub fn depth(&self, index: NodeIndex) -> usize {
        self.ancestors(index).len()
    }

    /// Root of the tree containing `index`.
    pub fn root_of(&self, index: NodeIndex) -> NodeIndex {
        self.ancestors(index).last().copied().unwrap_or(index)
    }

    /// Whether the node is a statement.
    pub fn is_statement(&self, index: NodeIndex) -> bool {
        self.kind(index).is_some_and(NodeKind::is_statement)
    }

    /// Whether the node sits directly in a statement list or a statement
    /// slot (block, branch or loop body).
    pub fn in_statement_position(&self, index: NodeIndex) -> bool {
        let parent = self.parent(index);
        let Some(parent_node) = self.get(parent) else {
            return false;
        };
        match parent_node.kind {
            NodeKind::Block => true,
            NodeKind::IfStatement => self
                .get_if_statement(parent_node)
                .is_some_and(|d| d.then_part == index || d.else_part == index),
            NodeKind::ForInLoop | NodeKind::DoLoop | NodeKind::WhileLoop => {
                self.loop_body(parent) == index
            }
            _ => false,
        }
    }

    /// Children in the order traversal, cloning and rendering use.
    /// Absent optional slots are skipped.
    pub fn get_children(&self, index: NodeIndex) -> ChildList {
        let mut children = ChildList::new();
        let Some(node) = self.get(index) else {
            return children;
        };

        let mut add = |idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        match node.kind {
            NodeKind::ArrayLiteral | NodeKind::ObjectLiteral => {
                for &e in self.elements(index) {
                    add(e);
                }
            }
            NodeKind::ObjectProperty => {
                if let Some(d) = self.get_object_property(node) {
                    add(d.left);
                    add(d.right);
                }
            }
            NodeKind::Block => {
                for &s in self.statements(index) {
                    add(s);
                }
            }
            NodeKind::ExpressionStatement => {
                if let Some(d) = self.get_expr_statement(node) {
                    add(d.expression);
                }
            }
            NodeKind::IfStatement => {
                if let Some(d) = self.get_if_statement(node) {
                    add(d.condition);
                    add(d.then_part);
                    add(d.else_part);
                }
            }
            NodeKind::TryStatement => {
                if let Some(d) = self.get_try(node) {
                    add(d.try_block);
                    for &c in &d.catch_clauses.nodes {
                        add(c);
                    }
                    add(d.finally_block);
                }
            }
            NodeKind::CatchClause => {
                if let Some(d) = self.get_catch_clause(node) {
                    add(d.var_name);
                    add(d.catch_condition);
                    add(d.body);
                }
            }
            NodeKind::ForInLoop => {
                if let Some(d) = self.get_for_in_loop(node) {
                    add(d.iterator);
                    add(d.iterated_object);
                    add(d.base.body);
                }
            }
            NodeKind::DoLoop => {
                if let Some(d) = self.get_do_loop(node) {
                    add(d.base.body);
                    add(d.condition);
                }
            }
            NodeKind::WhileLoop => {
                if let Some(d) = self.get_while_loop(node) {
                    add(d.condition);
                    add(d.base.body);
                }
            }
            NodeKind::Name
            | NodeKind::NumberLiteral
            | NodeKind::StringLiteral
            | NodeKind::KeywordLiteral
            | NodeKind::EmptyExpression
            | NodeKind::EmptyStatement => {}
        }

        children
    }

    /// Map each id in the subtree to the first node (pre-order) carrying it.
    ///
    /// Clones share ids with their source, so looking up a clone's id in the
    /// map of the original tree finds the node it was copied from.
    pub fn id_map(&self, root: NodeIndex) -> FxHashMap<NodeId, NodeIndex> {
        let mut map = FxHashMap::default();
        self.visit(root, &mut |arena: &NodeArena, idx: NodeIndex| {
            if let Some(id) = arena.id(idx) {
                map.entry(id).or_insert(idx);
            }
            true
        });
        map
    }

    /// Kind-and-child-shape comparison of two subtrees, possibly in different
    /// arenas. Scalar values (identifiers, literal text) are not compared.
    pub fn shape_eq(&self, a: NodeIndex, other: &NodeArena, b: NodeIndex) -> bool {
        let mut stack = vec![(a, b)];
        while let Some((x, y)) = stack.pop() {
            if self.kind(x) != other.kind(y) {
                return false;
            }
            let left = self.get_children(x);
            let right = other.get_children(y);
            if left.len() != right.len() {
                return false;
            }
            stack.extend(left.into_iter().zip(right));
        }
        true
    }
}

// =============================================================================
// NodeView
// =============================================================================

/// Borrowed view of one node with its arena, for ergonomic read access.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    pub node: &'a Node,
    pub arena: &'a NodeArena,
    pub index: NodeIndex,
}

impl<'a> NodeView<'a> {
    #[inline]
    pub fn new(arena: &'a NodeArena, index: NodeIndex) -> Option<NodeView<'a>> {
        arena.get(index).map(|node| NodeView { node, arena, index })
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    #[inline]
    pub fn pos(&self) -> i32 {
        self.node.pos
    }

    /// Length in the source text, or `NO_POSITION`.
    #[inline]
    pub fn source_len(&self) -> i32 {
        self.node.len
    }

    #[inline]
    pub fn end(&self) -> Option<i32> {
        self.node.end()
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeView<'a>> {
        NodeView::new(self.arena, self.arena.parent(self.index))
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.arena.id(self.index).unwrap_or_default()
    }

    /// Children as views, in structural order.
    pub fn children(&self) -> impl Iterator<Item = NodeView<'a>> + 'a {
        let arena = self.arena;
        arena
            .get_children(self.index)
            .into_iter()
            .filter_map(move |idx| NodeView::new(arena, idx))
    }
}
