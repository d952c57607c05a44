//! NodeArena creation methods (add_* methods) and child setters.
//!
//! Every setter that stores a child also overwrites that child's parent link,
//! in one call. A child that some other slot still holds is moved: it is
//! removed from that slot first. A child displaced by a setter is detached
//! (its parent link is reset) so it becomes a root of its own.

use crate::base::{NO_POSITION, NodeIndex, NodeList};
use crate::error::{AstError, AstResult};
use crate::kind::{Keyword, NodeKind};
use crate::node::*;
use jsast_common::limits::MAX_NODE_PREALLOC;
use jsast_common::{AnnotationSet, ChangeKind, NodeId};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Push `data` onto a pool and return its index.
fn push_pool<T>(pool: &mut Vec<T>, data: T) -> u32 {
    let index = pool.len() as u32;
    pool.push(data);
    index
}

/// Length of a token in source characters.
fn char_len(text: &str) -> i32 {
    i32::try_from(text.chars().count()).unwrap_or(i32::MAX)
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity for headers and side table.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena
    }

    /// Number of nodes ever allocated (detached nodes included).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        macro_rules! clear_vecs {
            ($($field:ident),+ $(,)?) => {
                $(self.$field.clear();)+
            };
        }

        clear_vecs!(
            nodes,
            extended_info,
            names,
            number_literals,
            string_literals,
            keyword_literals,
            array_literals,
            object_literals,
            object_properties,
            blocks,
            expr_statements,
            if_statements,
            try_data,
            catch_clauses,
            for_in_loops,
            do_loops,
            while_loops,
        );
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Allocate a header plus a fresh id, returning its index.
    pub(crate) fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo {
            id: NodeId::fresh(),
            ..ExtendedNodeInfo::default()
        });
        trace!(index, kind = %node.kind, "add node");
        NodeIndex(index)
    }

    /// Allocate an empty node of any kind. Required slots start absent and
    /// must be filled by the matching setters before the node is printed or
    /// emitted.
    pub fn add_node(&mut self, kind: NodeKind, pos: i32, len: i32) -> NodeIndex {
        let data_index = match kind {
            NodeKind::Name => push_pool(&mut self.names, NameData::default()),
            NodeKind::NumberLiteral => {
                push_pool(&mut self.number_literals, NumberLiteralData::default())
            }
            NodeKind::StringLiteral => {
                push_pool(&mut self.string_literals, StringLiteralData::default())
            }
            NodeKind::KeywordLiteral => {
                push_pool(&mut self.keyword_literals, KeywordLiteralData::default())
            }
            NodeKind::ArrayLiteral => {
                push_pool(&mut self.array_literals, ArrayLiteralData::default())
            }
            NodeKind::ObjectLiteral => {
                push_pool(&mut self.object_literals, ObjectLiteralData::default())
            }
            NodeKind::ObjectProperty => {
                push_pool(&mut self.object_properties, ObjectPropertyData::default())
            }
            NodeKind::Block => push_pool(&mut self.blocks, BlockData::default()),
            NodeKind::ExpressionStatement => {
                push_pool(&mut self.expr_statements, ExprStatementData::default())
            }
            NodeKind::IfStatement => {
                push_pool(&mut self.if_statements, IfStatementData::default())
            }
            NodeKind::TryStatement => push_pool(&mut self.try_data, TryData::default()),
            NodeKind::CatchClause => {
                push_pool(&mut self.catch_clauses, CatchClauseData::default())
            }
            NodeKind::ForInLoop => push_pool(&mut self.for_in_loops, ForInLoopData::default()),
            NodeKind::DoLoop => push_pool(&mut self.do_loops, DoLoopData::default()),
            NodeKind::WhileLoop => push_pool(&mut self.while_loops, WhileLoopData::default()),
            NodeKind::EmptyExpression | NodeKind::EmptyStatement => Node::NO_DATA,
        };
        self.push_node(Node::with_data(kind, pos, len, data_index))
    }

    /// Identifier; length is the identifier's length.
    pub fn add_name(&mut self, pos: i32, identifier: &str) -> NodeIndex {
        let data_index = push_pool(
            &mut self.names,
            NameData {
                identifier: identifier.to_string(),
            },
        );
        self.push_node(Node::with_data(
            NodeKind::Name,
            pos,
            char_len(identifier),
            data_index,
        ))
    }

    /// Numeric literal from its source token; length is the token's length.
    pub fn add_number_literal(&mut self, pos: i32, value: &str) -> NodeIndex {
        let data_index = push_pool(
            &mut self.number_literals,
            NumberLiteralData {
                value: Some(value.to_string()),
                number: 0.0,
            },
        );
        self.push_node(Node::with_data(
            NodeKind::NumberLiteral,
            pos,
            char_len(value),
            data_index,
        ))
    }

    /// Numeric literal from its source token and decoded magnitude.
    pub fn add_number_literal_with_value(&mut self, pos: i32, value: &str, number: f64) -> NodeIndex {
        let index = self.add_number_literal(pos, value);
        if let Some(data) = self.number_literals.last_mut() {
            data.number = number;
        }
        index
    }

    /// Numeric literal synthesized from a value, with no source position.
    /// The text is the shortest decimal that round-trips (`1.0`, `0.5`).
    pub fn add_number_from_f64(&mut self, number: f64) -> NodeIndex {
        let text = format!("{number:?}");
        let data_index = push_pool(
            &mut self.number_literals,
            NumberLiteralData {
                value: Some(text),
                number,
            },
        );
        self.push_node(Node::with_data(
            NodeKind::NumberLiteral,
            NO_POSITION,
            NO_POSITION,
            data_index,
        ))
    }

    /// String literal. `value` is the unescaped content without quotes.
    pub fn add_string_literal(&mut self, pos: i32, len: i32, value: &str, quote_char: char) -> NodeIndex {
        let data_index = push_pool(
            &mut self.string_literals,
            StringLiteralData {
                value: value.to_string(),
                quote_char,
            },
        );
        self.push_node(Node::with_data(NodeKind::StringLiteral, pos, len, data_index))
    }

    /// `true`, `false`, `null` or `this`.
    pub fn add_keyword_literal(&mut self, pos: i32, keyword: Keyword) -> NodeIndex {
        let data_index = push_pool(&mut self.keyword_literals, KeywordLiteralData { keyword });
        self.push_node(Node::with_data(
            NodeKind::KeywordLiteral,
            pos,
            char_len(keyword.as_str()),
            data_index,
        ))
    }

    /// Placeholder for an array elision (`[1, , 3]`).
    pub fn add_empty_expression(&mut self, pos: i32) -> NodeIndex {
        self.push_node(Node::new(NodeKind::EmptyExpression, pos, 0))
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    /// Set the parent link of `child`.
    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            info.parent = parent;
        }
    }

    /// Reset the parent link of a displaced child, unless something else has
    /// adopted it in the meantime.
    fn detach(&mut self, child: NodeIndex, from: NodeIndex) {
        if child.is_none() {
            return;
        }
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            if info.parent == from {
                trace!(child = child.0, parent = from.0, "detach child");
                info.parent = NodeIndex::NONE;
            }
        }
    }

    /// Validate that `child` can be stored under `parent`.
    fn check_child(
        &self,
        parent: NodeIndex,
        child: NodeIndex,
        slot: &'static str,
        required: bool,
    ) -> AstResult<()> {
        let parent_kind = self.try_get(parent)?.kind;
        if child.is_none() {
            if required {
                return Err(AstError::MissingRequiredChild {
                    kind: parent_kind,
                    slot,
                });
            }
            return Ok(());
        }
        self.try_get(child)?;
        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(AstError::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    fn check_kind(&self, child: NodeIndex, expected: NodeKind) -> AstResult<()> {
        let found = self.try_get(child)?.kind;
        if found != expected {
            return Err(AstError::UnexpectedKind {
                expected: expected.name(),
                found,
            });
        }
        Ok(())
    }

    /// Take `child` out of whichever slot or list currently holds it, so a
    /// node is held by exactly one parent at a time.
    fn release(&mut self, child: NodeIndex) -> AstResult<()> {
        let owner = self.parent(child);
        if owner.is_none() {
            return Ok(());
        }
        trace!(child = child.0, owner = owner.0, "move child");
        self.unlink(owner, child)?;
        self.set_parent(child, NodeIndex::NONE);
        Ok(())
    }

    /// Clear every slot of `owner` that refers to `child`.
    fn unlink(&mut self, owner: NodeIndex, child: NodeIndex) -> AstResult<()> {
        fn clear(slot: &mut NodeIndex, child: NodeIndex) {
            if *slot == child {
                *slot = NodeIndex::NONE;
            }
        }

        match self.try_get(owner)?.kind {
            NodeKind::ArrayLiteral => {
                self.array_literal_mut(owner)?.elements.nodes.retain(|&c| c != child);
            }
            NodeKind::ObjectLiteral => {
                self.object_literal_mut(owner)?.elements.nodes.retain(|&c| c != child);
            }
            NodeKind::ObjectProperty => {
                let data = self.object_property_mut(owner)?;
                clear(&mut data.left, child);
                clear(&mut data.right, child);
            }
            NodeKind::Block => {
                self.block_mut(owner)?.statements.nodes.retain(|&c| c != child);
            }
            NodeKind::ExpressionStatement => {
                clear(&mut self.expr_statement_mut(owner)?.expression, child);
            }
            NodeKind::IfStatement => {
                let data = self.if_statement_mut(owner)?;
                clear(&mut data.condition, child);
                clear(&mut data.then_part, child);
                clear(&mut data.else_part, child);
            }
            NodeKind::TryStatement => {
                let data = self.try_mut(owner)?;
                clear(&mut data.try_block, child);
                data.catch_clauses.nodes.retain(|&c| c != child);
                clear(&mut data.finally_block, child);
            }
            NodeKind::CatchClause => {
                let data = self.catch_clause_mut(owner)?;
                clear(&mut data.var_name, child);
                clear(&mut data.catch_condition, child);
                clear(&mut data.body, child);
            }
            NodeKind::ForInLoop => {
                let data = self.for_in_loop_mut(owner)?;
                clear(&mut data.iterator, child);
                clear(&mut data.iterated_object, child);
                clear(&mut data.base.body, child);
            }
            NodeKind::DoLoop => {
                let data = self.do_loop_mut(owner)?;
                clear(&mut data.base.body, child);
                clear(&mut data.condition, child);
            }
            NodeKind::WhileLoop => {
                let data = self.while_loop_mut(owner)?;
                clear(&mut data.condition, child);
                clear(&mut data.base.body, child);
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

    /// Store-side bookkeeping for a single slot: detach the old occupant and
    /// link the new one.
    fn adopt(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if old != new {
            self.detach(old, parent);
        }
        if new.is_some() {
            self.set_parent(new, parent);
        }
    }

    /// Validate a replacement list before anything is mutated.
    fn check_list(
        &self,
        parent: NodeIndex,
        children: &[NodeIndex],
        slot: &'static str,
        expected: Option<NodeKind>,
    ) -> AstResult<()> {
        let mut seen = FxHashSet::default();
        for &child in children {
            self.check_child(parent, child, slot, true)?;
            if let Some(kind) = expected {
                self.check_kind(child, kind)?;
            }
            if !seen.insert(child) {
                return Err(AstError::DuplicateChild { child, slot });
            }
        }
        Ok(())
    }

    /// Swap in a validated list: detach children that left, link all of the
    /// new ones.
    fn adopt_list(&mut self, parent: NodeIndex, old: NodeList, new: &[NodeIndex]) {
        for child in old.nodes {
            if !new.contains(&child) {
                self.detach(child, parent);
            }
        }
        for &child in new {
            self.set_parent(child, parent);
        }
    }

    /// Validate an append to an existing list.
    fn check_append(
        &self,
        parent: NodeIndex,
        existing: &[NodeIndex],
        child: NodeIndex,
        slot: &'static str,
    ) -> AstResult<()> {
        self.check_child(parent, child, slot, true)?;
        if existing.contains(&child) {
            return Err(AstError::DuplicateChild { child, slot });
        }
        Ok(())
    }

    // ============================================================================
    // Container literals
    // ============================================================================

    /// Replace the elements of an array or object literal. Object literals
    /// only accept `ObjectProperty` elements; array elisions must be
    /// `EmptyExpression` nodes.
    pub fn set_elements(&mut self, index: NodeIndex, elements: Vec<NodeIndex>) -> AstResult<()> {
        let kind = self.try_get(index)?.kind;
        let expected = match kind {
            NodeKind::ArrayLiteral => None,
            NodeKind::ObjectLiteral => Some(NodeKind::ObjectProperty),
            found => {
                return Err(AstError::UnexpectedKind {
                    expected: "ArrayLiteral or ObjectLiteral",
                    found,
                });
            }
        };
        self.check_list(index, &elements, "elements", expected)?;
        for &element in &elements {
            self.release(element)?;
        }

        let list = NodeList { nodes: elements };
        let old = match kind {
            NodeKind::ArrayLiteral => std::mem::replace(&mut self.array_literal_mut(index)?.elements, list),
            _ => std::mem::replace(&mut self.object_literal_mut(index)?.elements, list),
        };
        let new = self.elements(index).to_vec();
        self.adopt_list(index, old, &new);
        Ok(())
    }

    /// Append one element to an array or object literal.
    pub fn add_element(&mut self, index: NodeIndex, element: NodeIndex) -> AstResult<()> {
        let kind = self.try_get(index)?.kind;
        match kind {
            NodeKind::ArrayLiteral => {}
            NodeKind::ObjectLiteral => self.check_kind(element, NodeKind::ObjectProperty)?,
            found => {
                return Err(AstError::UnexpectedKind {
                    expected: "ArrayLiteral or ObjectLiteral",
                    found,
                });
            }
        }
        self.check_append(index, self.elements(index), element, "elements")?;
        self.release(element)?;
        match kind {
            NodeKind::ArrayLiteral => self.array_literal_mut(index)?.elements.nodes.push(element),
            _ => self.object_literal_mut(index)?.elements.nodes.push(element),
        }
        self.set_parent(element, index);
        Ok(())
    }

    pub fn set_destructuring_length(&mut self, index: NodeIndex, length: i32) -> AstResult<()> {
        self.array_literal_mut(index)?.destructuring_length = length;
        Ok(())
    }

    pub fn set_skip_count(&mut self, index: NodeIndex, count: i32) -> AstResult<()> {
        self.array_literal_mut(index)?.skip_count = count;
        Ok(())
    }

    /// Mark an array or object literal as the target of a destructuring
    /// assignment or binding.
    pub fn set_is_destructuring(&mut self, index: NodeIndex, destructuring: bool) -> AstResult<()> {
        match self.try_get(index)?.kind {
            NodeKind::ArrayLiteral => self.array_literal_mut(index)?.is_destructuring = destructuring,
            NodeKind::ObjectLiteral => {
                self.object_literal_mut(index)?.is_destructuring = destructuring
            }
            found => {
                return Err(AstError::UnexpectedKind {
                    expected: "ArrayLiteral or ObjectLiteral",
                    found,
                });
            }
        }
        Ok(())
    }

    pub fn set_property_left(&mut self, index: NodeIndex, left: NodeIndex) -> AstResult<()> {
        self.object_property_mut(index)?;
        self.check_child(index, left, "left", true)?;
        self.release(left)?;
        let old = std::mem::replace(&mut self.object_property_mut(index)?.left, left);
        self.adopt(index, old, left);
        Ok(())
    }

    pub fn set_property_right(&mut self, index: NodeIndex, right: NodeIndex) -> AstResult<()> {
        self.object_property_mut(index)?;
        self.check_child(index, right, "right", true)?;
        self.release(right)?;
        let old = std::mem::replace(&mut self.object_property_mut(index)?.right, right);
        self.adopt(index, old, right);
        Ok(())
    }

    // ============================================================================
    // Leaves
    // ============================================================================

    /// Set the source token of a numeric literal. The token is written once.
    pub fn set_number_text(&mut self, index: NodeIndex, value: &str) -> AstResult<()> {
        let data = self.number_literal_mut(index)?;
        if data.value.is_some() {
            return Err(AstError::ValueAlreadySet {
                kind: NodeKind::NumberLiteral,
                slot: "value",
            });
        }
        data.value = Some(value.to_string());
        Ok(())
    }

    /// Set the decoded magnitude of a numeric literal.
    pub fn set_number(&mut self, index: NodeIndex, number: f64) -> AstResult<()> {
        self.number_literal_mut(index)?.number = number;
        Ok(())
    }

    pub fn set_identifier(&mut self, index: NodeIndex, identifier: &str) -> AstResult<()> {
        self.name_mut(index)?.identifier = identifier.to_string();
        Ok(())
    }

    pub fn set_string_value(&mut self, index: NodeIndex, value: &str, quote_char: char) -> AstResult<()> {
        let data = self.string_literal_mut(index)?;
        data.value = value.to_string();
        data.quote_char = quote_char;
        Ok(())
    }

    pub fn set_keyword(&mut self, index: NodeIndex, keyword: Keyword) -> AstResult<()> {
        self.keyword_literal_mut(index)?.keyword = keyword;
        Ok(())
    }

    // ============================================================================
    // Statements
    // ============================================================================

    pub fn set_statements(&mut self, index: NodeIndex, statements: Vec<NodeIndex>) -> AstResult<()> {
        self.block_mut(index)?;
        self.check_list(index, &statements, "statements", None)?;
        for &statement in &statements {
            self.release(statement)?;
        }
        let old = std::mem::replace(
            &mut self.block_mut(index)?.statements,
            NodeList { nodes: statements },
        );
        let new = self.statements(index).to_vec();
        self.adopt_list(index, old, &new);
        Ok(())
    }

    pub fn add_statement(&mut self, index: NodeIndex, statement: NodeIndex) -> AstResult<()> {
        self.block_mut(index)?;
        self.check_append(index, self.statements(index), statement, "statements")?;
        self.release(statement)?;
        self.block_mut(index)?.statements.nodes.push(statement);
        self.set_parent(statement, index);
        Ok(())
    }

    pub fn set_expression(&mut self, index: NodeIndex, expression: NodeIndex) -> AstResult<()> {
        self.expr_statement_mut(index)?;
        self.check_child(index, expression, "expression", true)?;
        self.release(expression)?;
        let old = std::mem::replace(&mut self.expr_statement_mut(index)?.expression, expression);
        self.adopt(index, old, expression);
        Ok(())
    }

    /// Set the condition of an if statement, do loop or while loop.
    pub fn set_condition(&mut self, index: NodeIndex, condition: NodeIndex) -> AstResult<()> {
        let kind = self.try_get(index)?.kind;
        if !matches!(
            kind,
            NodeKind::IfStatement | NodeKind::DoLoop | NodeKind::WhileLoop
        ) {
            return Err(AstError::UnexpectedKind {
                expected: "IfStatement, DoLoop or WhileLoop",
                found: kind,
            });
        }
        self.check_child(index, condition, "condition", true)?;
        self.release(condition)?;
        let slot = match kind {
            NodeKind::IfStatement => &mut self.if_statement_mut(index)?.condition,
            NodeKind::DoLoop => &mut self.do_loop_mut(index)?.condition,
            _ => &mut self.while_loop_mut(index)?.condition,
        };
        let old = std::mem::replace(slot, condition);
        self.adopt(index, old, condition);
        Ok(())
    }

    pub fn set_then_part(&mut self, index: NodeIndex, then_part: NodeIndex) -> AstResult<()> {
        self.if_statement_mut(index)?;
        self.check_child(index, then_part, "then_part", true)?;
        self.release(then_part)?;
        let old = std::mem::replace(&mut self.if_statement_mut(index)?.then_part, then_part);
        self.adopt(index, old, then_part);
        Ok(())
    }

    /// Set or clear (`NodeIndex::NONE`) the else branch.
    pub fn set_else_part(&mut self, index: NodeIndex, else_part: NodeIndex) -> AstResult<()> {
        self.if_statement_mut(index)?;
        self.check_child(index, else_part, "else_part", false)?;
        self.release(else_part)?;
        let old = std::mem::replace(&mut self.if_statement_mut(index)?.else_part, else_part);
        self.adopt(index, old, else_part);
        Ok(())
    }

    pub fn set_else_position(&mut self, index: NodeIndex, position: i32) -> AstResult<()> {
        self.if_statement_mut(index)?.else_position = position;
        Ok(())
    }

    /// Record the parenthesis offsets around an if condition.
    pub fn set_parens(&mut self, index: NodeIndex, lp: i32, rp: i32) -> AstResult<()> {
        let data = self.if_statement_mut(index)?;
        data.lp = lp;
        data.rp = rp;
        Ok(())
    }

    pub fn set_try_block(&mut self, index: NodeIndex, try_block: NodeIndex) -> AstResult<()> {
        self.try_mut(index)?;
        self.check_child(index, try_block, "try_block", true)?;
        self.release(try_block)?;
        let old = std::mem::replace(&mut self.try_mut(index)?.try_block, try_block);
        self.adopt(index, old, try_block);
        Ok(())
    }

    /// Replace the catch clauses. Every entry must be a `CatchClause` node.
    pub fn set_catch_clauses(&mut self, index: NodeIndex, clauses: Vec<NodeIndex>) -> AstResult<()> {
        self.try_mut(index)?;
        self.check_list(index, &clauses, "catch_clauses", Some(NodeKind::CatchClause))?;
        for &clause in &clauses {
            self.release(clause)?;
        }
        let old = std::mem::replace(
            &mut self.try_mut(index)?.catch_clauses,
            NodeList { nodes: clauses },
        );
        let new = self.catch_clauses(index).to_vec();
        self.adopt_list(index, old, &new);
        Ok(())
    }

    pub fn add_catch_clause(&mut self, index: NodeIndex, clause: NodeIndex) -> AstResult<()> {
        self.try_mut(index)?;
        self.check_append(index, self.catch_clauses(index), clause, "catch_clauses")?;
        self.check_kind(clause, NodeKind::CatchClause)?;
        self.release(clause)?;
        self.try_mut(index)?.catch_clauses.nodes.push(clause);
        self.set_parent(clause, index);
        Ok(())
    }

    /// Set or clear (`NodeIndex::NONE`) the finally block.
    pub fn set_finally_block(&mut self, index: NodeIndex, finally_block: NodeIndex) -> AstResult<()> {
        self.try_mut(index)?;
        self.check_child(index, finally_block, "finally_block", false)?;
        self.release(finally_block)?;
        let old = std::mem::replace(&mut self.try_mut(index)?.finally_block, finally_block);
        self.adopt(index, old, finally_block);
        Ok(())
    }

    pub fn set_finally_position(&mut self, index: NodeIndex, position: i32) -> AstResult<()> {
        self.try_mut(index)?.finally_position = position;
        Ok(())
    }

    pub fn set_catch_var_name(&mut self, index: NodeIndex, var_name: NodeIndex) -> AstResult<()> {
        self.catch_clause_mut(index)?;
        self.check_child(index, var_name, "var_name", true)?;
        self.release(var_name)?;
        let old = std::mem::replace(&mut self.catch_clause_mut(index)?.var_name, var_name);
        self.adopt(index, old, var_name);
        Ok(())
    }

    /// Set or clear the `if` guard of a catch clause.
    pub fn set_catch_condition(&mut self, index: NodeIndex, condition: NodeIndex) -> AstResult<()> {
        self.catch_clause_mut(index)?;
        self.check_child(index, condition, "catch_condition", false)?;
        self.release(condition)?;
        let old = std::mem::replace(&mut self.catch_clause_mut(index)?.catch_condition, condition);
        self.adopt(index, old, condition);
        Ok(())
    }

    pub fn set_catch_body(&mut self, index: NodeIndex, body: NodeIndex) -> AstResult<()> {
        self.catch_clause_mut(index)?;
        self.check_child(index, body, "body", true)?;
        self.release(body)?;
        let old = std::mem::replace(&mut self.catch_clause_mut(index)?.body, body);
        self.adopt(index, old, body);
        Ok(())
    }

    pub fn set_catch_positions(&mut self, index: NodeIndex, if_position: i32, lp: i32, rp: i32) -> AstResult<()> {
        let data = self.catch_clause_mut(index)?;
        data.if_position = if_position;
        data.lp = lp;
        data.rp = rp;
        Ok(())
    }

    // ============================================================================
    // Loops
    // ============================================================================

    /// Set the body of any loop.
    pub fn set_body(&mut self, index: NodeIndex, body: NodeIndex) -> AstResult<()> {
        self.loop_base_mut(index)?;
        self.check_child(index, body, "body", true)?;
        self.release(body)?;
        let old = std::mem::replace(&mut self.loop_base_mut(index)?.body, body);
        self.adopt(index, old, body);
        Ok(())
    }

    pub fn set_loop_parens(&mut self, index: NodeIndex, lp: i32, rp: i32) -> AstResult<()> {
        let base = self.loop_base_mut(index)?;
        base.lp = lp;
        base.rp = rp;
        Ok(())
    }

    /// Record that a labeled statement targets this loop. Labels are kept
    /// in the order they were added; repeats are ignored.
    pub fn add_loop_label(&mut self, index: NodeIndex, label: &str) -> AstResult<()> {
        let base = self.loop_base_mut(index)?;
        if !base.labels.iter().any(|l| l == label) {
            base.labels.push(label.to_string());
        }
        Ok(())
    }

    pub fn set_iterator(&mut self, index: NodeIndex, iterator: NodeIndex) -> AstResult<()> {
        self.for_in_loop_mut(index)?;
        self.check_child(index, iterator, "iterator", true)?;
        self.release(iterator)?;
        let old = std::mem::replace(&mut self.for_in_loop_mut(index)?.iterator, iterator);
        self.adopt(index, old, iterator);
        Ok(())
    }

    pub fn set_iterated_object(&mut self, index: NodeIndex, object: NodeIndex) -> AstResult<()> {
        self.for_in_loop_mut(index)?;
        self.check_child(index, object, "iterated_object", true)?;
        self.release(object)?;
        let old = std::mem::replace(&mut self.for_in_loop_mut(index)?.iterated_object, object);
        self.adopt(index, old, object);
        Ok(())
    }

    pub fn set_is_for_each(&mut self, index: NodeIndex, is_for_each: bool) -> AstResult<()> {
        self.for_in_loop_mut(index)?.is_for_each = is_for_each;
        Ok(())
    }

    pub fn set_in_position(&mut self, index: NodeIndex, position: i32) -> AstResult<()> {
        self.for_in_loop_mut(index)?.in_position = position;
        Ok(())
    }

    pub fn set_each_position(&mut self, index: NodeIndex, position: i32) -> AstResult<()> {
        self.for_in_loop_mut(index)?.each_position = position;
        Ok(())
    }

    pub fn set_while_position(&mut self, index: NodeIndex, position: i32) -> AstResult<()> {
        self.do_loop_mut(index)?.while_position = position;
        Ok(())
    }

    // ============================================================================
    // Positions and annotations
    // ============================================================================

    pub fn set_position(&mut self, index: NodeIndex, pos: i32, len: i32) -> AstResult<()> {
        let node = self.nodes.get_mut(index.0 as usize).ok_or(AstError::UnknownNode(index))?;
        node.pos = pos;
        node.len = len;
        Ok(())
    }

    pub fn set_line(&mut self, index: NodeIndex, line: i32) -> AstResult<()> {
        self.extended_mut(index)?.line = line;
        Ok(())
    }

    pub fn set_change_kind(&mut self, index: NodeIndex, change: ChangeKind) -> AstResult<()> {
        self.extended_mut(index)?.change = change;
        Ok(())
    }

    pub fn set_change_kind_no_propagate(&mut self, index: NodeIndex, change: ChangeKind) -> AstResult<()> {
        self.extended_mut(index)?.change_no_propagate = change;
        Ok(())
    }

    pub fn set_moved(&mut self, index: NodeIndex, moved: bool) -> AstResult<()> {
        self.extended_mut(index)?.moved = moved;
        Ok(())
    }

    pub fn set_fixed_position(&mut self, index: NodeIndex, fixed: bool) -> AstResult<()> {
        self.extended_mut(index)?.fixed_position = fixed;
        Ok(())
    }

    /// Attach the annotator's criteria. Can be done once per node.
    pub fn attach_criteria(&mut self, index: NodeIndex, criteria: AnnotationSet) -> AstResult<()> {
        let info = self.extended_mut(index)?;
        if info.criteria.is_some() {
            return Err(AstError::AnnotationsFrozen(index, "criteria"));
        }
        info.criteria = Some(criteria);
        Ok(())
    }

    /// Attach the annotator's dependencies. Can be done once per node.
    pub fn attach_dependencies(&mut self, index: NodeIndex, dependencies: AnnotationSet) -> AstResult<()> {
        let info = self.extended_mut(index)?;
        if info.dependencies.is_some() {
            return Err(AstError::AnnotationsFrozen(index, "dependencies"));
        }
        info.dependencies = Some(dependencies);
        Ok(())
    }
}
