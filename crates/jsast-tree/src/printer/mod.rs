//! Source text rendering ("unparse").
//!
//! Each node renders to a string at a given indentation depth. Compound
//! statements splice their children's renderings, trimming them where a
//! child is placed inline after a keyword (`try {...}`, `do {...}`), so a
//! child renders the same way whether or not it is nested.

mod expressions;
mod options;
mod statements;

pub use options::PrinterOptions;
pub(crate) use expressions::escape_string_into;

use crate::base::NodeIndex;
use crate::error::{AstError, AstResult};
use crate::kind::NodeKind;
use crate::node::NodeArena;
use jsast_common::limits::MAX_TREE_DEPTH;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Renders subtrees of one arena back to source text.
pub struct SourcePrinter<'a> {
    arena: &'a NodeArena,
    options: PrinterOptions,
}

impl<'a> SourcePrinter<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        SourcePrinter {
            arena,
            options: PrinterOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PrinterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    /// Render the subtree at `index` with `depth` levels of indentation.
    ///
    /// Children are rendered before their parents from an explicit stack;
    /// each finished text waits in `done` until its parent splices it in.
    pub fn print(&self, index: NodeIndex, depth: usize) -> AstResult<String> {
        let height = self.arena.subtree_height(index);
        if height > MAX_TREE_DEPTH {
            return Err(AstError::DepthLimitExceeded(MAX_TREE_DEPTH));
        }
        let mut done = Rendered::default();
        let mut stack = vec![(index, depth, false)];
        while let Some((current, level, ready)) = stack.pop() {
            if ready {
                let text = self.node(current, level, &mut done)?;
                done.insert(current, text);
                continue;
            }
            stack.push((current, level, true));
            let kind = self.arena.try_get(current)?.kind;
            let children = self.arena.get_children(current);
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (child, self.child_depth(kind, current, child, level), false)),
            );
        }
        let text = take(&mut done, index)?;
        debug!(index = index.0, depth, bytes = text.len(), "print subtree");
        Ok(text)
    }

    /// Indentation depth a child renders at inside its parent.
    fn child_depth(&self, kind: NodeKind, parent: NodeIndex, child: NodeIndex, depth: usize) -> usize {
        match kind {
            NodeKind::Block => depth + 1,
            NodeKind::ExpressionStatement | NodeKind::TryStatement => depth,
            // Then and else branches.
            NodeKind::IfStatement if child != self.arena.condition(parent) => depth,
            NodeKind::CatchClause
                if self.arena.get_catch_clause_at(parent).map(|d| d.body) == Some(child) =>
            {
                depth
            }
            NodeKind::DoLoop if child == self.arena.loop_body(parent) => depth,
            // Non-block bodies go on their own line one level deeper.
            NodeKind::ForInLoop | NodeKind::WhileLoop if child == self.arena.loop_body(parent) => {
                if self.is_block(child) { depth } else { depth + 1 }
            }
            _ => 0,
        }
    }

    /// Dispatch on the node's kind.
    fn node(&self, index: NodeIndex, depth: usize, done: &mut Rendered) -> AstResult<String> {
        let kind = self.arena.try_get(index)?.kind;
        match kind {
            NodeKind::Name => self.name(index, depth),
            NodeKind::NumberLiteral => self.number_literal(index, depth),
            NodeKind::StringLiteral => self.string_literal(index, depth),
            NodeKind::KeywordLiteral => self.keyword_literal(index, depth),
            NodeKind::EmptyExpression => Ok(self.indent(depth)),
            NodeKind::ArrayLiteral => self.array_literal(index, depth, done),
            NodeKind::ObjectLiteral => self.object_literal(index, depth, done),
            NodeKind::ObjectProperty => self.object_property(index, depth, done),
            NodeKind::Block => self.block(index, depth, done),
            NodeKind::ExpressionStatement => self.expression_statement(index, depth, done),
            NodeKind::EmptyStatement => Ok(format!("{};{}", self.indent(depth), self.nl())),
            NodeKind::IfStatement => self.if_statement(index, depth, done),
            NodeKind::TryStatement => self.try_statement(index, depth, done),
            NodeKind::CatchClause => self.catch_clause(index, depth, done),
            NodeKind::ForInLoop => self.for_in_loop(index, depth, done),
            NodeKind::DoLoop => self.do_loop(index, depth, done),
            NodeKind::WhileLoop => self.while_loop(index, depth, done),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn indent(&self, depth: usize) -> String {
        self.options.indent_unit.repeat(depth)
    }

    fn nl(&self) -> &'static str {
        self.options.newline.as_str()
    }

    /// A required slot, failing with `MissingRequiredChild` when absent.
    fn required(
        &self,
        kind: NodeKind,
        slot: &'static str,
        child: NodeIndex,
    ) -> AstResult<NodeIndex> {
        if child.is_none() {
            Err(AstError::MissingRequiredChild { kind, slot })
        } else {
            Ok(child)
        }
    }

    fn is_block(&self, index: NodeIndex) -> bool {
        self.arena.kind(index) == Some(NodeKind::Block)
    }

    /// Comma-separated list at depth 0. A trailing elision needs one more
    /// comma to survive re-parsing (`[1, ]` has length 1, `[1, , ]` length 2).
    fn list(&self, done: &mut Rendered, items: &[NodeIndex]) -> AstResult<String> {
        let mut out = String::new();
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&take(done, item)?);
        }
        if items
            .last()
            .is_some_and(|&last| self.arena.kind(last) == Some(NodeKind::EmptyExpression))
        {
            out.push(',');
        }
        Ok(out)
    }
}

/// Rendered children not yet spliced into their parent.
type Rendered = FxHashMap<NodeIndex, String>;

fn take(done: &mut Rendered, index: NodeIndex) -> AstResult<String> {
    done.remove(&index).ok_or(AstError::UnknownNode(index))
}

impl NodeArena {
    /// Render the subtree at `index` with default options and no indentation.
    pub fn to_source(&self, index: NodeIndex) -> AstResult<String> {
        SourcePrinter::new(self).print(index, 0)
    }
}
