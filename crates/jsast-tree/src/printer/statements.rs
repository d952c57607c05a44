use super::{Rendered, SourcePrinter, take};
use crate::base::NodeIndex;
use crate::error::AstResult;
use crate::kind::NodeKind;

impl<'a> SourcePrinter<'a> {
    // =========================================================================
    // Simple statements
    // =========================================================================

    pub(super) fn block(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let pad = self.indent(depth);
        let mut out = format!("{pad}{{{}", self.nl());
        for &statement in self.arena.statements(index) {
            out.push_str(&take(done, statement)?);
        }
        out.push_str(&pad);
        out.push('}');
        out.push_str(self.nl());
        Ok(out)
    }

    pub(super) fn expression_statement(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let expression = self
            .arena
            .get_expr_statement_at(index)
            .map(|e| e.expression)
            .unwrap_or_default();
        let expression = self.required(NodeKind::ExpressionStatement, "expression", expression)?;
        Ok(format!("{};{}", take(done, expression)?, self.nl()))
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(super) fn if_statement(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let (condition, then_part, else_part) = self
            .arena
            .get_if_statement_at(index)
            .map(|d| (d.condition, d.then_part, d.else_part))
            .unwrap_or_default();
        let condition = self.required(NodeKind::IfStatement, "condition", condition)?;
        let then_part = self.required(NodeKind::IfStatement, "then_part", then_part)?;

        let pad = self.indent(depth);
        let then_is_block = self.is_block(then_part);
        let mut out = format!("{pad}if ({}) ", take(done, condition)?);
        if !then_is_block {
            out.push_str(self.nl());
            out.push_str(&self.indent(depth + 1));
        }
        out.push_str(take(done, then_part)?.trim());

        if else_part.is_some() {
            if then_is_block {
                out.push_str(" else ");
            } else {
                out.push_str(self.nl());
                out.push_str(&pad);
                out.push_str("else ");
            }
            // `else if` chains stay on the `else` line.
            let chained = self.arena.kind(else_part) == Some(NodeKind::IfStatement);
            if !self.is_block(else_part) && !chained {
                out.push_str(self.nl());
                out.push_str(&self.indent(depth + 1));
            }
            out.push_str(take(done, else_part)?.trim());
        }
        out.push_str(self.nl());
        Ok(out)
    }

    /// Renders every catch clause, unlike the interchange form.
    pub(super) fn try_statement(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let Some(data) = self.arena.get_try_at(index) else {
            return Ok(String::new());
        };
        let try_block = self.required(NodeKind::TryStatement, "try_block", data.try_block)?;

        let mut out = format!("{}try ", self.indent(depth));
        out.push_str(take(done, try_block)?.trim());
        for &clause in &data.catch_clauses.nodes {
            out.push(' ');
            out.push_str(take(done, clause)?.trim());
        }
        if data.finally_block.is_some() {
            out.push_str(" finally ");
            out.push_str(take(done, data.finally_block)?.trim());
        }
        out.push_str(self.nl());
        Ok(out)
    }

    pub(super) fn catch_clause(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let Some(data) = self.arena.get_catch_clause_at(index) else {
            return Ok(String::new());
        };
        let var_name = self.required(NodeKind::CatchClause, "var_name", data.var_name)?;
        let body = self.required(NodeKind::CatchClause, "body", data.body)?;

        let mut out = format!("{}catch ({}", self.indent(depth), take(done, var_name)?);
        if data.catch_condition.is_some() {
            out.push_str(" if ");
            out.push_str(&take(done, data.catch_condition)?);
        }
        out.push_str(") ");
        out.push_str(take(done, body)?.trim());
        out.push_str(self.nl());
        Ok(out)
    }

    // =========================================================================
    // Loops
    // =========================================================================

    /// Block bodies continue the header line; anything else goes on its own
    /// line one level deeper.
    fn loop_body(
        &self,
        kind: NodeKind,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let body = self.required(kind, "body", self.arena.loop_body(index))?;
        if self.is_block(body) {
            Ok(format!("{}{}", take(done, body)?.trim(), self.nl()))
        } else {
            Ok(format!("{}{}", self.nl(), take(done, body)?))
        }
    }

    pub(super) fn for_in_loop(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let Some(data) = self.arena.get_for_in_loop_at(index) else {
            return Ok(String::new());
        };
        let iterator = self.required(NodeKind::ForInLoop, "iterator", data.iterator)?;
        let object = self.required(NodeKind::ForInLoop, "iterated_object", data.iterated_object)?;

        let mut out = self.indent(depth);
        out.push_str("for ");
        if data.is_for_each {
            out.push_str("each ");
        }
        out.push_str(&format!(
            "({} in {}) ",
            take(done, iterator)?,
            take(done, object)?
        ));
        out.push_str(&self.loop_body(NodeKind::ForInLoop, index, depth, done)?);
        Ok(out)
    }

    pub(super) fn do_loop(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let body = self.required(NodeKind::DoLoop, "body", self.arena.loop_body(index))?;
        let condition = self.required(NodeKind::DoLoop, "condition", self.arena.condition(index))?;
        Ok(format!(
            "{}do {} while ({});{}",
            self.indent(depth),
            take(done, body)?.trim(),
            take(done, condition)?,
            self.nl()
        ))
    }

    pub(super) fn while_loop(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let condition =
            self.required(NodeKind::WhileLoop, "condition", self.arena.condition(index))?;
        let mut out = format!("{}while ({}) ", self.indent(depth), take(done, condition)?);
        out.push_str(&self.loop_body(NodeKind::WhileLoop, index, depth, done)?);
        Ok(out)
    }
}
