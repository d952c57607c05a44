//! ESTree-shaped interchange records.
//!
//! Every record carries its ESTree `type`, the construct's fields, and a
//! trailer with the annotator's data:
//!
//! ```json
//! { "type": "...", ..., "criteria": [], "dependencies": [],
//!   "change": "UNKNOWN", "change-noprop": "UNKNOWN" }
//! ```
//!
//! Two constructs are emitted lossily and downstream readers depend on it:
//! a try statement reports only its first catch clause as `handler`, and a
//! for-in loop always reports `each: false`.

use crate::base::NodeIndex;
use crate::error::{AstError, AstResult};
use crate::kind::{Keyword, NodeKind};
use crate::node::NodeArena;
use crate::node_access::ChildList;
use crate::printer::escape_string_into;
use jsast_common::limits::MAX_TREE_DEPTH;
use rustc_hash::FxHashMap;
use serde_json::{Map, Number, Value};
use tracing::debug;

type Record = Map<String, Value>;

/// Finished records not yet placed in their parent.
type Done = FxHashMap<NodeIndex, Value>;

/// Emits ESTree records for subtrees of one arena.
pub struct EstreeWriter<'a> {
    arena: &'a NodeArena,
}

impl<'a> EstreeWriter<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        EstreeWriter { arena }
    }

    /// Emit the record for the subtree at `index`.
    ///
    /// Records are built bottom-up from an explicit stack; a finished child
    /// record waits in `done` until its parent takes it.
    pub fn emit(&self, index: NodeIndex) -> AstResult<Value> {
        if self.arena.subtree_height(index) > MAX_TREE_DEPTH {
            return Err(AstError::DepthLimitExceeded(MAX_TREE_DEPTH));
        }
        let mut done = Done::default();
        let mut stack = vec![(index, false)];
        while let Some((current, ready)) = stack.pop() {
            if ready {
                let record = self.node(current, &mut done)?;
                done.insert(current, record);
                continue;
            }
            stack.push((current, true));
            let children = self.embedded_children(current)?;
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }
        let value = take(&mut done, index)?;
        debug!(index = index.0, "emit interchange record");
        Ok(value)
    }

    /// Children whose records appear inside this node's record.
    fn embedded_children(&self, index: NodeIndex) -> AstResult<ChildList> {
        let node = self.arena.try_get(index)?;
        if node.kind != NodeKind::TryStatement {
            return Ok(self.arena.get_children(index));
        }
        let mut children = ChildList::new();
        if let Some(data) = self.arena.get_try(node) {
            let handler = data.catch_clauses.nodes.first().copied().unwrap_or_default();
            for child in [data.try_block, handler, data.finally_block] {
                if child.is_some() {
                    children.push(child);
                }
            }
        }
        Ok(children)
    }

    fn node(&self, index: NodeIndex, done: &mut Done) -> AstResult<Value> {
        let node = *self.arena.try_get(index)?;
        let mut record = Record::new();
        record.insert("type".into(), Value::from(node.kind.estree_type()));

        match node.kind {
            NodeKind::Name => {
                let name = self.arena.identifier(index).unwrap_or_default();
                record.insert("name".into(), Value::from(name));
            }
            NodeKind::NumberLiteral => {
                let raw = self.arena.number_text(index).ok_or(AstError::MissingRequiredChild {
                    kind: NodeKind::NumberLiteral,
                    slot: "value",
                })?;
                record.insert("value".into(), number_value(raw));
                record.insert("raw".into(), Value::from(raw));
            }
            NodeKind::StringLiteral => {
                if let Some(lit) = self.arena.get_string_literal(&node) {
                    let mut raw = String::with_capacity(lit.value.len() + 2);
                    raw.push(lit.quote_char);
                    escape_string_into(&mut raw, &lit.value, lit.quote_char);
                    raw.push(lit.quote_char);
                    record.insert("value".into(), Value::from(lit.value.as_str()));
                    record.insert("raw".into(), Value::from(raw));
                }
            }
            NodeKind::KeywordLiteral => {
                let keyword = self
                    .arena
                    .get_keyword_literal(&node)
                    .map(|k| k.keyword)
                    .unwrap_or_default();
                if keyword == Keyword::This {
                    record.insert("type".into(), Value::from("ThisExpression"));
                } else {
                    let value = match keyword {
                        Keyword::True => Value::Bool(true),
                        Keyword::False => Value::Bool(false),
                        _ => Value::Null,
                    };
                    record.insert("value".into(), value);
                    record.insert("raw".into(), Value::from(keyword.as_str()));
                }
            }
            NodeKind::EmptyExpression | NodeKind::EmptyStatement => {}
            NodeKind::ArrayLiteral => {
                record.insert("elements".into(), self.list(done, self.arena.elements(index))?);
            }
            NodeKind::ObjectLiteral => {
                record.insert("properties".into(), self.list(done, self.arena.elements(index))?);
            }
            NodeKind::ObjectProperty => {
                let (left, right) = self
                    .arena
                    .get_object_property(&node)
                    .map(|p| (p.left, p.right))
                    .unwrap_or_default();
                record.insert("key".into(), self.required(done, node.kind, "left", left)?);
                record.insert("value".into(), self.required(done, node.kind, "right", right)?);
                record.insert("kind".into(), Value::from("init"));
            }
            NodeKind::Block => {
                record.insert("body".into(), self.list(done, self.arena.statements(index))?);
            }
            NodeKind::ExpressionStatement => {
                let expression = self
                    .arena
                    .get_expr_statement(&node)
                    .map(|e| e.expression)
                    .unwrap_or_default();
                record.insert(
                    "expression".into(),
                    self.required(done, node.kind, "expression", expression)?,
                );
            }
            NodeKind::IfStatement => {
                let (condition, then_part, else_part) = self
                    .arena
                    .get_if_statement(&node)
                    .map(|d| (d.condition, d.then_part, d.else_part))
                    .unwrap_or_default();
                record.insert("test".into(), self.required(done, node.kind, "condition", condition)?);
                record.insert(
                    "consequent".into(),
                    self.required(done, node.kind, "then_part", then_part)?,
                );
                record.insert("alternate".into(), self.optional(done, else_part)?);
            }
            NodeKind::TryStatement => {
                let (try_block, finally_block) = self
                    .arena
                    .get_try(&node)
                    .map(|d| (d.try_block, d.finally_block))
                    .unwrap_or_default();
                let clauses = self.arena.catch_clauses(index);
                // Only the first clause is reported.
                let handler = clauses.first().copied().ok_or(AstError::IndexOutOfBounds {
                    kind: NodeKind::TryStatement,
                    slot: "catch_clauses",
                    index: 0,
                    len: 0,
                })?;
                record.insert("block".into(), self.required(done, node.kind, "try_block", try_block)?);
                record.insert("handler".into(), take(done, handler)?);
                record.insert("finalizer".into(), self.optional(done, finally_block)?);
            }
            NodeKind::CatchClause => {
                let (var_name, condition, body) = self
                    .arena
                    .get_catch_clause(&node)
                    .map(|d| (d.var_name, d.catch_condition, d.body))
                    .unwrap_or_default();
                record.insert("param".into(), self.required(done, node.kind, "var_name", var_name)?);
                record.insert("guard".into(), self.optional(done, condition)?);
                record.insert("body".into(), self.required(done, node.kind, "body", body)?);
            }
            NodeKind::ForInLoop => {
                let (iterator, object) = self
                    .arena
                    .get_for_in_loop(&node)
                    .map(|d| (d.iterator, d.iterated_object))
                    .unwrap_or_default();
                record.insert("left".into(), self.required(done, node.kind, "iterator", iterator)?);
                record.insert(
                    "right".into(),
                    self.required(done, node.kind, "iterated_object", object)?,
                );
                record.insert(
                    "body".into(),
                    self.required(done, node.kind, "body", self.arena.loop_body(index))?,
                );
                // `for each` loops are reported as plain for-in.
                record.insert("each".into(), Value::Bool(false));
            }
            NodeKind::DoLoop | NodeKind::WhileLoop => {
                record.insert(
                    "test".into(),
                    self.required(done, node.kind, "condition", self.arena.condition(index))?,
                );
                record.insert(
                    "body".into(),
                    self.required(done, node.kind, "body", self.arena.loop_body(index))?,
                );
            }
        }

        self.trailer(index, &mut record);
        Ok(Value::Object(record))
    }

    /// Annotator fields present on every record.
    fn trailer(&self, index: NodeIndex, record: &mut Record) {
        let criteria = self.arena.criteria(index).map(|c| c.to_json());
        let dependencies = self.arena.dependencies(index).map(|d| d.to_json());
        let change = self.arena.change_kind(index).unwrap_or_default();
        let change_no_propagate = self.arena.change_kind_no_propagate(index).unwrap_or_default();

        record.insert(
            "criteria".into(),
            criteria.unwrap_or_else(|| Value::Array(Vec::new())),
        );
        record.insert(
            "dependencies".into(),
            dependencies.unwrap_or_else(|| Value::Array(Vec::new())),
        );
        record.insert("change".into(), Value::from(change.as_str()));
        record.insert("change-noprop".into(), Value::from(change_no_propagate.as_str()));
    }

    fn required(
        &self,
        done: &mut Done,
        kind: NodeKind,
        slot: &'static str,
        child: NodeIndex,
    ) -> AstResult<Value> {
        if child.is_none() {
            return Err(AstError::MissingRequiredChild { kind, slot });
        }
        take(done, child)
    }

    /// Absent optional slots are an explicit `null`, never a missing field.
    fn optional(&self, done: &mut Done, child: NodeIndex) -> AstResult<Value> {
        if child.is_none() {
            Ok(Value::Null)
        } else {
            take(done, child)
        }
    }

    fn list(&self, done: &mut Done, items: &[NodeIndex]) -> AstResult<Value> {
        items
            .iter()
            .map(|&item| take(done, item))
            .collect::<AstResult<Vec<_>>>()
            .map(Value::Array)
    }
}

fn take(done: &mut Done, index: NodeIndex) -> AstResult<Value> {
    done.remove(&index).ok_or(AstError::UnknownNode(index))
}

/// Decode a numeric token: 32-bit integer, then float, then `null`.
/// Failures of the earlier tiers are dropped; non-finite floats have no JSON
/// form and also become `null`.
pub fn number_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i32>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.trim().parse::<f64>() {
        return Number::from_f64(float).map_or(Value::Null, Value::Number);
    }
    Value::Null
}

impl NodeArena {
    /// ESTree record for the subtree at `index`.
    pub fn to_interchange(&self, index: NodeIndex) -> AstResult<Value> {
        EstreeWriter::new(self).emit(index)
    }
}

#[cfg(test)]
mod tests {
    use super::number_value;
    use serde_json::json;

    #[test]
    fn integer_tier_wins_over_float() {
        assert_eq!(number_value("42"), json!(42));
        assert!(number_value("42").is_i64());
        assert_eq!(number_value("-7"), json!(-7));
    }

    #[test]
    fn out_of_range_integers_fall_to_float() {
        let value = number_value("4294967296");
        assert!(value.is_f64());
        assert_eq!(value.as_f64(), Some(4_294_967_296.0));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn float_and_exponent_forms() {
        assert_eq!(number_value("3.14"), json!(3.14));
        assert_eq!(number_value("1e3"), json!(1000.0));
    }

    #[test]
    fn unparseable_and_non_finite_are_null() {
        assert!(number_value("NaNtext").is_null());
        assert!(number_value("0x1F").is_null());
        assert!(number_value("1e400").is_null());
        assert!(number_value("NaN").is_null());
    }
}
