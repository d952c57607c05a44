use super::{Rendered, SourcePrinter, take};
use crate::base::NodeIndex;
use crate::error::{AstError, AstResult};
use crate::kind::NodeKind;
use std::fmt::Write;

impl<'a> SourcePrinter<'a> {
    // =========================================================================
    // Leaves
    // =========================================================================

    pub(super) fn name(&self, index: NodeIndex, depth: usize) -> AstResult<String> {
        let identifier = self.arena.identifier(index).unwrap_or_default();
        Ok(format!("{}{identifier}", self.indent(depth)))
    }

    pub(super) fn number_literal(&self, index: NodeIndex, depth: usize) -> AstResult<String> {
        let value = self
            .arena
            .number_text(index)
            .ok_or(AstError::MissingRequiredChild {
                kind: NodeKind::NumberLiteral,
                slot: "value",
            })?;
        Ok(format!("{}{value}", self.indent(depth)))
    }

    pub(super) fn string_literal(&self, index: NodeIndex, depth: usize) -> AstResult<String> {
        let mut out = self.indent(depth);
        if let Some(lit) = self.arena.get_string_literal_at(index) {
            out.push(lit.quote_char);
            escape_string_into(&mut out, &lit.value, lit.quote_char);
            out.push(lit.quote_char);
        }
        Ok(out)
    }

    pub(super) fn keyword_literal(&self, index: NodeIndex, depth: usize) -> AstResult<String> {
        let keyword = self
            .arena
            .get_keyword_literal_at(index)
            .map(|k| k.keyword.as_str())
            .unwrap_or_default();
        Ok(format!("{}{keyword}", self.indent(depth)))
    }

    // =========================================================================
    // Container literals
    // =========================================================================

    pub(super) fn array_literal(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let items = self.list(done, self.arena.elements(index))?;
        Ok(format!("{}[{items}]", self.indent(depth)))
    }

    pub(super) fn object_literal(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let items = self.list(done, self.arena.elements(index))?;
        Ok(format!("{}{{{items}}}", self.indent(depth)))
    }

    pub(super) fn object_property(
        &self,
        index: NodeIndex,
        depth: usize,
        done: &mut Rendered,
    ) -> AstResult<String> {
        let (left, right) = self
            .arena
            .get_object_property_at(index)
            .map(|p| (p.left, p.right))
            .unwrap_or_default();
        let left = self.required(NodeKind::ObjectProperty, "left", left)?;
        let right = self.required(NodeKind::ObjectProperty, "right", right)?;
        Ok(format!(
            "{}{}: {}",
            self.indent(depth),
            take(done, left)?,
            take(done, right)?
        ))
    }
}

/// Escape `value` for a string literal delimited by `quote`.
pub(crate) fn escape_string_into(out: &mut String, value: &str, quote: char) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\x7F' => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::escape_string_into;

    #[test]
    fn escapes_only_the_active_quote() {
        let mut out = String::new();
        escape_string_into(&mut out, "it's \"x\"", '\'');
        assert_eq!(out, r#"it\'s "x""#);
    }

    #[test]
    fn escapes_control_characters() {
        let mut out = String::new();
        escape_string_into(&mut out, "a\nb\u{1}", '"');
        assert_eq!(out, "a\\nb\\u0001");
    }
}
