//! Outline dump of a subtree, one line per node.

use crate::base::NodeIndex;
use crate::node::NodeArena;
use crate::visitor::NodeVisitor;
use std::fmt::Write;

/// Visitor that writes `<Kind> <pos> <len>` per node, indented two spaces
/// per level below the root it started from.
#[derive(Debug, Default)]
pub struct DebugPrinter {
    buffer: String,
    root_depth: Option<usize>,
}

impl DebugPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dump the subtree at `root`.
    pub fn dump(arena: &NodeArena, root: NodeIndex) -> String {
        let mut printer = DebugPrinter::new();
        arena.visit(root, &mut printer);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

impl NodeVisitor for DebugPrinter {
    fn visit(&mut self, arena: &NodeArena, index: NodeIndex) -> bool {
        let Some(node) = arena.get(index) else {
            return false;
        };
        let depth = arena.depth(index);
        let base = *self.root_depth.get_or_insert(depth);
        let level = depth.saturating_sub(base);
        let _ = writeln!(
            self.buffer,
            "{:indent$}{} {} {}",
            "",
            node.kind,
            node.pos,
            node.len,
            indent = level * 2
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;

    #[test]
    fn indents_by_level_below_the_start() {
        let mut arena = NodeArena::new();
        let outer = arena.add_node(NodeKind::ArrayLiteral, 0, 9);
        let inner = arena.add_node(NodeKind::ArrayLiteral, 1, 3);
        let one = arena.add_number_literal(2, "1");
        arena.set_elements(inner, vec![one]).unwrap();
        arena.set_elements(outer, vec![inner]).unwrap();

        assert_eq!(
            DebugPrinter::dump(&arena, inner),
            "ArrayLiteral 1 3\n  NumberLiteral 2 1\n"
        );
        assert_eq!(
            DebugPrinter::dump(&arena, outer),
            "ArrayLiteral 0 9\n  ArrayLiteral 1 3\n    NumberLiteral 2 1\n"
        );
    }
}
