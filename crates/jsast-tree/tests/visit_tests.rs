//! Tests for pre-order traversal.

mod common;

use common::*;
use jsast_tree::{DebugPrinter, NodeArena, NodeIndex, NodeKind, NodeVisitor};

#[test]
fn try_visits_block_then_catches_then_finally() {
    let mut arena = NodeArena::new();
    let try_stmt = try_with_two_catches(&mut arena);
    let finally = block_of(&mut arena, "z");
    arena.set_finally_block(try_stmt, finally).unwrap();

    let order = arena.collect_preorder(try_stmt);
    let data = arena.get_try_at(try_stmt).unwrap();
    let clauses = arena.catch_clauses(try_stmt);

    let top_level: Vec<_> = order
        .iter()
        .copied()
        .filter(|&idx| arena.parent(idx) == try_stmt)
        .collect();
    assert_eq!(top_level, vec![data.try_block, clauses[0], clauses[1], finally]);
    assert_eq!(order[0], try_stmt);
}

#[test]
fn loops_visit_in_structural_order() {
    let mut arena = NodeArena::new();
    let do_loop = arena.add_node(NodeKind::DoLoop, 0, 0);
    let body = block_of(&mut arena, "b");
    let cond = name(&mut arena, "c");
    arena.set_condition(do_loop, cond).unwrap();
    arena.set_body(do_loop, body).unwrap();

    // Body before condition regardless of the order the slots were set in.
    assert_eq!(
        visit_kinds(&arena, do_loop),
        vec![
            NodeKind::DoLoop,
            NodeKind::Block,
            NodeKind::ExpressionStatement,
            NodeKind::Name,
            NodeKind::Name,
        ]
    );

    let for_in = arena.add_node(NodeKind::ForInLoop, 0, 0);
    let it = name(&mut arena, "k");
    let obj = name(&mut arena, "o");
    let stmt = arena.add_node(NodeKind::EmptyStatement, 0, 1);
    arena.set_body(for_in, stmt).unwrap();
    arena.set_iterated_object(for_in, obj).unwrap();
    arena.set_iterator(for_in, it).unwrap();
    assert_eq!(arena.collect_preorder(for_in), vec![for_in, it, obj, stmt]);
}

#[test]
fn if_without_else_visits_two_children() {
    let mut arena = NodeArena::new();
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
    let cond = name(&mut arena, "c");
    let then = arena.add_node(NodeKind::EmptyStatement, 0, 1);
    arena.set_condition(if_stmt, cond).unwrap();
    arena.set_then_part(if_stmt, then).unwrap();

    assert_eq!(arena.collect_preorder(if_stmt), vec![if_stmt, cond, then]);
}

#[test]
fn elisions_are_visited_as_nodes() {
    let mut arena = NodeArena::new();
    let array = array_with_hole(&mut arena);
    assert_eq!(
        visit_kinds(&arena, array),
        vec![
            NodeKind::ArrayLiteral,
            NodeKind::Name,
            NodeKind::EmptyExpression,
            NodeKind::NumberLiteral,
        ]
    );
}

#[test]
fn declining_a_node_skips_its_whole_subtree() {
    let mut arena = NodeArena::new();
    let root = sample_program(&mut arena);

    let mut names = Vec::new();
    arena.visit(root, &mut |arena: &NodeArena, idx: NodeIndex| {
        match arena.kind(idx) {
            Some(NodeKind::TryStatement | NodeKind::ForInLoop) => false,
            Some(NodeKind::Name) => {
                names.push(arena.identifier(idx).unwrap_or_default().to_string());
                true
            }
            _ => true,
        }
    });
    assert_eq!(names, ["c", "a", "x", "d", "n", "a", "x"]);
}

struct KindCounter {
    statements: usize,
    expressions: usize,
}

impl NodeVisitor for KindCounter {
    fn visit(&mut self, arena: &NodeArena, index: NodeIndex) -> bool {
        if arena.is_statement(index) {
            self.statements += 1;
        } else {
            self.expressions += 1;
        }
        true
    }
}

#[test]
fn struct_visitors_see_every_node() {
    let mut arena = NodeArena::new();
    let root = sample_program(&mut arena);
    let mut counter = KindCounter {
        statements: 0,
        expressions: 0,
    };
    arena.visit(root, &mut counter);

    assert_eq!(
        counter.statements + counter.expressions,
        arena.collect_preorder(root).len()
    );
    assert!(counter.statements > 0 && counter.expressions > 0);
}

#[test]
fn trait_object_visitors_work() {
    let mut arena = NodeArena::new();
    let array = array_with_hole(&mut arena);
    let mut counter = KindCounter {
        statements: 0,
        expressions: 0,
    };
    let dyn_visitor: &mut dyn NodeVisitor = &mut counter;
    arena.visit(array, dyn_visitor);
    assert_eq!(counter.expressions, 4);
}

#[test]
fn debug_printer_outlines_the_tree() {
    let mut arena = NodeArena::new();
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 12);
    let cond = arena.add_name(4, "c");
    let then = arena.add_node(NodeKind::EmptyStatement, 11, 1);
    arena.set_condition(if_stmt, cond).unwrap();
    arena.set_then_part(if_stmt, then).unwrap();

    assert_eq!(
        DebugPrinter::dump(&arena, if_stmt),
        "IfStatement 0 12\n  Name 4 1\n  EmptyStatement 11 1\n"
    );
}
