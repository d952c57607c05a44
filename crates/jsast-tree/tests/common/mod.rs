//! Tree builders shared by the integration tests.
#![allow(dead_code)]

use jsast_tree::{Keyword, NodeArena, NodeIndex, NodeKind};

pub fn name(arena: &mut NodeArena, text: &str) -> NodeIndex {
    arena.add_name(0, text)
}

/// `expr;`
pub fn expr_stmt(arena: &mut NodeArena, expr: NodeIndex) -> NodeIndex {
    let stmt = arena.add_node(NodeKind::ExpressionStatement, 0, 0);
    arena.set_expression(stmt, expr).unwrap();
    stmt
}

/// `{ statements }`
pub fn block(arena: &mut NodeArena, statements: Vec<NodeIndex>) -> NodeIndex {
    let block = arena.add_node(NodeKind::Block, 0, 0);
    arena.set_statements(block, statements).unwrap();
    block
}

/// `{ ident; }`
pub fn block_of(arena: &mut NodeArena, ident: &str) -> NodeIndex {
    let n = name(arena, ident);
    let stmt = expr_stmt(arena, n);
    block(arena, vec![stmt])
}

/// `catch (var) { body; }`
pub fn catch_clause(arena: &mut NodeArena, var: &str, body: &str) -> NodeIndex {
    let clause = arena.add_node(NodeKind::CatchClause, 0, 0);
    let v = name(arena, var);
    let b = block_of(arena, body);
    arena.set_catch_var_name(clause, v).unwrap();
    arena.set_catch_body(clause, b).unwrap();
    clause
}

/// `try { a; } catch (e) { b; } catch (f) { c; }`
pub fn try_with_two_catches(arena: &mut NodeArena) -> NodeIndex {
    let try_stmt = arena.add_node(NodeKind::TryStatement, 0, 0);
    let body = block_of(arena, "a");
    let first = catch_clause(arena, "e", "b");
    let second = catch_clause(arena, "f", "c");
    arena.set_try_block(try_stmt, body).unwrap();
    arena.set_catch_clauses(try_stmt, vec![first, second]).unwrap();
    try_stmt
}

/// `[a, , 1]`
pub fn array_with_hole(arena: &mut NodeArena) -> NodeIndex {
    let array = arena.add_node(NodeKind::ArrayLiteral, 0, 8);
    let a = name(arena, "a");
    let hole = arena.add_empty_expression(3);
    let one = arena.add_number_literal(6, "1");
    arena.set_elements(array, vec![a, hole, one]).unwrap();
    array
}

/// `{x: true}`
pub fn object_literal(arena: &mut NodeArena) -> NodeIndex {
    let object = arena.add_node(NodeKind::ObjectLiteral, 0, 9);
    let prop = arena.add_node(NodeKind::ObjectProperty, 1, 7);
    let key = name(arena, "x");
    let value = arena.add_keyword_literal(4, Keyword::True);
    arena.set_property_left(prop, key).unwrap();
    arena.set_property_right(prop, value).unwrap();
    arena.add_element(object, prop).unwrap();
    object
}

/// A block exercising every compound kind:
///
/// ```js
/// {
///     if (c) { a; } else x;
///     try { a; } catch (e) { b; } catch (f) { c; }
///     for each (k in obj) { k; }
///     do { d; } while (n);
///     [a, , 1];
///     {x: true};
/// }
/// ```
pub fn sample_program(arena: &mut NodeArena) -> NodeIndex {
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
    let cond = name(arena, "c");
    let then_part = block_of(arena, "a");
    let x = name(arena, "x");
    let else_part = expr_stmt(arena, x);
    arena.set_condition(if_stmt, cond).unwrap();
    arena.set_then_part(if_stmt, then_part).unwrap();
    arena.set_else_part(if_stmt, else_part).unwrap();

    let try_stmt = try_with_two_catches(arena);

    let for_in = arena.add_node(NodeKind::ForInLoop, 0, 0);
    let k = name(arena, "k");
    let obj = name(arena, "obj");
    let body = block_of(arena, "k");
    arena.set_iterator(for_in, k).unwrap();
    arena.set_iterated_object(for_in, obj).unwrap();
    arena.set_body(for_in, body).unwrap();
    arena.set_is_for_each(for_in, true).unwrap();

    let do_loop = arena.add_node(NodeKind::DoLoop, 0, 0);
    let do_body = block_of(arena, "d");
    let n = name(arena, "n");
    arena.set_body(do_loop, do_body).unwrap();
    arena.set_condition(do_loop, n).unwrap();

    let array = array_with_hole(arena);
    let array_stmt = expr_stmt(arena, array);
    let object = object_literal(arena);
    let object_stmt = expr_stmt(arena, object);

    block(
        arena,
        vec![if_stmt, try_stmt, for_in, do_loop, array_stmt, object_stmt],
    )
}

/// Kinds in visit order.
pub fn visit_kinds(arena: &NodeArena, root: NodeIndex) -> Vec<NodeKind> {
    let mut kinds = Vec::new();
    arena.visit(root, &mut |arena: &NodeArena, idx: NodeIndex| {
        kinds.extend(arena.kind(idx));
        true
    });
    kinds
}
