//! Tests for source text rendering.

mod common;

use common::*;
use jsast_tree::{
    AstError, Keyword, NewLineKind, NodeArena, NodeIndex, NodeKind, PrinterOptions, SourcePrinter,
};

#[test]
fn array_with_elision() {
    let mut arena = NodeArena::new();
    let array = arena.add_node(NodeKind::ArrayLiteral, 0, 8);
    let a = name(&mut arena, "A");
    let hole = arena.add_empty_expression(3);
    let b = name(&mut arena, "B");
    arena.set_elements(array, vec![a, hole, b]).unwrap();

    assert_eq!(arena.to_source(array).unwrap(), "[A, , B]");
}

#[test]
fn trailing_elision_keeps_its_comma() {
    let mut arena = NodeArena::new();
    let array = arena.add_node(NodeKind::ArrayLiteral, 0, 5);
    let a = name(&mut arena, "a");
    let hole = arena.add_empty_expression(3);
    arena.set_elements(array, vec![a, hole]).unwrap();

    assert_eq!(arena.to_source(array).unwrap(), "[a, ,]");
}

#[test]
fn empty_array_and_object() {
    let mut arena = NodeArena::new();
    let array = arena.add_node(NodeKind::ArrayLiteral, 0, 2);
    let object = arena.add_node(NodeKind::ObjectLiteral, 0, 2);
    assert_eq!(arena.to_source(array).unwrap(), "[]");
    assert_eq!(arena.to_source(object).unwrap(), "{}");
}

#[test]
fn object_literal_properties() {
    let mut arena = NodeArena::new();
    let object = object_literal(&mut arena);
    assert_eq!(arena.to_source(object).unwrap(), "{x: true}");
}

#[test]
fn expressions_are_indented_by_depth() {
    let mut arena = NodeArena::new();
    let array = array_with_hole(&mut arena);
    let printer = SourcePrinter::new(&arena);
    assert_eq!(printer.print(array, 2).unwrap(), "        [a, , 1]");
}

#[test]
fn string_literals_escape_their_quote() {
    let mut arena = NodeArena::new();
    let single = arena.add_string_literal(0, 7, "it's", '\'');
    let double = arena.add_string_literal(0, 6, "a\"b", '"');
    assert_eq!(arena.to_source(single).unwrap(), r"'it\'s'");
    assert_eq!(arena.to_source(double).unwrap(), r#""a\"b""#);
}

#[test]
fn keywords_and_empty_statement() {
    let mut arena = NodeArena::new();
    let this = arena.add_keyword_literal(0, Keyword::This);
    let empty = arena.add_node(NodeKind::EmptyStatement, 0, 1);
    assert_eq!(arena.to_source(this).unwrap(), "this");
    assert_eq!(arena.to_source(empty).unwrap(), ";\n");
}

#[test]
fn if_with_block_and_no_else() {
    let mut arena = NodeArena::new();
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
    let cond = name(&mut arena, "c");
    let then = block_of(&mut arena, "a");
    arena.set_condition(if_stmt, cond).unwrap();
    arena.set_then_part(if_stmt, then).unwrap();

    assert_eq!(arena.to_source(if_stmt).unwrap(), "if (c) {\n    a;\n}\n");
}

#[test]
fn if_with_statement_branches_puts_them_on_their_own_lines() {
    let mut arena = NodeArena::new();
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
    let cond = name(&mut arena, "c");
    let x = name(&mut arena, "x");
    let then = expr_stmt(&mut arena, x);
    let y = name(&mut arena, "y");
    let otherwise = expr_stmt(&mut arena, y);
    arena.set_condition(if_stmt, cond).unwrap();
    arena.set_then_part(if_stmt, then).unwrap();
    arena.set_else_part(if_stmt, otherwise).unwrap();

    assert_eq!(
        arena.to_source(if_stmt).unwrap(),
        "if (c) \n    x;\nelse \n    y;\n"
    );
}

#[test]
fn else_if_chains_stay_inline() {
    let mut arena = NodeArena::new();
    let inner = arena.add_node(NodeKind::IfStatement, 0, 0);
    let c = name(&mut arena, "c");
    let d = block_of(&mut arena, "d");
    arena.set_condition(inner, c).unwrap();
    arena.set_then_part(inner, d).unwrap();

    let outer = arena.add_node(NodeKind::IfStatement, 0, 0);
    let a = name(&mut arena, "a");
    let b = block_of(&mut arena, "b");
    arena.set_condition(outer, a).unwrap();
    arena.set_then_part(outer, b).unwrap();
    arena.set_else_part(outer, inner).unwrap();

    assert_eq!(
        arena.to_source(outer).unwrap(),
        "if (a) {\n    b;\n} else if (c) {\n    d;\n}\n"
    );
}

#[test]
fn try_renders_every_catch_clause() {
    let mut arena = NodeArena::new();
    let try_stmt = try_with_two_catches(&mut arena);
    assert_eq!(
        arena.to_source(try_stmt).unwrap(),
        "try {\n    a;\n} catch (e) {\n    b;\n} catch (f) {\n    c;\n}\n"
    );
}

#[test]
fn try_with_finally() {
    let mut arena = NodeArena::new();
    let try_stmt = arena.add_node(NodeKind::TryStatement, 0, 0);
    let body = block_of(&mut arena, "a");
    let finally = block_of(&mut arena, "z");
    arena.set_try_block(try_stmt, body).unwrap();
    arena.set_finally_block(try_stmt, finally).unwrap();
    arena.set_finally_position(try_stmt, 14).unwrap();

    assert_eq!(
        arena.to_source(try_stmt).unwrap(),
        "try {\n    a;\n} finally {\n    z;\n}\n"
    );
}

#[test]
fn catch_guard() {
    let mut arena = NodeArena::new();
    let clause = catch_clause(&mut arena, "e", "b");
    let guard = name(&mut arena, "cond");
    arena.set_catch_condition(clause, guard).unwrap();
    assert_eq!(
        arena.to_source(clause).unwrap(),
        "catch (e if cond) {\n    b;\n}\n"
    );
}

#[test]
fn for_each_and_plain_for_in() {
    let mut arena = NodeArena::new();
    let for_in = arena.add_node(NodeKind::ForInLoop, 0, 0);
    let k = name(&mut arena, "k");
    let obj = name(&mut arena, "obj");
    let body = block_of(&mut arena, "k");
    arena.set_iterator(for_in, k).unwrap();
    arena.set_iterated_object(for_in, obj).unwrap();
    arena.set_body(for_in, body).unwrap();
    assert_eq!(
        arena.to_source(for_in).unwrap(),
        "for (k in obj) {\n    k;\n}\n"
    );

    arena.set_is_for_each(for_in, true).unwrap();
    assert_eq!(
        arena.to_source(for_in).unwrap(),
        "for each (k in obj) {\n    k;\n}\n"
    );
}

#[test]
fn loop_statement_body_goes_on_the_next_line() {
    let mut arena = NodeArena::new();
    let for_in = arena.add_node(NodeKind::ForInLoop, 0, 0);
    let k = name(&mut arena, "k");
    let obj = name(&mut arena, "obj");
    let k2 = name(&mut arena, "k");
    let body = expr_stmt(&mut arena, k2);
    arena.set_iterator(for_in, k).unwrap();
    arena.set_iterated_object(for_in, obj).unwrap();
    arena.set_body(for_in, body).unwrap();

    assert_eq!(arena.to_source(for_in).unwrap(), "for (k in obj) \n    k;\n");
}

#[test]
fn do_and_while_loops() {
    let mut arena = NodeArena::new();
    let do_loop = arena.add_node(NodeKind::DoLoop, 0, 0);
    let body = block_of(&mut arena, "d");
    let n = name(&mut arena, "n");
    arena.set_body(do_loop, body).unwrap();
    arena.set_condition(do_loop, n).unwrap();
    arena.set_while_position(do_loop, 10).unwrap();
    assert_eq!(
        arena.to_source(do_loop).unwrap(),
        "do {\n    d;\n} while (n);\n"
    );

    let while_loop = arena.add_node(NodeKind::WhileLoop, 0, 0);
    let body = block_of(&mut arena, "d");
    let n = name(&mut arena, "n");
    arena.set_condition(while_loop, n).unwrap();
    arena.set_body(while_loop, body).unwrap();
    assert_eq!(
        arena.to_source(while_loop).unwrap(),
        "while (n) {\n    d;\n}\n"
    );
}

#[test]
fn nested_statements_indent_one_level_per_block() {
    let mut arena = NodeArena::new();
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
    let cond = name(&mut arena, "c");
    let then = block_of(&mut arena, "a");
    arena.set_condition(if_stmt, cond).unwrap();
    arena.set_then_part(if_stmt, then).unwrap();
    let outer = block(&mut arena, vec![if_stmt]);

    assert_eq!(
        arena.to_source(outer).unwrap(),
        "{\n    if (c) {\n        a;\n    }\n}\n"
    );
}

#[test]
fn options_change_indent_and_newline() {
    let mut arena = NodeArena::new();
    let block = block_of(&mut arena, "a");
    let options = PrinterOptions::default()
        .with_indent_unit("  ")
        .with_newline(NewLineKind::CarriageReturnLineFeed);
    let printer = SourcePrinter::new(&arena).with_options(options);
    assert_eq!(printer.print(block, 0).unwrap(), "{\r\n  a;\r\n}\r\n");

    let options = PrinterOptions::from_json(r#"{"indentUnit": "\t"}"#).unwrap();
    let printer = SourcePrinter::new(&arena).with_options(options);
    assert_eq!(printer.print(block, 1).unwrap(), "\t{\n\t\ta;\n\t}\n");
}

#[test]
fn missing_required_children_are_reported() {
    let mut arena = NodeArena::new();
    let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
    let cond = name(&mut arena, "c");
    arena.set_condition(if_stmt, cond).unwrap();
    assert_eq!(
        arena.to_source(if_stmt),
        Err(AstError::MissingRequiredChild {
            kind: NodeKind::IfStatement,
            slot: "then_part",
        })
    );

    let number = arena.add_node(NodeKind::NumberLiteral, 0, 0);
    assert!(matches!(
        arena.to_source(number),
        Err(AstError::MissingRequiredChild { slot: "value", .. })
    ));

    let do_loop = arena.add_node(NodeKind::DoLoop, 0, 0);
    assert!(arena.to_source(do_loop).is_err());
    assert_eq!(
        arena.to_source(NodeIndex::NONE),
        Err(AstError::UnknownNode(NodeIndex::NONE))
    );
}

#[test]
fn whole_program_renders() {
    let mut arena = NodeArena::new();
    let root = sample_program(&mut arena);
    let expected = "{\n\
        \x20   if (c) {\n\
        \x20       a;\n\
        \x20   } else \n\
        \x20       x;\n\
        \x20   try {\n\
        \x20       a;\n\
        \x20   } catch (e) {\n\
        \x20       b;\n\
        \x20   } catch (f) {\n\
        \x20       c;\n\
        \x20   }\n\
        \x20   for each (k in obj) {\n\
        \x20       k;\n\
        \x20   }\n\
        \x20   do {\n\
        \x20       d;\n\
        \x20   } while (n);\n\
        \x20   [a, , 1];\n\
        \x20   {x: true};\n\
        }\n";
    assert_eq!(arena.to_source(root).unwrap(), expected);
}
