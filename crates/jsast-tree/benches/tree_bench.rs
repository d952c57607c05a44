//! Clone, render and emit benchmarks over synthetic trees.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsast_tree::{NodeArena, NodeIndex, NodeKind};

/// A block of `width` if/try/for-in statements, each with small bodies.
fn build_tree(arena: &mut NodeArena, width: usize) -> NodeIndex {
    let mut statements = Vec::with_capacity(width);
    for i in 0..width {
        let stmt = match i % 3 {
            0 => {
                let if_stmt = arena.add_node(NodeKind::IfStatement, 0, 0);
                let cond = arena.add_name(0, "flag");
                let then = leaf_block(arena);
                arena.set_condition(if_stmt, cond).unwrap();
                arena.set_then_part(if_stmt, then).unwrap();
                if_stmt
            }
            1 => {
                let try_stmt = arena.add_node(NodeKind::TryStatement, 0, 0);
                let body = leaf_block(arena);
                let clause = arena.add_node(NodeKind::CatchClause, 0, 0);
                let var = arena.add_name(0, "e");
                let handler = leaf_block(arena);
                arena.set_catch_var_name(clause, var).unwrap();
                arena.set_catch_body(clause, handler).unwrap();
                arena.set_try_block(try_stmt, body).unwrap();
                arena.add_catch_clause(try_stmt, clause).unwrap();
                try_stmt
            }
            _ => {
                let for_in = arena.add_node(NodeKind::ForInLoop, 0, 0);
                let key = arena.add_name(0, "key");
                let object = arena.add_name(0, "object");
                let body = leaf_block(arena);
                arena.set_iterator(for_in, key).unwrap();
                arena.set_iterated_object(for_in, object).unwrap();
                arena.set_body(for_in, body).unwrap();
                for_in
            }
        };
        statements.push(stmt);
    }
    let root = arena.add_node(NodeKind::Block, 0, 0);
    arena.set_statements(root, statements).unwrap();
    root
}

/// `{ [1, , 2.5]; }`
fn leaf_block(arena: &mut NodeArena) -> NodeIndex {
    let array = arena.add_node(NodeKind::ArrayLiteral, 0, 0);
    let one = arena.add_number_literal(0, "1");
    let hole = arena.add_empty_expression(0);
    let two = arena.add_number_literal(0, "2.5");
    arena.set_elements(array, vec![one, hole, two]).unwrap();
    let stmt = arena.add_node(NodeKind::ExpressionStatement, 0, 0);
    arena.set_expression(stmt, array).unwrap();
    let block = arena.add_node(NodeKind::Block, 0, 0);
    arena.add_statement(block, stmt).unwrap();
    block
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_subtree");
    for width in [10usize, 100, 1000] {
        let mut arena = NodeArena::new();
        let root = build_tree(&mut arena, width);
        group.throughput(Throughput::Elements(arena.len() as u64));
        group.bench_with_input(BenchmarkId::new("width", width), &width, |b, _| {
            b.iter_batched(
                || arena.clone(),
                |mut scratch| black_box(scratch.clone_subtree(root, NodeIndex::NONE).unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_print(c: &mut Criterion) {
    let mut arena = NodeArena::new();
    let root = build_tree(&mut arena, 300);
    let bytes = arena.to_source(root).unwrap().len() as u64;

    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Bytes(bytes));
    group.bench_function("to_source", |b| {
        b.iter(|| black_box(arena.to_source(black_box(root)).unwrap()));
    });
    group.bench_function("to_interchange", |b| {
        b.iter(|| black_box(arena.to_interchange(black_box(root)).unwrap()));
    });
    group.finish();
}

fn bench_visit(c: &mut Criterion) {
    let mut arena = NodeArena::new();
    let root = build_tree(&mut arena, 1000);
    c.bench_function("visit_count", |b| {
        b.iter(|| {
            let mut count = 0usize;
            arena.visit(root, &mut |_: &NodeArena, _: NodeIndex| {
                count += 1;
                true
            });
            black_box(count)
        });
    });
}

criterion_group!(benches, bench_clone, bench_print, bench_visit);
criterion_main!(benches);
