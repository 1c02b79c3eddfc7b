// benches/resolve_bench.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use prolog_core::kb::KnowledgeBase;

/// A chain of parent/2 facts plus a transitive ancestor/2 rule, large
/// enough to exercise rule indexing and repeated renaming under load.
fn build_sample_kb(chain_len: usize) -> KnowledgeBase {
    let mut source = String::new();
    for i in 0..chain_len {
        source.push_str(&format!("parent(p{i}, p{}).\n", i + 1));
    }
    source.push_str("ancestor(X, Y) :- parent(X, Y).\n");
    source.push_str("ancestor(X, Y) :- parent(X, Z), ancestor(Z, Y).\n");

    let mut kb = KnowledgeBase::new();
    kb.consult(&source).expect("sample program should parse");
    kb
}

fn benchmark_deep_ancestor_query(c: &mut Criterion) {
    let kb = build_sample_kb(120);

    c.bench_function("ancestor_chain_query", |b| {
        b.iter(|| {
            let solutions = kb.query("ancestor(p0, Y).").expect("query should succeed");
            black_box(solutions.len());
        })
    });
}

fn benchmark_assert_and_query(c: &mut Criterion) {
    c.bench_function("assert_then_query", |b| {
        b.iter(|| {
            let mut kb = KnowledgeBase::new();
            for i in 0..100 {
                kb.assertz(&format!("likes(p{i}, pizza).")).expect("assert should succeed");
            }
            let solutions = kb.query("likes(p42, X).").expect("query should succeed");
            black_box(solutions.len());
        })
    });
}

criterion_group!(benches, benchmark_deep_ancestor_query, benchmark_assert_and_query);
criterion_main!(benches);
