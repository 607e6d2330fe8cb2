//! Benchmarks for fault tree construction

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use fta_test::{GeneratorConfig, ModelGenerator};
use fta_tree::{FaultTree, TreeConfig};

fn bench_register(c: &mut Criterion) {
    let model = ModelGenerator::new(GeneratorConfig::heavy()).generate();

    c.bench_function("register_gates_heavy", |b| {
        b.iter(|| {
            let mut tree = FaultTree::new("bench");
            for gate in &model.gates {
                let _ = tree.add_gate(Arc::clone(black_box(gate)));
            }
            tree
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let model = ModelGenerator::new(GeneratorConfig::heavy()).generate();

    c.bench_function("classify_heavy", |b| {
        b.iter_batched(
            || model.register(TreeConfig::permissive()),
            |tree| {
                if let Ok(mut tree) = tree {
                    let _ = black_box(tree.classify());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_classify_default(c: &mut Criterion) {
    let model = ModelGenerator::new(GeneratorConfig::default()).generate();

    c.bench_function("classify_default", |b| {
        b.iter_batched(
            || model.register(TreeConfig::default()),
            |tree| {
                if let Ok(mut tree) = tree {
                    let _ = black_box(tree.classify());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_register, bench_classify, bench_classify_default);
criterion_main!(benches);
