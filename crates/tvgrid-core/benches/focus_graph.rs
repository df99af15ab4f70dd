//! Benchmarks for focus graph computation and traversal.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tvgrid_core::focus::{FocusGraph, FocusTarget};
use tvgrid_core::input::Direction;

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus_compute");

    for (rows, columns) in [(3, 5), (10, 10), (40, 40)] {
        let label = format!("{rows}x{columns}");
        group.bench_function(BenchmarkId::new("compute", &label), |b| {
            b.iter(|| FocusGraph::compute(rows, columns));
        });
    }

    group.finish();
}

fn bench_ring_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus_ring_walk");

    for (rows, columns) in [(3, 5), (40, 40)] {
        let graph = FocusGraph::compute(rows, columns);
        let label = format!("{rows}x{columns}");
        group.bench_function(BenchmarkId::new("walk_right", &label), |b| {
            b.iter(|| {
                let mut cur = FocusTarget::Slot(0);
                let mut steps = 0usize;
                while let FocusTarget::Slot(_) = cur {
                    cur = graph.next(cur, Direction::Right);
                    steps += 1;
                }
                steps
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_ring_walk);
criterion_main!(benches);
