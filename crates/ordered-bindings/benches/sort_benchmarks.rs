//! # Ordered Bindings Benchmarks
//!
//! ```bash
//! cargo bench --package ordered-bindings --bench sort_benchmarks
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ordered_bindings::{BindingSorter, OrderConstraint, OrderingApi, SortEntry};

/// Every item after its predecessor, fed in reverse
fn chain(size: u32) -> Vec<SortEntry<u32, u32>> {
    (0..size)
        .rev()
        .map(|id| {
            let constraint = (id > 0).then(|| OrderConstraint::new().after(id - 1));
            SortEntry::new(id, id, constraint)
        })
        .collect()
}

/// Unconstrained items with every tenth one pinned before item 0
fn sparse(size: u32) -> Vec<SortEntry<u32, u32>> {
    (0..size)
        .map(|id| {
            let constraint = (id % 10 == 9).then(|| OrderConstraint::new().before(0).with_position(-1));
            SortEntry::new(id, id, constraint)
        })
        .collect()
}

fn bench_sort(c: &mut Criterion) {
    let sorter = BindingSorter::new();
    let mut group = c.benchmark_group("ordered-bindings/sort");

    for size in [10u32, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));

        let entries = chain(size);
        group.bench_with_input(BenchmarkId::new("chain", size), &entries, |b, entries| {
            b.iter(|| black_box(sorter.order_indices(entries).unwrap()))
        });

        let entries = sparse(size);
        group.bench_with_input(BenchmarkId::new("sparse", size), &entries, |b, entries| {
            b.iter(|| black_box(sorter.order_indices(entries).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sort);
criterion_main!(benches);
