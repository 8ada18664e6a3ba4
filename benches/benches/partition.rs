// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle-set partition benchmarks.
//!
//! Run: `cargo bench --bench partition`

#![allow(missing_docs, reason = "criterion_group! generates undocumented public items")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use understory_composite_benches::Lcg;
use understory_rect_set::{disjoint_partition, sort_edges};

fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint_partition/union");
    for n in [8_usize, 32, 128] {
        let add = Lcg::new(7).rects(n, 1024, 200);
        group.bench_with_input(BenchmarkId::from_parameter(n), &add, |b, add| {
            b.iter(|| black_box(disjoint_partition(black_box(add), &[])));
        });
    }
    group.finish();
}

fn bench_subtract(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint_partition/subtract");
    for n in [8_usize, 32, 128] {
        let mut rng = Lcg::new(11);
        let add = rng.rects(n, 1024, 200);
        let remove = rng.rects(n / 2, 1024, 300);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(add, remove),
            |b, (add, remove)| {
                b.iter(|| black_box(disjoint_partition(black_box(add), black_box(remove))));
            },
        );
    }
    group.finish();
}

fn bench_sort_edges(c: &mut Criterion) {
    let mut rng = Lcg::new(3);
    let edges: Vec<i32> = (0..512).map(|_| rng.below(4096)).collect();
    c.bench_function("sort_edges/512", |b| {
        b.iter(|| {
            let mut e = edges.clone();
            sort_edges(black_box(&mut e));
            black_box(e)
        });
    });
}

criterion_group!(benches, bench_union, bench_subtract, bench_sort_edges);
criterion_main!(benches);
