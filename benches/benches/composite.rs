// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame compositing benchmarks over a `PixelBuffer`.
//!
//! Run: `cargo bench --bench composite`

#![allow(missing_docs, reason = "criterion_group! generates undocumented public items")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use understory_composite::{Fill, PixelBuffer, Rect};
use understory_composite_benches::{Lcg, fill_scene};

const SIZE: i32 = 512;

fn bench_full_repaint(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor/full_repaint");
    for layers in [2_u32, 8] {
        let (mut scene, _) = fill_scene(layers, 16, SIZE, 1);
        let mut surface = PixelBuffer::new(SIZE as usize, SIZE as usize);
        let bounds = surface.bounds();
        group.bench_function(BenchmarkId::from_parameter(layers), |b| {
            b.iter(|| {
                scene.invalidate_all();
                black_box(scene.draw(&mut surface, bounds))
            });
        });
    }
    group.finish();
}

fn bench_moving_fills(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor/moving");
    for moving in [1_usize, 8, 32] {
        let (mut scene, ids) = fill_scene(8, 16, SIZE, 2);
        let mut surface = PixelBuffer::new(SIZE as usize, SIZE as usize);
        let bounds = surface.bounds();
        // Settle the first frame outside the measurement.
        let _ = scene.draw(&mut surface, bounds);
        let mut rng = Lcg::new(5);
        group.bench_function(BenchmarkId::from_parameter(moving), |b| {
            b.iter(|| {
                for &id in &ids[..moving] {
                    if let Some(fill) = scene.get_mut(id) {
                        let r = fill.rect();
                        let (dx, dy) = (rng.below(9) - 4, rng.below(9) - 4);
                        fill.set_rect(r.translate(dx, dy));
                    }
                }
                black_box(scene.draw(&mut surface, bounds))
            });
        });
    }
    group.finish();
}

fn bench_occluded_stack(c: &mut Criterion) {
    // An opaque full-screen fill on top hides every layer below from repainting.
    let (mut scene, _) = fill_scene(8, 16, SIZE, 3);
    scene.set_overlay(Some(Fill::new(Rect::new(0, 0, SIZE, SIZE), 0xff_10_10_10)));
    let mut surface = PixelBuffer::new(SIZE as usize, SIZE as usize);
    let bounds = surface.bounds();
    c.bench_function("compositor/occluded_stack", |b| {
        b.iter(|| {
            scene.invalidate_all();
            black_box(scene.draw(&mut surface, bounds))
        });
    });
}

criterion_group!(
    benches,
    bench_full_repaint,
    bench_moving_fills,
    bench_occluded_stack
);
criterion_main!(benches);
