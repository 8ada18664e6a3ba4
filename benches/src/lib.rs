// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic inputs shared by the benchmarks.

use understory_composite::{Compositor, Fill, GraphicId, Rect};

/// Small linear congruential generator, so runs are reproducible.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
    /// Seed a generator.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next value in `0..bound`.
    pub fn below(&mut self, bound: i32) -> i32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let bound = u64::from(bound.max(1).unsigned_abs());
        i32::try_from((self.0 >> 33) % bound).unwrap_or(0)
    }

    /// A rect inside a `size × size` area, at most `max_side` on each side.
    pub fn rect(&mut self, size: i32, max_side: i32) -> Rect {
        let w = 1 + self.below(max_side);
        let h = 1 + self.below(max_side);
        Rect::new(self.below(size - w), self.below(size - h), w, h)
    }

    /// `n` random rects, as produced by [`rect`](Self::rect).
    pub fn rects(&mut self, n: usize, size: i32, max_side: i32) -> Vec<Rect> {
        (0..n).map(|_| self.rect(size, max_side)).collect()
    }
}

/// A scene of `layers` layers, each holding `per_layer` random fills.
///
/// Roughly half the fills are translucent. Returns the ids, topmost layer first.
pub fn fill_scene(
    layers: u32,
    per_layer: usize,
    size: i32,
    seed: u64,
) -> (Compositor<u32, Fill>, Vec<GraphicId>) {
    let mut rng = Lcg::new(seed);
    let mut scene = Compositor::new();
    let mut ids = Vec::new();
    for layer in 0..layers {
        for _ in 0..per_layer {
            let alpha: u32 = if rng.below(2) == 0 { 0xff } else { 0x80 };
            let colour = (alpha << 24) | rng.below(0x0100_0000).unsigned_abs();
            ids.push(scene.insert(layer, Fill::new(rng.rect(size, size / 4), colour)));
        }
    }
    (scene, ids)
}
