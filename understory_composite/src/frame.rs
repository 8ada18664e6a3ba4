// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame entry points: resolve the layer stack and run the three passes.

use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;
use understory_rect_set::{Rect, total_area};

use crate::drawable::Drawable;
use crate::error::CompositeError;
use crate::occlusion::cull_occluded;
use crate::redraw::redraw_layers;
use crate::trace::{DirtyCollectedEvent, FrameBeginEvent, FrameEndEvent, Tracer};
use crate::track::collect_dirty;

/// Composite one frame over already-resolved layers, `layers[0]` topmost.
///
/// `dirty` holds any caller-supplied damage on entry; drawables append their
/// own contributions to it. Returns `Ok(None)` when nothing was dirty, in
/// which case no `draw` or `is_opaque_over` hook ran. Otherwise returns the
/// repainted region as disjoint rects, which may be empty when every dirty
/// rect clipped away to nothing.
///
/// Every drawable's dirty list is cleared on success.
///
/// A layer with no drawables paints nothing and hides nothing: layers below
/// it are repainted as if it were absent.
pub fn composite_layers<D, L>(
    layers: &mut [L],
    surface: &mut D::Surface,
    dirty: &mut Vec<Rect>,
    tracer: &mut Tracer<'_>,
) -> Result<Option<Vec<Rect>>, CompositeError>
where
    D: Drawable,
    L: AsMut<[D]>,
{
    tracer.frame_begin(&FrameBeginEvent {
        layers: layers.len(),
        seed_rects: dirty.len(),
    });

    collect_dirty(layers, dirty)?;
    tracer.dirty_collected(&DirtyCollectedEvent { rects: dirty.len() });

    if dirty.is_empty() {
        for layer in layers.iter_mut() {
            layer.as_mut().iter_mut().for_each(D::clear_dirty);
        }
        tracer.frame_end(&FrameEndEvent {
            drawn: false,
            rects: 0,
            area: 0,
        });
        return Ok(None);
    }

    let regions = cull_occluded(layers, dirty, tracer)?;
    let drawn = redraw_layers(layers, &regions, surface, tracer)?;

    tracer.frame_end(&FrameEndEvent {
        drawn: true,
        rects: drawn.len(),
        area: total_area(&drawn),
    });
    Ok(Some(drawn))
}

/// Composite one frame over the layers named by `layers`, topmost first.
///
/// Each key selects a drawable list from `graphics`. Keys missing from the
/// map, or listed twice, are rejected before any drawable is touched. A key
/// mapped to an empty list is accepted and occludes nothing. See
/// [`composite_layers`] for the result and for how `seed_dirty` is used.
///
/// ```
/// use hashbrown::HashMap;
/// use understory_composite::{Fill, PixelBuffer, Rect, composite_frame};
///
/// let mut surface = PixelBuffer::new(32, 32);
/// let mut graphics = HashMap::new();
/// graphics.insert("background", vec![Fill::new(Rect::new(0, 0, 32, 32), 0xff_20_20_20)]);
///
/// // A fill appearing for the first time dirties its whole rect.
/// let mut dirty = Vec::new();
/// let drawn = composite_frame(&["background"], &mut surface, &mut graphics, &mut dirty).unwrap();
/// assert_eq!(drawn, Some(vec![Rect::new(0, 0, 32, 32)]));
/// assert_eq!(surface.pixel(5, 5), Some(0xff_20_20_20));
///
/// // Nothing changed since.
/// let mut dirty = Vec::new();
/// let drawn = composite_frame(&["background"], &mut surface, &mut graphics, &mut dirty).unwrap();
/// assert_eq!(drawn, None);
/// ```
pub fn composite_frame<K, D, H>(
    layers: &[K],
    surface: &mut D::Surface,
    graphics: &mut HashMap<K, Vec<D>, H>,
    seed_dirty: &mut Vec<Rect>,
) -> Result<Option<Vec<Rect>>, CompositeError>
where
    K: Hash + Eq,
    D: Drawable,
    H: BuildHasher,
{
    composite_frame_traced(layers, surface, graphics, seed_dirty, &mut Tracer::none())
}

/// Like [`composite_frame`], reporting progress to `tracer`.
pub fn composite_frame_traced<K, D, H>(
    layers: &[K],
    surface: &mut D::Surface,
    graphics: &mut HashMap<K, Vec<D>, H>,
    seed_dirty: &mut Vec<Rect>,
    tracer: &mut Tracer<'_>,
) -> Result<Option<Vec<Rect>>, CompositeError>
where
    K: Hash + Eq,
    D: Drawable,
    H: BuildHasher,
{
    let mut resolved = resolve_layers(layers, graphics)?;
    composite_layers(&mut resolved, surface, seed_dirty, tracer)
}

/// Borrow each named layer's drawables, in key-list order.
fn resolve_layers<'g, K, D, H>(
    layers: &[K],
    graphics: &'g mut HashMap<K, Vec<D>, H>,
) -> Result<Vec<&'g mut [D]>, CompositeError>
where
    K: Hash + Eq,
    H: BuildHasher,
{
    let mut positions: HashMap<&K, usize> = HashMap::with_capacity(layers.len());
    for (position, key) in layers.iter().enumerate() {
        if positions.insert(key, position).is_some() {
            return Err(CompositeError::DuplicateLayer { position });
        }
    }

    let mut slots: Vec<Option<&'g mut [D]>> = layers.iter().map(|_| None).collect();
    for (key, drawables) in graphics.iter_mut() {
        if let Some(&position) = positions.get(&key) {
            slots[position] = Some(drawables.as_mut_slice());
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(position, slot)| slot.ok_or(CompositeError::MissingLayer { position }))
        .collect()
}
