// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Second pass: carve away regions hidden behind opaque layers.

use alloc::vec::Vec;

use understory_rect_set::{Rect, disjoint_partition, total_area};

use crate::drawable::Drawable;
use crate::error::{CompositeError, Hook};
use crate::trace::{LayerCulledEvent, Tracer};

/// Compute each layer's redraw region, topmost layer first.
///
/// A layer repaints the part of `dirty` not already covered by opaque
/// regions of the layers above it. A rect of that region becomes opaque for
/// the layers below when every drawable in the layer covers it and reports
/// itself opaque over it.
pub(crate) fn cull_occluded<D, L>(
    layers: &mut [L],
    dirty: &[Rect],
    tracer: &mut Tracer<'_>,
) -> Result<Vec<Vec<Rect>>, CompositeError>
where
    D: Drawable,
    L: AsMut<[D]>,
{
    let mut opaque: Vec<Rect> = Vec::new();
    let mut regions = Vec::with_capacity(layers.len());

    for (layer_index, layer) in layers.iter_mut().enumerate() {
        let layer = layer.as_mut();
        let working = disjoint_partition(dirty, &opaque);

        let mut newly_opaque = Vec::new();
        if !layer.is_empty() {
            for &r in &working {
                if let Some(covered) = opaque_cover(layer, layer_index, r)? {
                    newly_opaque.push(covered);
                }
            }
        }

        tracer.layer_culled(&LayerCulledEvent {
            layer: layer_index,
            redraw_rects: working.len(),
            redraw_area: total_area(&working),
            newly_opaque: newly_opaque.len(),
        });
        opaque.extend(newly_opaque);
        regions.push(working);
    }
    Ok(regions)
}

/// Narrow `rect` through every drawable of the layer, requiring each to be
/// opaque over what remains.
fn opaque_cover<D: Drawable>(
    layer: &[D],
    layer_index: usize,
    rect: Rect,
) -> Result<Option<Rect>, CompositeError> {
    let mut r = rect;
    for (index, g) in layer.iter().enumerate() {
        r = r.clip(g.current_rect());
        if r.is_empty() {
            return Ok(None);
        }
        let opaque = g
            .is_opaque_over(r)
            .map_err(CompositeError::hook(Hook::OpaqueQuery, layer_index, index))?;
        if !opaque {
            return Ok(None);
        }
    }
    Ok(Some(r))
}
