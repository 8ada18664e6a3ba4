// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Third pass: paint bottom-up and report what changed.

use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_rect_set::{Rect, disjoint_partition};

use crate::drawable::Drawable;
use crate::error::{CompositeError, Hook};
use crate::trace::{DrawEvent, Tracer};

/// Paint each layer within its redraw region, bottom layer first.
///
/// `regions[i]` is the region computed for `layers[i]`. Every drawable has its
/// dirty list cleared, drawn or not. Returns the union of all regions as
/// disjoint rects.
pub(crate) fn redraw_layers<D, L>(
    layers: &mut [L],
    regions: &[Vec<Rect>],
    surface: &mut D::Surface,
    tracer: &mut Tracer<'_>,
) -> Result<Vec<Rect>, CompositeError>
where
    D: Drawable,
    L: AsMut<[D]>,
{
    for (layer_index, (layer, region)) in layers.iter_mut().zip(regions).enumerate().rev() {
        for (index, g) in layer.as_mut().iter_mut().enumerate() {
            if g.visible() {
                let bounds = g.current_rect();
                let clips: SmallVec<[Rect; 8]> = region
                    .iter()
                    .map(|r| bounds.clip(*r))
                    .filter(|r| !r.is_empty())
                    .collect();
                if !clips.is_empty() {
                    tracer.draw(&DrawEvent {
                        layer: layer_index,
                        index,
                        rects: clips.len(),
                    });
                    g.draw(surface, &clips)
                        .map_err(CompositeError::hook(Hook::Draw, layer_index, index))?;
                }
            }
            g.clear_dirty();
        }
    }

    let all: Vec<Rect> = regions.iter().flatten().copied().collect();
    Ok(disjoint_partition(&all, &[]))
}
