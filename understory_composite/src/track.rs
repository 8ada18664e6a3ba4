// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! First pass: gather dirty regions and settle visibility transitions.

use alloc::vec::Vec;

use understory_rect_set::Rect;

use crate::drawable::Drawable;
use crate::error::{CompositeError, Hook};

/// Run `pre_draw` on every drawable and append its dirty contribution.
///
/// A drawable whose visibility flipped contributes exactly the rect it now
/// occupies (when appearing) or used to occupy (when disappearing) instead of
/// its own dirty list. Each contribution is clipped to the previous rect if
/// it was visible and to the current rect if it is visible, so a moving
/// drawable dirties both locations. Clipped rects are appended even when
/// empty.
pub(crate) fn collect_dirty<D, L>(layers: &mut [L], dirty: &mut Vec<Rect>) -> Result<(), CompositeError>
where
    D: Drawable,
    L: AsMut<[D]>,
{
    for (layer_index, layer) in layers.iter_mut().enumerate() {
        for (index, g) in layer.as_mut().iter_mut().enumerate() {
            g.pre_draw()
                .map_err(CompositeError::hook(Hook::PreDraw, layer_index, index))?;

            let visible = g.visible();
            let was_visible = g.was_visible();
            let current = g.current_rect();
            let previous = g.previous_rect();

            let transition;
            let contribution: &[Rect] = if visible == was_visible {
                g.dirty_rects()
            } else {
                transition = [if visible { current } else { previous }];
                &transition
            };

            for (shown, bounds) in [(was_visible, previous), (visible, current)] {
                if shown {
                    dirty.extend(contribution.iter().map(|r| r.clip(bounds)));
                }
            }

            g.set_was_visible(visible);
        }
    }
    Ok(())
}
