// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping shared by the stock drawables.

use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_rect_set::Rect;

bitflags::bitflags! {
    /// Per-drawable state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub(crate) struct GraphicFlags: u8 {
        /// Should be painted.
        const VISIBLE     = 0b0000_0001;
        /// Visibility as last processed by the compositor.
        const WAS_VISIBLE = 0b0000_0010;
        /// The whole content changed since the last frame.
        const WHOLE_DIRTY = 0b0000_0100;
    }
}

impl Default for GraphicFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Geometry, visibility and pending damage of one drawable.
///
/// Damage is queued in coordinates local to the drawable and published in
/// surface coordinates by [`refresh`](Self::refresh).
#[derive(Clone, Debug)]
pub(crate) struct GraphicState {
    rect: Rect,
    /// Where the drawable was last painted.
    drawn: Rect,
    flags: GraphicFlags,
    local: SmallVec<[Rect; 4]>,
    dirty: Vec<Rect>,
}

impl GraphicState {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            drawn: rect,
            flags: GraphicFlags::default(),
            local: SmallVec::new(),
            dirty: Vec::new(),
        }
    }

    pub(crate) fn rect(&self) -> Rect {
        self.rect
    }

    /// Move or resize. The old and new locations are dirtied on the next
    /// refresh, relative to where the last completed frame left the drawable.
    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub(crate) fn drawn_rect(&self) -> Rect {
        self.drawn
    }

    pub(crate) fn flag(&self, flag: GraphicFlags) -> bool {
        self.flags.contains(flag)
    }

    pub(crate) fn set_flag(&mut self, flag: GraphicFlags, on: bool) {
        self.flags.set(flag, on);
    }

    /// Queue a local sub-rect for repainting. Empty rects are ignored.
    pub(crate) fn invalidate(&mut self, local: Rect) {
        if !local.is_empty() {
            self.local.push(local);
        }
    }

    pub(crate) fn invalidate_all(&mut self) {
        self.flags.insert(GraphicFlags::WHOLE_DIRTY);
    }

    /// Publish queued damage as the dirty list.
    ///
    /// A moved, resized or wholly changed drawable reports its last painted
    /// rect and its current rect; otherwise queued local rects are translated
    /// to surface coordinates.
    pub(crate) fn refresh(&mut self) {
        self.dirty.clear();
        if self.flags.contains(GraphicFlags::WHOLE_DIRTY) || self.rect != self.drawn {
            self.dirty.extend([self.drawn, self.rect]);
        } else {
            let (dx, dy) = (self.rect.x, self.rect.y);
            self.dirty.extend(self.local.iter().map(|r| r.translate(dx, dy)));
        }
        self.flags.remove(GraphicFlags::WHOLE_DIRTY);
        self.local.clear();
    }

    pub(crate) fn dirty(&self) -> &[Rect] {
        &self.dirty
    }

    /// End of a completed frame: the published damage has been repainted or
    /// culled, so the current rect becomes the settled one, painted or not.
    pub(crate) fn clear_dirty(&mut self) {
        self.dirty.clear();
        self.drawn = self.rect;
    }
}
