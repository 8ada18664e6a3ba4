// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scriptable drawable for exercising the passes.

use alloc::vec::Vec;
use core::cell::Cell;

use understory_rect_set::Rect;

use crate::drawable::{Drawable, HookError};
use crate::error::Hook;

/// Records every `draw` call as `(id, rects)`, in call order.
#[derive(Debug, Default)]
pub(crate) struct ProbeSurface {
    pub(crate) calls: Vec<(u32, Vec<Rect>)>,
}

#[derive(Debug)]
pub(crate) struct Probe {
    pub(crate) id: u32,
    pub(crate) rect: Rect,
    pub(crate) previous: Rect,
    pub(crate) visible: bool,
    pub(crate) was_visible: bool,
    pub(crate) dirty: Vec<Rect>,
    pub(crate) opaque: bool,
    pub(crate) fail: Option<Hook>,
    pub(crate) pre_draws: usize,
    pub(crate) opaque_queries: Cell<usize>,
}

impl Probe {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            id: 0,
            rect,
            previous: rect,
            visible: true,
            was_visible: false,
            dirty: Vec::new(),
            opaque: false,
            fail: None,
            pre_draws: 0,
            opaque_queries: Cell::new(0),
        }
    }

    pub(crate) fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn with_dirty(mut self, dirty: &[Rect]) -> Self {
        self.dirty = dirty.to_vec();
        self
    }

    pub(crate) fn with_previous(mut self, previous: Rect) -> Self {
        self.previous = previous;
        self
    }

    pub(crate) fn opaque(mut self) -> Self {
        self.opaque = true;
        self
    }

    pub(crate) fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Mark the drawable as already shown in an earlier frame.
    pub(crate) fn settled(mut self) -> Self {
        self.was_visible = true;
        self
    }

    pub(crate) fn failing(mut self, hook: Hook) -> Self {
        self.fail = Some(hook);
        self
    }

    fn check(&self, hook: Hook) -> Result<(), HookError> {
        if self.fail == Some(hook) {
            Err(HookError::msg("probe failure"))
        } else {
            Ok(())
        }
    }
}

impl Drawable for Probe {
    type Surface = ProbeSurface;

    fn pre_draw(&mut self) -> Result<(), HookError> {
        self.check(Hook::PreDraw)?;
        self.pre_draws += 1;
        Ok(())
    }

    fn dirty_rects(&self) -> &[Rect] {
        &self.dirty
    }

    fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn was_visible(&self) -> bool {
        self.was_visible
    }

    fn set_was_visible(&mut self, was_visible: bool) {
        self.was_visible = was_visible;
    }

    fn current_rect(&self) -> Rect {
        self.rect
    }

    fn previous_rect(&self) -> Rect {
        self.previous
    }

    fn is_opaque_over(&self, rect: Rect) -> Result<bool, HookError> {
        self.check(Hook::OpaqueQuery)?;
        self.opaque_queries.set(self.opaque_queries.get() + 1);
        Ok(self.opaque && self.visible && self.rect.contains(rect))
    }

    fn draw(&mut self, surface: &mut ProbeSurface, rects: &[Rect]) -> Result<(), HookError> {
        self.check(Hook::Draw)?;
        self.previous = self.rect;
        surface.calls.push((self.id, rects.to_vec()));
        Ok(())
    }
}
