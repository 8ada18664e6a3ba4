// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned images.

use understory_rect_set::Rect;

use crate::drawable::{Drawable, HookError};
use crate::state::{GraphicFlags, GraphicState};
use crate::surface::PixelBuffer;

/// A [`PixelBuffer`] image drawn with its top-left corner at a position.
#[derive(Clone, Debug)]
pub struct Sprite {
    state: GraphicState,
    image: PixelBuffer,
    /// Every pixel has full alpha.
    opaque: bool,
}

impl Sprite {
    /// Create a visible sprite at `(x, y)`.
    #[must_use]
    pub fn new(image: PixelBuffer, x: i32, y: i32) -> Self {
        let size = image.bounds();
        let opaque = image.pixels().iter().all(|p| p >> 24 == 0xff);
        Self {
            state: GraphicState::new(size.translate(x, y)),
            image,
            opaque,
        }
    }

    /// The image.
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// Top-left corner in surface coordinates.
    pub fn position(&self) -> (i32, i32) {
        let r = self.state.rect();
        (r.x, r.y)
    }

    /// Move the sprite.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let r = self.state.rect();
        self.state.set_rect(Rect::new(x, y, r.w, r.h));
    }

    /// Show or hide the sprite.
    pub fn set_visible(&mut self, visible: bool) {
        self.state.set_flag(GraphicFlags::VISIBLE, visible);
    }

    /// Request a repaint of `local`, in image coordinates.
    pub fn invalidate(&mut self, local: Rect) {
        self.state.invalidate(local);
    }
}

impl Drawable for Sprite {
    type Surface = PixelBuffer;

    fn pre_draw(&mut self) -> Result<(), HookError> {
        self.state.refresh();
        Ok(())
    }

    fn dirty_rects(&self) -> &[Rect] {
        self.state.dirty()
    }

    fn clear_dirty(&mut self) {
        self.state.clear_dirty();
    }

    fn visible(&self) -> bool {
        self.state.flag(GraphicFlags::VISIBLE)
    }

    fn was_visible(&self) -> bool {
        self.state.flag(GraphicFlags::WAS_VISIBLE)
    }

    fn set_was_visible(&mut self, was_visible: bool) {
        self.state.set_flag(GraphicFlags::WAS_VISIBLE, was_visible);
    }

    fn current_rect(&self) -> Rect {
        self.state.rect()
    }

    fn previous_rect(&self) -> Rect {
        self.state.drawn_rect()
    }

    fn is_opaque_over(&self, rect: Rect) -> Result<bool, HookError> {
        Ok(self.opaque && self.visible() && self.state.rect().contains(rect))
    }

    fn draw(&mut self, surface: &mut PixelBuffer, rects: &[Rect]) -> Result<(), HookError> {
        let (x, y) = self.position();
        for &r in rects {
            surface.blit(&self.image, r, (r.x - x, r.y - y));
        }
        Ok(())
    }
}
