// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solid colour rectangles.

use understory_rect_set::Rect;

use crate::drawable::{Drawable, HookError};
use crate::state::{GraphicFlags, GraphicState};
use crate::surface::PixelBuffer;

/// A rectangle filled with one `0xAARRGGBB` colour.
///
/// A fully opaque fill lets the compositor skip everything beneath it.
#[derive(Clone, Debug)]
pub struct Fill {
    state: GraphicState,
    colour: u32,
}

impl Fill {
    /// Create a visible fill.
    #[must_use]
    pub fn new(rect: Rect, colour: u32) -> Self {
        Self {
            state: GraphicState::new(rect),
            colour,
        }
    }

    /// The covered rectangle.
    pub fn rect(&self) -> Rect {
        self.state.rect()
    }

    /// Move or resize the fill.
    pub fn set_rect(&mut self, rect: Rect) {
        self.state.set_rect(rect);
    }

    /// The fill colour.
    pub fn colour(&self) -> u32 {
        self.colour
    }

    /// Change the fill colour, repainting the whole rect if it differs.
    pub fn set_colour(&mut self, colour: u32) {
        if colour != self.colour {
            self.colour = colour;
            self.state.invalidate_all();
        }
    }

    /// Show or hide the fill.
    pub fn set_visible(&mut self, visible: bool) {
        self.state.set_flag(GraphicFlags::VISIBLE, visible);
    }

    /// Request a repaint of `local`, given relative to the fill's top-left.
    pub fn invalidate(&mut self, local: Rect) {
        self.state.invalidate(local);
    }
}

impl Drawable for Fill {
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
        Ok(self.visible() && self.colour >> 24 == 0xff && self.state.rect().contains(rect))
    }

    fn draw(&mut self, surface: &mut PixelBuffer, rects: &[Rect]) -> Result<(), HookError> {
        for &r in rects {
            surface.fill_rect(r, self.colour);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::composite_layers;
    use crate::trace::Tracer;
    use alloc::vec;
    use alloc::vec::Vec;

    const GREY: u32 = 0xff_80_80_80;
    const GREEN: u32 = 0xff_00_ff_00;

    fn frame(layers: &mut [Vec<&mut Fill>], surface: &mut PixelBuffer) -> Option<Vec<Rect>> {
        composite_layers(layers, surface, &mut Vec::new(), &mut Tracer::none()).unwrap()
    }

    #[test]
    fn opacity_depends_on_alpha_and_coverage() {
        let mut fill = Fill::new(Rect::new(0, 0, 10, 10), GREY);
        assert!(fill.is_opaque_over(Rect::new(2, 2, 3, 3)).unwrap());
        assert!(!fill.is_opaque_over(Rect::new(8, 8, 3, 3)).unwrap());

        fill.set_colour(0x7f_80_80_80);
        assert!(!fill.is_opaque_over(Rect::new(2, 2, 3, 3)).unwrap());

        fill.set_colour(GREY);
        fill.set_visible(false);
        assert!(!fill.is_opaque_over(Rect::new(2, 2, 3, 3)).unwrap());
    }

    #[test]
    fn moving_repaints_both_locations() {
        let mut surface = PixelBuffer::new(20, 10);
        let mut background = Fill::new(Rect::new(0, 0, 20, 10), GREY);
        let mut block = Fill::new(Rect::new(0, 0, 4, 4), GREEN);

        frame(&mut [vec![&mut block], vec![&mut background]], &mut surface);
        assert_eq!(surface.pixel(1, 1), Some(GREEN));

        block.set_rect(Rect::new(10, 0, 4, 4));
        let drawn = frame(&mut [vec![&mut block], vec![&mut background]], &mut surface).unwrap();
        assert_eq!(
            drawn,
            vec![Rect::new(0, 0, 4, 4), Rect::new(10, 0, 4, 4)]
        );
        assert_eq!(surface.pixel(1, 1), Some(GREY));
        assert_eq!(surface.pixel(11, 1), Some(GREEN));
        assert_eq!(block.previous_rect(), Rect::new(10, 0, 4, 4));
    }

    #[test]
    fn recolouring_repaints_whole_rect_once() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut fill = Fill::new(Rect::new(2, 2, 3, 3), GREY);
        frame(&mut [vec![&mut fill]], &mut surface);

        fill.set_colour(GREEN);
        let drawn = frame(&mut [vec![&mut fill]], &mut surface);
        assert_eq!(drawn, Some(vec![Rect::new(2, 2, 3, 3)]));
        assert_eq!(surface.pixel(4, 4), Some(GREEN));

        assert_eq!(frame(&mut [vec![&mut fill]], &mut surface), None);
    }

    #[test]
    fn local_invalidation_is_offset_by_position() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut fill = Fill::new(Rect::new(4, 4, 4, 4), GREY);
        frame(&mut [vec![&mut fill]], &mut surface);

        fill.invalidate(Rect::new(1, 1, 1, 1));
        let drawn = frame(&mut [vec![&mut fill]], &mut surface);
        assert_eq!(drawn, Some(vec![Rect::new(5, 5, 1, 1)]));
    }

    #[test]
    fn move_hidden_under_opaque_cover_settles() {
        let mut surface = PixelBuffer::new(10, 10);
        let mut cover = Fill::new(Rect::new(0, 0, 10, 10), GREY);
        let mut block = Fill::new(Rect::new(1, 1, 2, 2), GREEN);
        frame(&mut [vec![&mut cover], vec![&mut block]], &mut surface);

        block.set_rect(Rect::new(5, 5, 2, 2));
        let drawn = frame(&mut [vec![&mut cover], vec![&mut block]], &mut surface);
        assert_eq!(
            drawn,
            Some(vec![Rect::new(1, 1, 2, 2), Rect::new(5, 5, 2, 2)])
        );
        assert_eq!(surface.pixel(5, 5), Some(GREY));
        assert_eq!(block.previous_rect(), Rect::new(5, 5, 2, 2));

        // The culled move is not reported again.
        assert_eq!(frame(&mut [vec![&mut cover], vec![&mut block]], &mut surface), None);
    }

    #[test]
    fn hiding_clears_the_old_area_below() {
        let mut surface = PixelBuffer::new(8, 8);
        let mut background = Fill::new(Rect::new(0, 0, 8, 8), GREY);
        let mut block = Fill::new(Rect::new(0, 0, 2, 2), GREEN);
        frame(&mut [vec![&mut block], vec![&mut background]], &mut surface);

        block.set_visible(false);
        let drawn = frame(&mut [vec![&mut block], vec![&mut background]], &mut surface);
        assert_eq!(drawn, Some(vec![Rect::new(0, 0, 2, 2)]));
        assert_eq!(surface.pixel(0, 0), Some(GREY));
    }
}
