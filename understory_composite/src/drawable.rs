// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between the compositor and the things it draws.

use alloc::boxed::Box;
use alloc::string::String;
use core::error::Error;
use core::fmt;

use understory_rect_set::Rect;

/// Something the compositor can draw onto a surface.
///
/// Drawables own their rendering logic and their geometry. The compositor
/// borrows them for one frame, calls the hooks in a fixed order, and only
/// ever writes one piece of state: [`was_visible`](Self::was_visible),
/// through [`set_was_visible`](Self::set_was_visible). Implementations
/// should store that flag and otherwise leave it alone.
///
/// Hook order within a frame:
///
/// 1. [`pre_draw`](Self::pre_draw) on every drawable, topmost layer first.
/// 2. [`is_opaque_over`](Self::is_opaque_over) during occlusion culling,
///    topmost layer first.
/// 3. [`draw`](Self::draw) on visible drawables with something to repaint,
///    bottom layer first, followed by [`clear_dirty`](Self::clear_dirty).
pub trait Drawable {
    /// The target this drawable paints into.
    type Surface: ?Sized;

    /// Refresh the dirty list and geometry before the frame reads them.
    fn pre_draw(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Regions, in surface coordinates, that changed since the last frame.
    fn dirty_rects(&self) -> &[Rect];

    /// Forget the reported dirty regions once they have been handled.
    fn clear_dirty(&mut self);

    /// Whether the drawable should be painted this frame.
    fn visible(&self) -> bool;

    /// Visibility as of the previous frame. Owned by the compositor.
    fn was_visible(&self) -> bool;

    /// Record the visibility the compositor processed this frame.
    fn set_was_visible(&mut self, was_visible: bool);

    /// Bounding rect after the latest transform; the drawing extent.
    fn current_rect(&self) -> Rect;

    /// Bounding rect as of the last time the drawable was painted.
    fn previous_rect(&self) -> Rect;

    /// Whether every pixel of `rect` will be painted fully opaque.
    ///
    /// Returning `true` lets the compositor skip repainting lower layers
    /// beneath `rect`. The default is conservatively `false`.
    fn is_opaque_over(&self, rect: Rect) -> Result<bool, HookError> {
        _ = rect;
        Ok(false)
    }

    /// Paint the parts of the drawable that fall within `rects`.
    ///
    /// `rects` are already clipped to [`current_rect`](Self::current_rect)
    /// and are never empty.
    fn draw(&mut self, surface: &mut Self::Surface, rects: &[Rect]) -> Result<(), HookError>;
}

macro_rules! forward_drawable {
    () => {
        type Surface = D::Surface;

        #[inline]
        fn pre_draw(&mut self) -> Result<(), HookError> {
            (**self).pre_draw()
        }

        #[inline]
        fn dirty_rects(&self) -> &[Rect] {
            (**self).dirty_rects()
        }

        #[inline]
        fn clear_dirty(&mut self) {
            (**self).clear_dirty();
        }

        #[inline]
        fn visible(&self) -> bool {
            (**self).visible()
        }

        #[inline]
        fn was_visible(&self) -> bool {
            (**self).was_visible()
        }

        #[inline]
        fn set_was_visible(&mut self, was_visible: bool) {
            (**self).set_was_visible(was_visible);
        }

        #[inline]
        fn current_rect(&self) -> Rect {
            (**self).current_rect()
        }

        #[inline]
        fn previous_rect(&self) -> Rect {
            (**self).previous_rect()
        }

        #[inline]
        fn is_opaque_over(&self, rect: Rect) -> Result<bool, HookError> {
            (**self).is_opaque_over(rect)
        }

        #[inline]
        fn draw(&mut self, surface: &mut Self::Surface, rects: &[Rect]) -> Result<(), HookError> {
            (**self).draw(surface, rects)
        }
    };
}

impl<D: Drawable + ?Sized> Drawable for &mut D {
    forward_drawable!();
}

impl<D: Drawable + ?Sized> Drawable for Box<D> {
    forward_drawable!();
}

/// An error raised by one of a drawable's hooks.
///
/// Wraps any [`Error`]; its `Display` and `source` are those of the wrapped
/// error.
#[derive(Debug)]
pub struct HookError {
    inner: Box<dyn Error + Send + Sync + 'static>,
}

impl HookError {
    /// Wrap an arbitrary error.
    pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
        Self {
            inner: Box::new(error),
        }
    }

    /// Create an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// The wrapped error.
    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Attempt to downcast the wrapped error to a concrete type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl Error for HookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for Message {}
