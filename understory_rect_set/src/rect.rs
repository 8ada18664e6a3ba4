// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The integer rectangle type and its helpers.

use core::cmp::{max, min};

/// Axis-aligned integer rectangle given by its origin and size.
///
/// A rectangle covers the half-open pixel area `[x, x + w) × [y, y + h)`.
/// It is empty when either dimension is zero or negative; empty rectangles
/// cover nothing and are ignored by the set operations in this crate.
///
/// Edge arithmetic saturates at the `i32` range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from its origin and size.
    #[inline(always)]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from its left, top, right and bottom edges.
    ///
    /// A span wider than `i32::MAX` saturates, so the result then covers less
    /// than the given edges. Callers needing exact coverage must split such
    /// spans first.
    #[inline]
    pub const fn from_edges(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// The right edge, `x + w`.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// The bottom edge, `y + h`.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Return true if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// The covered area, or zero for empty rectangles.
    #[inline]
    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.w as i64 * self.h as i64
        }
    }

    /// The intersection of two rectangles.
    ///
    /// Rectangles that do not overlap produce a zero-size rectangle placed
    /// at `self`'s origin, so the result is always a valid (possibly empty)
    /// value.
    ///
    /// ```
    /// use understory_rect_set::Rect;
    ///
    /// let a = Rect::new(0, 0, 10, 10);
    /// assert_eq!(a.clip(Rect::new(5, 5, 10, 10)), Rect::new(5, 5, 5, 5));
    /// assert_eq!(a.clip(Rect::new(20, 0, 5, 5)), Rect::new(0, 0, 0, 0));
    /// ```
    #[inline]
    pub fn clip(&self, other: Self) -> Self {
        let x0 = max(self.x, other.x);
        let y0 = max(self.y, other.y);
        let x1 = min(self.right(), other.right());
        let y1 = min(self.bottom(), other.bottom());
        if x0 < x1 && y0 < y1 {
            Self::from_edges(x0, y0, x1, y1)
        } else {
            Self::new(self.x, self.y, 0, 0)
        }
    }

    /// Whether the two rectangles share any area.
    ///
    /// Rectangles that merely touch along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        !self.clip(other).is_empty()
    }

    /// Whether `other` lies entirely within this rectangle (edges inclusive).
    #[inline]
    pub fn contains(&self, other: Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether the pixel at `(x, y)` lies inside this rectangle.
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.x <= x && x < self.right() && self.y <= y && y < self.bottom()
    }

    /// The smallest rectangle enclosing both; empty inputs are ignored.
    #[inline]
    pub fn union(&self, other: Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return other;
        }
        Self::from_edges(
            min(self.x, other.x),
            min(self.y, other.y),
            max(self.right(), other.right()),
            max(self.bottom(), other.bottom()),
        )
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.w,
            self.h,
        )
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    #[inline]
    fn from((x, y, w, h): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, w, h)
    }
}

#[cfg(feature = "kurbo")]
mod kurbo_interop {
    use super::Rect;

    impl From<Rect> for kurbo::Rect {
        #[inline]
        fn from(r: Rect) -> Self {
            Self::new(
                f64::from(r.x),
                f64::from(r.y),
                f64::from(r.right()),
                f64::from(r.bottom()),
            )
        }
    }

    impl Rect {
        /// The smallest integer rectangle covering a `kurbo::Rect`.
        ///
        /// The input is normalized first, then its edges are rounded
        /// outwards; coordinates outside the `i32` range saturate.
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Float to int casts saturate, which is the intended clamping."
        )]
        pub fn from_kurbo_expanded(r: kurbo::Rect) -> Self {
            let r = r.abs().expand();
            Self::from_edges(r.x0 as i32, r.y0 as i32, r.x1 as i32, r.y1 as i32)
        }
    }
}
