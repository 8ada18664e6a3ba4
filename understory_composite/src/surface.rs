// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal software render target.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use understory_rect_set::Rect;

/// An owned buffer of packed `0xAARRGGBB` pixels with straight alpha.
///
/// Coordinates are `i32` so they can be combined freely with [`Rect`];
/// anything outside [`bounds`](Self::bounds) is clipped away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    /// Create a buffer with every pixel set to `colour`.
    #[must_use]
    pub fn filled(width: usize, height: usize, colour: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The buffer's extent, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0,
            0,
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite one pixel without blending. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, colour: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = colour;
        }
    }

    /// Paint `colour` over `rect` using source-over blending.
    pub fn fill_rect(&mut self, rect: Rect, colour: u32) {
        let Some((xs, ys)) = self.spans(rect) else {
            return;
        };
        let width = self.width;
        for y in ys {
            let row = &mut self.pixels[y * width..][xs.clone()];
            if colour >> 24 == 0xff {
                row.fill(colour);
            } else {
                for px in row {
                    *px = blend_over(colour, *px);
                }
            }
        }
    }

    /// Paint `src` into `dest` using source-over blending.
    ///
    /// The source pixel at `src_origin` lands on the top-left corner of
    /// `dest`. Both the destination and the source are clipped to their
    /// buffers.
    pub fn blit(&mut self, src: &Self, dest: Rect, src_origin: (i32, i32)) {
        let (dx, dy) = (
            dest.x.saturating_sub(src_origin.0),
            dest.y.saturating_sub(src_origin.1),
        );
        let visible = dest
            .clip(self.bounds())
            .clip(src.bounds().translate(dx, dy));
        let Some((xs, ys)) = self.spans(visible) else {
            return;
        };
        // Source coordinates are the destination ones shifted by (-dx, -dy);
        // the clip above keeps them inside `src`.
        let (Ok(sx), Ok(sy)) = (
            usize::try_from(visible.x - dx),
            usize::try_from(visible.y - dy),
        ) else {
            return;
        };
        for (row, y) in ys.enumerate() {
            let src_row = &src.pixels[(sy + row) * src.width + sx..][..xs.len()];
            let dst_row = &mut self.pixels[y * self.width..][xs.clone()];
            for (d, &s) in dst_row.iter_mut().zip(src_row) {
                *d = blend_over(s, *d);
            }
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Column and row ranges of `rect` clipped to the buffer.
    fn spans(&self, rect: Rect) -> Option<(Range<usize>, Range<usize>)> {
        let r = rect.clip(self.bounds());
        if r.is_empty() {
            return None;
        }
        let x0 = usize::try_from(r.x).ok()?;
        let y0 = usize::try_from(r.y).ok()?;
        let x1 = usize::try_from(r.right()).ok()?;
        let y1 = usize::try_from(r.bottom()).ok()?;
        Some((x0..x1, y0..y1))
    }
}

/// Source-over composite of two straight-alpha `0xAARRGGBB` colours.
pub(crate) fn blend_over(src: u32, dst: u32) -> u32 {
    let sa = src >> 24;
    match sa {
        0xff => return src,
        0 => return dst,
        _ => {}
    }
    let da = div255((dst >> 24) * (0xff - sa));
    let out_a = sa + da;
    let channel = |shift: u32| {
        let s = (src >> shift) & 0xff;
        let d = (dst >> shift) & 0xff;
        (s * sa + d * da + out_a / 2) / out_a
    };
    (out_a << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

/// `v / 255`, rounded, for `v <= 255 * 255`.
fn div255(v: u32) -> u32 {
    let v = v + 128;
    (v + (v >> 8)) >> 8
}
