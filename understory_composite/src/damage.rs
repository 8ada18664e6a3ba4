// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summaries exchanged with the caller.

use alloc::vec;
use alloc::vec::Vec;

use understory_rect_set::Rect;

/// A region of the surface that needs repainting or presenting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Damage {
    /// Nothing changed.
    #[default]
    None,
    /// A list of rectangles in surface coordinates.
    ///
    /// Rects queued by callers may overlap; rects returned from a draw are
    /// disjoint.
    Rects(Vec<Rect>),
    /// The entire surface.
    Full,
}

impl Damage {
    /// Returns `true` if no region is damaged.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merges another damage region into this one.
    ///
    /// `Full` absorbs everything and `None` is the identity; two rect lists
    /// are concatenated.
    pub fn merge(&mut self, other: Self) {
        match (&mut *self, other) {
            (Self::Full, _) | (_, Self::None) => {}
            (_, Self::Full) => *self = Self::Full,
            (Self::None, other) => *self = other,
            (Self::Rects(a), Self::Rects(b)) => a.extend(b),
        }
    }

    /// Adds one rectangle. Empty rectangles are dropped.
    pub fn add_rect(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.merge(Self::Rects(vec![rect]));
        }
    }

    /// The damaged rectangles, with `Full` resolved to `bounds`.
    #[must_use]
    pub fn into_rects(self, bounds: Rect) -> Vec<Rect> {
        match self {
            Self::None => Vec::new(),
            Self::Rects(rects) => rects,
            Self::Full => vec![bounds],
        }
    }

    /// Returns the bounding box of all damage, with `Full` resolved to `bounds`.
    pub fn union_rect(&self, bounds: Rect) -> Option<Rect> {
        match self {
            Self::None => None,
            Self::Full => Some(bounds),
            Self::Rects(rects) => {
                let mut it = rects.iter().copied().filter(|r| !r.is_empty());
                let first = it.next()?;
                Some(it.fold(first, |acc, r| acc.union(r)))
            }
        }
    }
}
