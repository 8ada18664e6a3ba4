// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge coordinate sets used to build the partition grid.

use alloc::vec::Vec;
use core::ops::Range;

/// Sort a set of edge coordinates ascending, in place.
///
/// Stability is irrelevant for plain integers, so this uses the unstable sort.
#[inline]
pub fn sort_edges(edges: &mut [i32]) {
    edges.sort_unstable();
}

/// The distinct, sorted coordinates of one axis.
///
/// Consecutive coordinates bound the grid bands (columns or rows) that the
/// partition is computed over.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeAxis {
    coords: Vec<i32>,
}

impl EdgeAxis {
    /// Collect, sort and deduplicate coordinates.
    pub(crate) fn collect(coords: impl IntoIterator<Item = i32>) -> Self {
        let mut coords: Vec<i32> = coords.into_iter().collect();
        sort_edges(&mut coords);
        coords.dedup();
        Self { coords }
    }

    /// Number of bands between consecutive coordinates.
    #[inline]
    pub(crate) fn bands(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// The coordinate at `index`.
    #[inline]
    pub(crate) fn coord(&self, index: usize) -> i32 {
        self.coords[index]
    }

    /// The bands spanned by `[lo, hi)`.
    ///
    /// Both ends must have been collected into this axis.
    pub(crate) fn span(&self, lo: i32, hi: i32) -> Range<usize> {
        let start = self.position(lo);
        let end = self.position(hi);
        start..end.max(start)
    }

    fn position(&self, coord: i32) -> usize {
        self.coords
            .binary_search(&coord)
            .unwrap_or_else(|insert_at| insert_at)
    }
}
