// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid decomposition of rectangle unions and differences.

use alloc::vec;
use alloc::vec::Vec;

use crate::edges::EdgeAxis;
use crate::rect::Rect;

/// Membership of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cell {
    /// Covered by at least one rectangle of the `add` set.
    add: bool,
    /// Covered by at least one rectangle of the `remove` set.
    remove: bool,
}

impl Cell {
    #[inline]
    fn is_kept(self) -> bool {
        self.add && !self.remove
    }
}

/// Row-major grid of cells bounded by the collected edges.
struct CellGrid {
    xs: EdgeAxis,
    ys: EdgeAxis,
    cells: Vec<Cell>,
}

impl CellGrid {
    fn new(live: &[Rect]) -> Self {
        let xs = EdgeAxis::collect(live.iter().flat_map(|r| [r.x, r.right()]));
        let ys = EdgeAxis::collect(live.iter().flat_map(|r| [r.y, r.bottom()]));
        let cells = vec![Cell::default(); xs.bands() * ys.bands()];
        Self { xs, ys, cells }
    }

    fn mark(&mut self, rect: Rect, set: impl Fn(&mut Cell)) {
        let cols = self.xs.bands();
        let col_span = self.xs.span(rect.x, rect.right());
        for row in self.ys.span(rect.y, rect.bottom()) {
            let start = row * cols;
            for cell in &mut self.cells[start + col_span.start..start + col_span.end] {
                set(cell);
            }
        }
    }

    /// Emit maximal horizontal runs of kept cells, row by row.
    ///
    /// A run is closed early when extending it would make its width overflow
    /// `i32`, so every emitted rect covers its cells exactly.
    fn runs(&self) -> Vec<Rect> {
        let cols = self.xs.bands();
        let mut out = Vec::new();
        for row in 0..self.ys.bands() {
            let cells = &self.cells[row * cols..(row + 1) * cols];
            let mut run_start: Option<usize> = None;
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_kept() {
                    if let Some(start) = run_start.take() {
                        out.push(self.run(row, start, col));
                    }
                    continue;
                }
                match run_start {
                    None => run_start = Some(col),
                    Some(start) if !self.fits(start, col + 1) => {
                        out.push(self.run(row, start, col));
                        run_start = Some(col);
                    }
                    Some(_) => {}
                }
            }
            if let Some(start) = run_start {
                out.push(self.run(row, start, cols));
            }
        }
        out
    }

    /// Whether columns `start..end` span a width representable as `i32`.
    fn fits(&self, start: usize, end: usize) -> bool {
        self.xs.coord(end).checked_sub(self.xs.coord(start)).is_some()
    }

    /// The rect covering columns `start..end` of `row`.
    ///
    /// Single bands always fit: a kept cell lies inside some valid rect.
    fn run(&self, row: usize, start: usize, end: usize) -> Rect {
        Rect::from_edges(
            self.xs.coord(start),
            self.ys.coord(row),
            self.xs.coord(end),
            self.ys.coord(row + 1),
        )
    }
}

/// Compute a disjoint rectangle list covering `union(add) − union(remove)`.
///
/// Every returned rectangle is non-empty and no two overlap. Empty input
/// rectangles are ignored.
///
/// The edges of all inputs cut the plane into a grid of cells; a cell is kept
/// when some `add` rectangle covers it and no `remove` rectangle does. Kept
/// cells are merged into horizontal runs within each row only, so the result
/// is a correct partition but not necessarily the one with the fewest
/// rectangles.
///
/// Runs in `O(Ex · Ey)` for `Ex`/`Ey` distinct edges per axis.
///
/// # Example
///
/// ```rust
/// use understory_rect_set::{Rect, disjoint_partition, total_area};
///
/// let add = [Rect::new(0, 0, 10, 10)];
/// let remove = [Rect::new(2, 2, 4, 4)];
/// let rects = disjoint_partition(&add, &remove);
/// assert_eq!(total_area(&rects), 84);
///
/// // Anything minus itself is nothing.
/// assert!(disjoint_partition(&add, &add).is_empty());
/// ```
pub fn disjoint_partition(add: &[Rect], remove: &[Rect]) -> Vec<Rect> {
    let add: Vec<Rect> = add.iter().copied().filter(|r| !r.is_empty()).collect();
    if add.is_empty() {
        return Vec::new();
    }
    let remove = remove.iter().copied().filter(|r| !r.is_empty());

    let live: Vec<Rect> = add.iter().copied().chain(remove.clone()).collect();
    let mut grid = CellGrid::new(&live);
    for r in &add {
        grid.mark(*r, |c| c.add = true);
    }
    for r in remove {
        grid.mark(r, |c| c.remove = true);
    }
    grid.runs()
}

/// Sum of the areas of `rects`.
///
/// Equals the covered area when the rectangles are disjoint, as the output of
/// [`disjoint_partition`] is.
pub fn total_area(rects: &[Rect]) -> i64 {
    rects.iter().map(Rect::area).sum()
}
