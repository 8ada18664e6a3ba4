// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rect_set --heading-base-level=0

//! Understory Rect Set: integer rectangle-set algebra for damage tracking.
//!
//! Dirty-rectangle renderers accumulate lots of overlapping invalidations over a frame.
//! This crate turns such lists into a set of non-overlapping rectangles, optionally
//! subtracting regions that need no repaint (for example, areas hidden behind opaque
//! content).
//!
//! - [`Rect`]: an integer `(x, y, w, h)` rectangle with clipping, containment and union helpers.
//! - [`disjoint_partition`]: `union(add) − union(remove)` as a disjoint rectangle list.
//! - [`sort_edges`]: the edge sort used to build the partition grid.
//! - [`total_area`]: summed area, handy for checking partitions.
//!
//! The partition merges cells horizontally within each grid row but never across rows.
//! Its output is always exact and disjoint, but it is not guaranteed to use the fewest
//! possible rectangles.
//!
//! # Example
//!
//! ```rust
//! use understory_rect_set::{Rect, disjoint_partition, total_area};
//!
//! let dirty = [Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10)];
//! let rects = disjoint_partition(&dirty, &[]);
//! assert_eq!(total_area(&rects), 175);
//! ```
//!
//! ## Features
//!
//! - `kurbo` *(default)*: conversions between [`Rect`] and `kurbo::Rect`, using `kurbo`'s
//!   `libm` support so the crate stays `no_std`.
//! - `std`: enables `std` in dependencies that support it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod edges;
mod partition;
mod rect;

pub use edges::sort_edges;
pub use partition::{disjoint_partition, total_area};
pub use rect::Rect;
