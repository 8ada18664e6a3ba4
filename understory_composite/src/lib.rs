// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_composite --heading-base-level=0

//! Understory Composite: layered dirty-rectangle compositing for software renderers.
//!
//! Each frame, the compositor asks every drawable what changed, works out which parts of
//! the surface need repainting, skips anything hidden behind opaque content, and repaints
//! the rest bottom layer first. The repainted region comes back as disjoint rectangles,
//! ready to hand to a presenter.
//!
//! ## Frame model
//!
//! A frame runs three passes over an ordered stack of layers, layer 0 being topmost:
//!
//! 1. **Dirty tracking.** Every drawable's [`pre_draw`](Drawable::pre_draw) runs and its
//!    dirty rects are collected. A drawable whose visibility flipped since the previous
//!    frame contributes its whole new (or old) rect instead.
//! 2. **Occlusion culling.** Walking the stack top-down, each layer's redraw region is the
//!    dirty area minus everything already covered by opaque layers above it. Parts of
//!    that region where every drawable in the layer is opaque hide the layers beneath.
//! 3. **Redraw.** Walking bottom-up, every visible drawable paints the intersection of its
//!    rect with its layer's region. Dirty lists are then cleared.
//!
//! A frame with nothing dirty returns `None` without calling any paint or opacity hook.
//!
//! ## API overview
//!
//! - [`Drawable`]: the hooks the compositor calls, implemented for `&mut D` and `Box<D>`.
//! - [`composite_frame`]: one frame over layers named by key in a `HashMap`.
//! - [`composite_layers`]: one frame over already-borrowed layer slices.
//! - [`Compositor`]: an owning scene with generational [`GraphicId`]s, an overlay layer and
//!   queued [`Damage`].
//! - [`PixelBuffer`], [`Fill`] and [`Sprite`]: a minimal software surface and two stock
//!   drawables for it.
//! - [`trace`]: per-frame instrumentation hooks.
//!
//! Rectangle algebra lives in [`understory_rect_set`]; [`Rect`] and [`disjoint_partition`]
//! are re-exported here.
//!
//! ## Errors
//!
//! Layer lists naming a missing or repeated key are rejected before any drawable is
//! touched. A failing hook aborts the frame where it happens and is reported as
//! [`CompositeError::Hook`]; effects already applied to earlier drawables are kept.
//!
//! ## Features
//!
//! - `kurbo` *(default)*: `kurbo::Rect` conversions on [`Rect`].
//! - `std`: enables `std` in dependencies that support it.
//! - `trace`: enables [`Tracer`](trace::Tracer) dispatch (one branch per call site).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compositor;
mod damage;
mod drawable;
mod error;
mod fill;
mod frame;
mod occlusion;
mod redraw;
mod sprite;
mod state;
mod surface;
mod track;

pub mod trace;

#[cfg(test)]
mod testing;

pub use compositor::{Compositor, GraphicId};
pub use damage::Damage;
pub use drawable::{Drawable, HookError};
pub use error::{CompositeError, Hook};
pub use fill::Fill;
pub use frame::{composite_frame, composite_frame_traced, composite_layers};
pub use sprite::Sprite;
pub use surface::PixelBuffer;

pub use understory_rect_set::{Rect, disjoint_partition};
