// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instrumentation hooks for the compositing passes.
//!
//! [`TraceSink`] has one method per event, all defaulting to no-ops, so a sink
//! only implements what it cares about. [`Tracer`] wraps an optional
//! `&mut dyn TraceSink`: with the `trace` feature **off** every `Tracer`
//! method compiles to nothing; with it **on** each call is one `Option`
//! branch before dispatch.

/// Emitted before a frame starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBeginEvent {
    /// Number of layers in the stack.
    pub layers: usize,
    /// Rects supplied by the caller before drawables contributed theirs.
    pub seed_rects: usize,
}

/// Emitted once every drawable has reported its dirty regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyCollectedEvent {
    /// Size of the accumulated dirty list (overlapping, possibly empty rects).
    pub rects: usize,
}

/// Emitted after occlusion culling of one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerCulledEvent {
    /// Layer index, 0 being topmost.
    pub layer: usize,
    /// Disjoint rects this layer will repaint.
    pub redraw_rects: usize,
    /// Area of those rects.
    pub redraw_area: i64,
    /// Rects this layer newly hides from the layers beneath it.
    pub newly_opaque: usize,
}

/// Emitted right before a drawable's `draw` hook runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawEvent {
    /// Layer index, 0 being topmost.
    pub layer: usize,
    /// Position of the drawable within its layer.
    pub index: usize,
    /// Number of clip rects passed to the drawable.
    pub rects: usize,
}

/// Emitted when a frame completes without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEndEvent {
    /// Whether a redraw pass ran at all.
    pub drawn: bool,
    /// Number of disjoint rects handed back for presentation.
    pub rects: usize,
    /// Their total area.
    pub area: i64,
}

/// Receives trace events from the compositing passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called before a frame starts.
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        _ = e;
    }

    /// Called once dirty regions have been collected.
    fn on_dirty_collected(&mut self, e: &DirtyCollectedEvent) {
        _ = e;
    }

    /// Called after each layer is culled.
    fn on_layer_culled(&mut self, e: &LayerCulledEvent) {
        _ = e;
    }

    /// Called before each `draw` hook.
    fn on_draw(&mut self, e: &DrawEvent) {
        _ = e;
    }

    /// Called when a frame completes.
    fn on_frame_end(&mut self, e: &FrameEndEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($(#[$doc:meta])* $name:ident => $method:ident($event:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    dispatch!(
        /// Emits a [`FrameBeginEvent`].
        frame_begin => on_frame_begin(FrameBeginEvent)
    );
    dispatch!(
        /// Emits a [`DirtyCollectedEvent`].
        dirty_collected => on_dirty_collected(DirtyCollectedEvent)
    );
    dispatch!(
        /// Emits a [`LayerCulledEvent`].
        layer_culled => on_layer_culled(LayerCulledEvent)
    );
    dispatch!(
        /// Emits a [`DrawEvent`].
        draw => on_draw(DrawEvent)
    );
    dispatch!(
        /// Emits a [`FrameEndEvent`].
        frame_end => on_frame_end(FrameEndEvent)
    );
}
