// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An owning scene: keyed layers of drawables plus queued damage.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use understory_rect_set::Rect;

use crate::damage::Damage;
use crate::drawable::Drawable;
use crate::error::CompositeError;
use crate::frame::composite_layers;
use crate::trace::Tracer;

/// Identifier for a drawable in a [`Compositor`] (generational).
///
/// Removing a drawable invalidates its id; a later insertion may reuse the
/// slot but never the id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GraphicId(u32, u32);

impl GraphicId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Layers of drawables composited onto one surface.
///
/// Layers are ordered by key, the smallest key being topmost. An optional
/// overlay sits above every keyed layer. When present it counts as layer 0
/// in [`CompositeError`] positions.
///
/// ```
/// use understory_composite::{Compositor, Damage, Fill, PixelBuffer, Rect};
///
/// let mut surface = PixelBuffer::new(16, 16);
/// let bounds = surface.bounds();
/// let mut scene = Compositor::new();
/// scene.insert(1, Fill::new(Rect::new(0, 0, 16, 16), 0xff_00_00_00));
/// let cursor = scene.insert(0, Fill::new(Rect::new(4, 4, 2, 2), 0xff_ff_ff_ff));
///
/// let damage = scene.draw(&mut surface, bounds).unwrap();
/// assert_eq!(damage.union_rect(bounds), Some(bounds));
///
/// scene.get_mut(cursor).unwrap().set_rect(Rect::new(8, 4, 2, 2));
/// let damage = scene.draw(&mut surface, bounds).unwrap();
/// assert_eq!(damage, Damage::Rects(vec![Rect::new(4, 4, 2, 2), Rect::new(8, 4, 2, 2)]));
/// assert_eq!(surface.pixel(4, 4), Some(0xff_00_00_00));
/// ```
#[derive(Debug)]
pub struct Compositor<K, D> {
    layers: BTreeMap<K, Vec<(GraphicId, D)>>,
    overlay: Option<D>,
    /// Layer key of each live slot.
    slots: Vec<Option<K>>,
    /// Last generation per slot (persists across frees).
    generations: Vec<u32>,
    free_list: Vec<usize>,
    pending: Damage,
}

impl<K, D> Default for Compositor<K, D> {
    fn default() -> Self {
        Self {
            layers: BTreeMap::new(),
            overlay: None,
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            pending: Damage::None,
        }
    }
}

impl<K: Ord + Clone, D: Drawable> Compositor<K, D> {
    /// Create an empty compositor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable to `layer`, creating the layer if needed.
    ///
    /// The drawable is treated as newly shown: its first frame repaints its
    /// whole current rect.
    pub fn insert(&mut self, layer: K, mut drawable: D) -> GraphicId {
        drawable.set_was_visible(false);
        let id = self.alloc(layer.clone());
        self.layers.entry(layer).or_default().push((id, drawable));
        id
    }

    /// Detach a drawable and hand it back.
    ///
    /// If it was on screen, the area it last occupied is queued as damage.
    pub fn remove(&mut self, id: GraphicId) -> Option<D> {
        let drawable = self.detach(id)?;
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
        Some(drawable)
    }

    /// Move a drawable to another layer, keeping its id.
    ///
    /// Returns `false` if `id` is stale.
    pub fn set_layer(&mut self, id: GraphicId, layer: K) -> bool {
        let Some(mut drawable) = self.detach(id) else {
            return false;
        };
        drawable.set_was_visible(false);
        self.slots[id.idx()] = Some(layer.clone());
        self.layers.entry(layer).or_default().push((id, drawable));
        true
    }

    /// Returns `true` if `id` refers to a live drawable.
    pub fn contains(&self, id: GraphicId) -> bool {
        self.layer_of(id).is_some()
    }

    /// The layer holding `id`.
    pub fn layer_of(&self, id: GraphicId) -> Option<&K> {
        if self.generations.get(id.idx()) != Some(&id.1) {
            return None;
        }
        self.slots.get(id.idx())?.as_ref()
    }

    /// Borrow a drawable.
    pub fn get(&self, id: GraphicId) -> Option<&D> {
        let layer = self.layers.get(self.layer_of(id)?)?;
        layer.iter().find(|(g, _)| *g == id).map(|(_, d)| d)
    }

    /// Mutably borrow a drawable.
    pub fn get_mut(&mut self, id: GraphicId) -> Option<&mut D> {
        let key = self.layer_of(id)?.clone();
        let layer = self.layers.get_mut(&key)?;
        layer.iter_mut().find(|(g, _)| *g == id).map(|(_, d)| d)
    }

    /// Number of drawables in keyed layers.
    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    /// Returns `true` if no keyed layer holds a drawable.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Non-empty layer keys, topmost first.
    pub fn layers(&self) -> impl Iterator<Item = &K> {
        self.layers.keys()
    }

    /// Install or clear the overlay, returning the previous one.
    ///
    /// A replaced overlay that was on screen leaves damage behind.
    pub fn set_overlay(&mut self, overlay: Option<D>) -> Option<D> {
        let overlay = overlay.map(|mut d| {
            d.set_was_visible(false);
            d
        });
        let old = core::mem::replace(&mut self.overlay, overlay)?;
        if old.was_visible() {
            self.pending.add_rect(old.previous_rect());
        }
        Some(old)
    }

    /// The overlay, if any.
    pub fn overlay(&self) -> Option<&D> {
        self.overlay.as_ref()
    }

    /// Mutably borrow the overlay, if any.
    pub fn overlay_mut(&mut self) -> Option<&mut D> {
        self.overlay.as_mut()
    }

    /// Damage queued for the next frame.
    pub fn pending(&self) -> &Damage {
        &self.pending
    }

    /// Queue `rect` for repainting on the next frame.
    pub fn invalidate(&mut self, rect: Rect) {
        self.pending.add_rect(rect);
    }

    /// Queue the whole surface for repainting on the next frame.
    pub fn invalidate_all(&mut self) {
        self.pending.merge(Damage::Full);
    }

    /// Composite one frame onto `surface`, whose extent is `bounds`.
    ///
    /// Returns the repainted region, or [`Damage::None`] if nothing changed.
    /// With no drawables at all the call is a no-op and queued damage is
    /// kept for later. On failure, damage queued through
    /// [`invalidate`](Self::invalidate) is queued again.
    pub fn draw(&mut self, surface: &mut D::Surface, bounds: Rect) -> Result<Damage, CompositeError> {
        self.draw_traced(surface, bounds, &mut Tracer::none())
    }

    /// Like [`draw`](Self::draw), reporting progress to `tracer`.
    pub fn draw_traced(
        &mut self,
        surface: &mut D::Surface,
        bounds: Rect,
        tracer: &mut Tracer<'_>,
    ) -> Result<Damage, CompositeError> {
        if self.layers.is_empty() && self.overlay.is_none() {
            return Ok(Damage::None);
        }

        let mut dirty = core::mem::take(&mut self.pending).into_rects(bounds);
        let queued = dirty.len();

        let mut stack: Vec<Vec<&mut D>> = Vec::with_capacity(self.layers.len() + 1);
        if let Some(overlay) = self.overlay.as_mut() {
            stack.push(vec![overlay]);
        }
        stack.extend(
            self.layers
                .values_mut()
                .map(|layer| layer.iter_mut().map(|(_, d)| d).collect()),
        );

        match composite_layers(&mut stack, surface, &mut dirty, tracer) {
            Ok(Some(drawn)) if !drawn.is_empty() => Ok(Damage::Rects(drawn)),
            Ok(_) => Ok(Damage::None),
            Err(err) => {
                for r in dirty.drain(..queued) {
                    self.pending.add_rect(r);
                }
                Err(err)
            }
        }
    }

    fn alloc(&mut self, layer: K) -> GraphicId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(layer);
            (idx, generation)
        } else {
            self.slots.push(Some(layer));
            self.generations.push(1);
            (self.slots.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "GraphicId uses 32-bit indices by design."
        )]
        GraphicId::new(idx as u32, generation)
    }

    /// Take a drawable out of its layer, queueing damage for its last
    /// painted rect. The slot stays allocated.
    fn detach(&mut self, id: GraphicId) -> Option<D> {
        let key = self.layer_of(id)?.clone();
        let layer = self.layers.get_mut(&key)?;
        let pos = layer.iter().position(|(g, _)| *g == id)?;
        let (_, drawable) = layer.remove(pos);
        if layer.is_empty() {
            self.layers.remove(&key);
        }
        if drawable.was_visible() {
            self.pending.add_rect(drawable.previous_rect());
        }
        Some(drawable)
    }
}
