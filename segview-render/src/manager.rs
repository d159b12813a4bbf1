//! Round-robin render-slot manager.
//!
//! Every slot pairs one display surface with the renderer created for it at
//! construction time. Content is placed with [`SlotManager::assign`], which
//! targets the slot under the cursor and then advances the cursor modulo the
//! slot count. A slot owns the content it displays; clearing drops it.

use log::{debug, info, warn};

use crate::{Renderer, RenderError, Result, Rgb, Surface, DEFAULT_BACKGROUND};

/// Content handle type displayed by surfaces of type `S`.
pub type ContentOf<S> = <<S as Surface>::Renderer as Renderer>::Content;

/// One viewport of the grid with its renderer and displayed content.
pub struct RenderSlot<S: Surface> {
    index: usize,
    surface: S,
    renderer: S::Renderer,
    content: Vec<ContentOf<S>>,
}

impl<S: Surface> RenderSlot<S> {
    /// Position of this slot in the grid.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display surface the renderer is bound to.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Renderer owned by this slot.
    #[must_use]
    pub fn renderer(&self) -> &S::Renderer {
        &self.renderer
    }

    /// Content currently displayed.
    #[must_use]
    pub fn content(&self) -> &[ContentOf<S>] {
        &self.content
    }

    /// Returns true if nothing is displayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn clear(&mut self) {
        self.renderer.remove_all_content();
        self.content.clear();
        self.renderer.render();
    }

    fn push(&mut self, content: ContentOf<S>) {
        self.renderer.add_content(&content);
        self.content.push(content);
        self.renderer.render();
    }

    fn replace(&mut self, content: ContentOf<S>) {
        self.clear();
        self.push(content);
        self.renderer.reset_camera();
    }
}

/// Fixed pool of render slots filled in round-robin order.
pub struct SlotManager<S: Surface> {
    slots: Vec<RenderSlot<S>>,
    cursor: usize,
}

impl<S: Surface> SlotManager<S> {
    /// Creates one slot per surface with the default background.
    ///
    /// # Errors
    ///
    /// [`RenderError::NoSurfaces`] if `surfaces` is empty, or the backend
    /// error of the first surface that fails to attach a renderer.
    pub fn new(surfaces: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::with_background(surfaces, DEFAULT_BACKGROUND)
    }

    /// Creates one slot per surface, each renderer using `background`.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_background(surfaces: impl IntoIterator<Item = S>, background: Rgb) -> Result<Self> {
        let slots = surfaces
            .into_iter()
            .enumerate()
            .map(|(index, mut surface)| -> Result<RenderSlot<S>> {
                let renderer = surface.attach_renderer(background)?;
                Ok(RenderSlot {
                    index,
                    surface,
                    renderer,
                    content: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if slots.is_empty() {
            return Err(RenderError::NoSurfaces);
        }
        debug!("initialized {} render slots", slots.len());
        Ok(Self { slots, cursor: 0 })
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a manager has at least one slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot that receives the next [`assign`](Self::assign).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the slot at `index`, if any.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&RenderSlot<S>> {
        self.slots.get(index)
    }

    /// Iterates over all slots in grid order.
    #[must_use]
    pub fn slots(&self) -> impl Iterator<Item = &RenderSlot<S>> {
        self.slots.iter()
    }

    /// Total pieces of content displayed across all slots.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.slots.iter().map(|s| s.content.len()).sum()
    }

    /// Removes all content from one slot and redraws it.
    ///
    /// An out-of-range index is logged and ignored. Returns whether a slot
    /// was cleared.
    pub fn clear_slot(&mut self, index: usize) -> bool {
        let slots = self.slots.len();
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("invalid slot index {index}, {slots} slots available; nothing cleared");
            return false;
        };
        slot.clear();
        debug!("cleared slot {index}");
        true
    }

    /// Clears every slot. The cursor is left where it is.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        debug!("cleared all {} slots", self.slots.len());
    }

    /// Places content built by `factory` in the slot under the cursor.
    ///
    /// Returns the slot index that received the content.
    ///
    /// # Errors
    ///
    /// Returns the factory's error; the slot and cursor are left unchanged.
    pub fn assign<F, E>(&mut self, factory: F) -> Result<usize>
    where
        F: FnOnce(&S::Renderer) -> std::result::Result<ContentOf<S>, E>,
        E: Into<RenderError>,
    {
        if self.cursor >= self.slots.len() {
            warn!(
                "cursor {} past {} slots, restarting at slot 0",
                self.cursor,
                self.slots.len()
            );
            self.cursor = 0;
        }
        self.assign_to(self.cursor, factory)
    }

    /// Places content built by `factory` in slot `index`.
    ///
    /// The content is built first; if that fails the slot keeps what it
    /// displayed and the cursor does not move. On success the slot's previous
    /// content is released, the new content added, the slot redrawn with its
    /// camera reset, and the cursor set to the slot after `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSlotIndex`] for an index outside the
    /// grid, or the factory's error. Nothing changes in either case.
    pub fn assign_to<F, E>(&mut self, index: usize, factory: F) -> Result<usize>
    where
        F: FnOnce(&S::Renderer) -> std::result::Result<ContentOf<S>, E>,
        E: Into<RenderError>,
    {
        let slots = self.slots.len();
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("invalid slot index {index}, {slots} slots available; assignment ignored");
            return Err(RenderError::InvalidSlotIndex { index, slots });
        };

        let content = match factory(&slot.renderer) {
            Ok(content) => content,
            Err(e) => {
                let err = e.into();
                warn!("slot {index} left unchanged: {err}");
                return Err(err);
            }
        };

        slot.replace(content);
        self.cursor = (index + 1) % slots;
        info!("content assigned to slot {index}, next slot {}", self.cursor);
        Ok(index)
    }

    /// Adds content built by `factory` to every slot without clearing and
    /// without moving the cursor.
    ///
    /// # Errors
    ///
    /// Returns the first factory error; earlier slots keep what was added.
    pub fn populate_each<F, E>(&mut self, mut factory: F) -> Result<()>
    where
        F: FnMut(&S::Renderer) -> std::result::Result<ContentOf<S>, E>,
        E: Into<RenderError>,
    {
        for slot in &mut self.slots {
            let content = factory(&slot.renderer).map_err(Into::into)?;
            slot.push(content);
        }
        Ok(())
    }

    #[cfg(test)]
    fn force_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }
}
