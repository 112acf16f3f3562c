//! Fixed 256-slot glyph memo table indexed by 8-bit character code.

use crate::glyph::Glyph;

/// Number of slots: one per 8-bit code.
pub const GLYPH_CACHE_SIZE: usize = 256;

/// Cache state for one character code.
#[derive(Debug)]
pub enum GlyphSlot<G> {
    /// Never requested.
    Unresolved,
    /// Requested; no renderable glyph. Never retried.
    Absent,
    /// Requested and built.
    Present(Glyph<G>),
}

impl<G> GlyphSlot<G> {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, GlyphSlot::Unresolved)
    }

    pub fn glyph(&self) -> Option<&Glyph<G>> {
        match self {
            GlyphSlot::Present(glyph) => Some(glyph),
            _ => None,
        }
    }
}

/// At-most-once glyph construction per code.
pub struct GlyphCache<G> {
    slots: Box<[GlyphSlot<G>; GLYPH_CACHE_SIZE]>,
}

impl<G> GlyphCache<G> {
    pub fn new() -> Self {
        Self {
            slots: Box::new(std::array::from_fn(|_| GlyphSlot::Unresolved)),
        }
    }

    /// Return the glyph for `code`, running `build` only if the slot has
    /// never been resolved. A `None` from `build` is cached as absent.
    pub fn get_or_build<F>(&mut self, code: u8, build: F) -> Option<&Glyph<G>>
    where
        F: FnOnce() -> Option<Glyph<G>>,
    {
        let slot = &mut self.slots[code as usize];
        if !slot.is_resolved() {
            *slot = match build() {
                Some(glyph) => GlyphSlot::Present(glyph),
                None => GlyphSlot::Absent,
            };
        }
        slot.glyph()
    }

    pub fn slot(&self, code: u8) -> &GlyphSlot<G> {
        &self.slots[code as usize]
    }

    /// Number of codes that have been resolved, present or absent.
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_resolved()).count()
    }

    /// Number of codes with a built glyph.
    pub fn present_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, GlyphSlot::Present(_)))
            .count()
    }
}

impl<G> Default for GlyphCache<G> {
    fn default() -> Self {
        Self::new()
    }
}
