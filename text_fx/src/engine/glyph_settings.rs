// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The per-glyph, per-frame draw record.
//!
//! Freshly constructed from the compiled style for every glyph on every frame,
//! mutated by the active effects, handed to the host renderer, then discarded. The
//! host interprets offsets/rotation/scale relative to its own layout position for the
//! glyph.

use crate::FxColor;
use smallvec::SmallVec;

pub(crate) mod sizing {
    use super::{GlyphSettings, SmallVec};

    /// Most glyphs have no siblings; glitch slicing has 2, neon has `passes` (spills).
    pub(crate) type VecSiblings = SmallVec<[GlyphSettings; MAX_INLINE_SIBLINGS]>;
    const MAX_INLINE_SIBLINGS: usize = 2;
}

/// Which half of a sliced glyph a sibling renders (glitch effect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceHalf {
    Top,
    Bottom,
}

/// Draw parameters for one glyph (or one sibling copy of it).
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSettings {
    pub codepoint: char,
    /// Logical index of the glyph within its compiled text.
    pub glyph_index: usize,
    pub color: FxColor,
    pub x_offset: f32,
    pub y_offset: f32,
    pub rotation_degrees: f32,
    pub scale: f32,
    /// Alpha multiplier in `[0, 1]`, applied on top of `color.alpha` by the host.
    /// Typewriter gating forces this to 0 for unrevealed glyphs (shadow included).
    pub alpha: f32,
    /// Whether the host should render a drop shadow for this glyph.
    pub shadow: bool,
    /// Set on siblings emitted by the glitch slicing path.
    pub slice: Option<SliceHalf>,
    /// Extra copies of this glyph to draw (neon halo passes, glitch slices).
    /// Siblings are terminal: effects are never applied to them recursively.
    pub siblings: Box<sizing::VecSiblings>,
}

impl GlyphSettings {
    #[must_use]
    pub fn new(codepoint: char, glyph_index: usize) -> Self {
        Self {
            codepoint,
            glyph_index,
            color: FxColor::default(),
            x_offset: 0.0,
            y_offset: 0.0,
            rotation_degrees: 0.0,
            scale: 1.0,
            alpha: 1.0,
            shadow: false,
            slice: None,
            siblings: Box::new(sizing::VecSiblings::new()),
        }
    }

    /// Clone the draw state of this glyph for use as a sibling: same codepoint,
    /// color, offsets — but no siblings of its own (siblings are terminal).
    #[must_use]
    pub fn to_sibling(&self) -> GlyphSettings {
        let mut it = self.clone();
        it.siblings = Box::new(sizing::VecSiblings::new());
        it
    }

    /// Force the glyph (and any siblings already emitted) fully transparent. Used by
    /// typewriter gating; kills the shadow too.
    pub fn force_invisible(&mut self) {
        self.alpha = 0.0;
        for sibling in self.siblings.iter_mut() {
            sibling.alpha = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_sibling_is_terminal() {
        let mut glyph = GlyphSettings::new('x', 0);
        glyph.siblings.push(glyph.to_sibling());
        let sibling = glyph.to_sibling();
        assert!(sibling.siblings.is_empty());
    }

    #[test]
    fn test_force_invisible_covers_siblings() {
        let mut glyph = GlyphSettings::new('x', 0);
        glyph.siblings.push(glyph.to_sibling());
        glyph.force_invisible();
        assert_eq2!(glyph.alpha, 0.0);
        assert_eq2!(glyph.siblings[0].alpha, 0.0);
    }
}
