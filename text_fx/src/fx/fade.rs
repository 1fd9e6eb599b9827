// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<fade a=.3 f=1 w=0>` — alpha oscillates between a minimum and 1 via sine. `a` is
//! the minimum alpha (the dimmest the glyph gets), `w` staggers the phase per glyph.

use crate::{GlyphSettings, Millis, TagAttribute};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeFx {
    pub min_alpha: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Default for FadeFx {
    fn default() -> Self {
        Self {
            min_alpha: 0.3,
            frequency: 1.0,
            wavelength: 0.0,
        }
    }
}

impl FadeFx {
    pub const MAX_FREQUENCY: f32 = 50.0;

    #[must_use]
    pub fn new(min_alpha: f32, frequency: f32, wavelength: f32) -> Self {
        Self {
            min_alpha: min_alpha.clamp(0.0, 1.0),
            frequency: frequency.clamp(0.0, Self::MAX_FREQUENCY),
            wavelength: wavelength.clamp(0.0, 100.0),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.float("a", 0.3),
            attribute.float("f", 1.0),
            attribute.float("w", 0.0),
        )
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 * self.wavelength;
        let wave = (t * self.frequency * TAU + phase).sin() * 0.5 + 0.5;
        let factor = self.min_alpha + (1.0 - self.min_alpha) * wave;
        glyph.alpha *= factor;
    }
}
