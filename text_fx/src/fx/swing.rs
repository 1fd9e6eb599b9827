// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<swing a=1 f=1 w=0>` — additive sinusoidal rotation; a gentler sibling of
//! [`crate::PendulumFx`] meant to be stacked with positional effects.

use crate::{GlyphSettings, Millis, TagAttribute};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingFx {
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Default for SwingFx {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            wavelength: 0.0,
        }
    }
}

impl SwingFx {
    pub const MAX_AMPLITUDE: f32 = 20.0;
    pub const MAX_FREQUENCY: f32 = 50.0;
    /// Degrees of rotation per unit of amplitude.
    const BASE_DEGREES: f32 = 4.0;

    #[must_use]
    pub fn new(amplitude: f32, frequency: f32, wavelength: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(0.0, Self::MAX_AMPLITUDE),
            frequency: frequency.clamp(0.0, Self::MAX_FREQUENCY),
            // Zero wavelength is meaningful here: all glyphs swing in unison.
            wavelength: wavelength.clamp(0.0, 100.0),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.float("a", 1.0),
            attribute.float("f", 1.0),
            attribute.float("w", 0.0),
        )
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 * self.wavelength;
        glyph.rotation_degrees += (t * self.frequency * TAU + phase).sin()
            * self.amplitude
            * Self::BASE_DEGREES;
    }
}
