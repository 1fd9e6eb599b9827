// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<wiggle a=1 f=1 w=1>` — single-frequency oscillation along a per-codepoint fixed
//! direction, quantized to 30 directions so different letters wiggle along different
//! axes but each letter's axis never changes.

use crate::{GlyphSettings, Millis, TagAttribute};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WiggleFx {
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Default for WiggleFx {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            wavelength: 1.0,
        }
    }
}

impl WiggleFx {
    pub const MAX_AMPLITUDE: f32 = 100.0;
    pub const MAX_FREQUENCY: f32 = 50.0;
    pub const MIN_WAVELENGTH: f32 = 0.001;
    const DIRECTION_SECTORS: u32 = 30;

    #[must_use]
    pub fn new(amplitude: f32, frequency: f32, wavelength: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(0.0, Self::MAX_AMPLITUDE),
            frequency: frequency.clamp(0.0, Self::MAX_FREQUENCY),
            wavelength: wavelength.abs().max(Self::MIN_WAVELENGTH),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.float("a", 1.0),
            attribute.float("f", 1.0),
            attribute.float("w", 1.0),
        )
    }

    /// The fixed direction for a codepoint, one of 30 sectors around the circle.
    #[must_use]
    pub fn direction_for(codepoint: char) -> f32 {
        let sector = (codepoint as u32).wrapping_mul(2_654_435_761) %
            Self::DIRECTION_SECTORS;
        #[allow(clippy::cast_precision_loss)]
        let it = sector as f32 / Self::DIRECTION_SECTORS as f32 * TAU;
        it
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        let direction = Self::direction_for(glyph.codepoint);
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 / self.wavelength;
        let displacement = (t * self.frequency * TAU + phase).sin() * self.amplitude;
        glyph.x_offset += direction.cos() * displacement;
        glyph.y_offset += direction.sin() * displacement;
    }
}
