// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<turbulence a=1 f=1>` (alias `turb`) — smooth dual-frequency drift in X and Y,
//! phase derived from glyph index and codepoint.

use crate::{GlyphSettings, Millis, TagAttribute};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbulenceFx {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for TurbulenceFx {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
        }
    }
}

impl TurbulenceFx {
    pub const MAX_AMPLITUDE: f32 = 100.0;
    pub const MAX_FREQUENCY: f32 = 50.0;

    #[must_use]
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(0.0, Self::MAX_AMPLITUDE),
            frequency: frequency.clamp(0.0, Self::MAX_FREQUENCY),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(attribute.float("a", 1.0), attribute.float("f", 1.0))
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32() * self.frequency;
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 * 0.7
            + (glyph.codepoint as u32 % 32) as f32 * 0.35;

        // Two incommensurate frequencies per axis give a smooth, non-repeating drift.
        let x = (t * 2.1 + phase).sin() + 0.5 * (t * 3.7 + phase * 1.3).sin();
        let y = (t * 1.7 + phase * 0.8).cos() + 0.5 * (t * 2.9 + phase * 1.7).sin();

        // Normalize the 1.5 peak of the summed sinusoids back to the amplitude.
        glyph.x_offset += x * self.amplitude / 1.5;
        glyph.y_offset += y * self.amplitude / 1.5;
    }
}
