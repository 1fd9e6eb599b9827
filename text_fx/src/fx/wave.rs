// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<wave a=1 f=1 w=1>` — vertical sinusoid, phase offset by glyph index.

use crate::{GlyphSettings, Millis, TagAttribute};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveFx {
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Default for WaveFx {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            wavelength: 1.0,
        }
    }
}

impl WaveFx {
    pub const MAX_AMPLITUDE: f32 = 100.0;
    pub const MAX_FREQUENCY: f32 = 50.0;
    /// Wavelength divides the glyph index to produce the phase, so it is floored away
    /// from zero.
    pub const MIN_WAVELENGTH: f32 = 0.001;

    #[must_use]
    pub fn new(amplitude: f32, frequency: f32, wavelength: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(-Self::MAX_AMPLITUDE, Self::MAX_AMPLITUDE),
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

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 / self.wavelength;
        glyph.y_offset += (t * self.frequency * TAU - phase).sin() * self.amplitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, millis};
    use test_case::test_case;

    #[test]
    fn test_defaults_from_empty_tag() {
        let fx = WaveFx::from_tag(&TagAttribute::new("wave"));
        assert_eq2!(fx, WaveFx::default());
    }

    #[test]
    fn test_bad_attribute_falls_back_to_default() {
        let attribute = TagAttribute::new("wave").with_param("a", "huge");
        let fx = WaveFx::from_tag(&attribute);
        assert_eq2!(fx.amplitude, 1.0);
    }

    #[test_case(99_999.0, 100.0; "amplitude clamps high")]
    #[test_case(-99_999.0, -100.0; "amplitude clamps low")]
    fn test_amplitude_clamp(input: f32, expected: f32) {
        assert_eq2!(WaveFx::new(input, 1.0, 1.0).amplitude, expected);
    }

    #[test]
    fn test_zero_wavelength_does_not_divide_by_zero() {
        let fx = WaveFx::new(1.0, 1.0, 0.0);
        let mut glyph = GlyphSettings::new('x', 5);
        fx.apply(millis(100u64), &mut glyph);
        assert!(glyph.y_offset.is_finite());
    }

    #[test]
    fn test_phase_varies_with_index() {
        let fx = WaveFx::default();
        let mut glyph_0 = GlyphSettings::new('x', 0);
        let mut glyph_1 = GlyphSettings::new('x', 1);
        fx.apply(millis(100u64), &mut glyph_0);
        fx.apply(millis(100u64), &mut glyph_1);
        assert!(glyph_0.y_offset != glyph_1.y_offset);
    }

    #[test]
    fn test_amplitude_two_bounds_offset() {
        let fx = WaveFx::new(2.0, 1.0, 1.0);
        for now_ms in [0u64, 100, 250, 900, 1_234] {
            let mut glyph = GlyphSettings::new('x', 0);
            fx.apply(millis(now_ms), &mut glyph);
            assert!(glyph.y_offset.abs() <= 2.0 + f32::EPSILON);
        }
    }
}
