// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<bounce a=1 f=1 w=1>` — three-phase vertical bounce: rise, bounce-out (four
//! sub-bounces), rest. Offsets are negative (up, in screen coordinates).

use crate::{GlyphSettings, Millis, TagAttribute};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceFx {
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Default for BounceFx {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
            wavelength: 1.0,
        }
    }
}

/// The classic ease-out-bounce curve (four decaying sub-bounces). Input and output in
/// `[0, 1]`; 1.0 means "settled on the ground".
#[must_use]
pub fn ease_out_bounce(x: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    let x = x.clamp(0.0, 1.0);

    if x < 1.0 / D1 {
        N1 * x * x
    } else if x < 2.0 / D1 {
        let x = x - 1.5 / D1;
        N1 * x * x + 0.75
    } else if x < 2.5 / D1 {
        let x = x - 2.25 / D1;
        N1 * x * x + 0.9375
    } else {
        let x = x - 2.625 / D1;
        N1 * x * x + 0.984375
    }
}

impl BounceFx {
    pub const MAX_AMPLITUDE: f32 = 100.0;
    pub const MAX_FREQUENCY: f32 = 20.0;
    pub const MIN_WAVELENGTH: f32 = 0.001;

    /// Fractions of one cycle spent in each phase.
    const RISE_END: f32 = 0.25;
    const BOUNCE_END: f32 = 0.8;

    #[must_use]
    pub fn new(amplitude: f32, frequency: f32, wavelength: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(0.0, Self::MAX_AMPLITUDE),
            frequency: frequency.clamp(0.01, Self::MAX_FREQUENCY),
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

    /// Height above ground in `[0, 1]` at cycle progress `p` in `[0, 1)`.
    fn height_at(p: f32) -> f32 {
        if p < Self::RISE_END {
            // Rise: smooth ease up to the apex.
            let q = p / Self::RISE_END;
            q * q * (3.0 - 2.0 * q)
        } else if p < Self::BOUNCE_END {
            // Fall and bounce: ease-out-bounce approaches the ground (1.0 = settled),
            // so height is its complement.
            let q = (p - Self::RISE_END) / (Self::BOUNCE_END - Self::RISE_END);
            1.0 - ease_out_bounce(q)
        } else {
            // Rest.
            0.0
        }
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 / self.wavelength * 0.1;
        let p = (t * self.frequency + phase).rem_euclid(1.0);
        glyph.y_offset -= Self::height_at(p) * self.amplitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, millis};

    #[test]
    fn test_ease_out_bounce_endpoints() {
        assert_eq2!(ease_out_bounce(0.0), 0.0);
        assert!((ease_out_bounce(1.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ease_out_bounce_touches_ground_between_sub_bounces() {
        // The curve has local maxima (= ground contacts) near these inputs.
        for x in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75] {
            assert!(ease_out_bounce(x) > 0.98);
        }
    }

    #[test]
    fn test_offset_is_never_below_ground() {
        let fx = BounceFx::default();
        for now_ms in (0u64..2_000).step_by(37) {
            let mut glyph = GlyphSettings::new('x', 2);
            fx.apply(millis(now_ms), &mut glyph);
            // Negative offset = up. The glyph never goes below its rest position.
            assert!(glyph.y_offset <= 0.0);
            assert!(glyph.y_offset >= -1.0 - f32::EPSILON);
        }
    }

    #[test]
    fn test_rest_phase_has_zero_offset() {
        // Progress 0.9 (with index 0 and frequency 1) is inside the rest phase.
        let fx = BounceFx::default();
        let mut glyph = GlyphSettings::new('x', 0);
        fx.apply(millis(900u64), &mut glyph);
        assert_eq2!(glyph.y_offset, 0.0);
    }

    #[test]
    fn test_param_clamps() {
        let fx = BounceFx::new(-5.0, 0.0, 0.0);
        assert_eq2!(fx.amplitude, 0.0);
        assert_eq2!(fx.frequency, 0.01);
        assert_eq2!(fx.wavelength, BounceFx::MIN_WAVELENGTH);
    }
}
