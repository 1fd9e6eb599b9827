// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<shake a=1 f=1>` — discrete jitter in a pseudo-random unit-circle direction,
//! re-rolled on a time step.

use crate::{GlyphSettings, Millis, TagAttribute, pseudo_unit, time_step};
use std::f32::consts::TAU;

const SALT_SHAKE_ANGLE: u32 = 0x5a4e;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeFx {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for ShakeFx {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            frequency: 1.0,
        }
    }
}

impl ShakeFx {
    pub const MAX_AMPLITUDE: f32 = 100.0;
    pub const MAX_FREQUENCY: f32 = 50.0;
    /// Base duration of one jitter direction at frequency 1.
    const BASE_STEP_MS: f32 = 50.0;

    #[must_use]
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude: amplitude.clamp(0.0, Self::MAX_AMPLITUDE),
            frequency: frequency.clamp(0.01, Self::MAX_FREQUENCY),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(attribute.float("a", 1.0), attribute.float("f", 1.0))
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let step = time_step(now, Self::BASE_STEP_MS / self.frequency);
        let angle = pseudo_unit(step, glyph.glyph_index, glyph.codepoint,
                                SALT_SHAKE_ANGLE)
            * TAU;
        glyph.x_offset += angle.cos() * self.amplitude;
        glyph.y_offset += angle.sin() * self.amplitude;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, millis};

    #[test]
    fn test_offset_stays_on_unit_circle_scaled() {
        let fx = ShakeFx::new(2.0, 1.0);
        let mut glyph = GlyphSettings::new('x', 1);
        fx.apply(millis(123u64), &mut glyph);
        let radius = glyph.x_offset.hypot(glyph.y_offset);
        assert!((radius - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_direction_stable_within_a_step() {
        let fx = ShakeFx::default();
        // 50ms step at frequency 1: 0 and 30 are in the same step.
        let mut lhs = GlyphSettings::new('x', 1);
        let mut rhs = GlyphSettings::new('x', 1);
        fx.apply(millis(0u64), &mut lhs);
        fx.apply(millis(30u64), &mut rhs);
        assert_eq2!(lhs, rhs);
    }

    #[test]
    fn test_direction_rerolls_across_steps() {
        let fx = ShakeFx::default();
        let mut offsets = Vec::new();
        for step_index in 0u64..8 {
            let mut glyph = GlyphSettings::new('x', 1);
            fx.apply(millis(step_index * 50), &mut glyph);
            offsets.push((glyph.x_offset, glyph.y_offset));
        }
        let all_same = offsets.windows(2).all(|w| w[0] == w[1]);
        assert!(!all_same);
    }

    #[test]
    fn test_glyph_identity_decorrelates_direction() {
        let fx = ShakeFx::default();
        let mut lhs = GlyphSettings::new('x', 1);
        let mut rhs = GlyphSettings::new('x', 2);
        fx.apply(millis(0u64), &mut lhs);
        fx.apply(millis(0u64), &mut rhs);
        assert!(lhs.x_offset != rhs.x_offset || lhs.y_offset != rhs.y_offset);
    }
}
