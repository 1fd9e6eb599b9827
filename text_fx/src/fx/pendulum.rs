// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<pendulum a=30 f=1 r=0>` (alias `pend`) — sinusoidal rotation up to ± the max
//! angle, with an optional circular-arc translation when the radius is non-zero (the
//! glyph swings from an imaginary pivot above it instead of rotating in place).

use crate::{GlyphSettings, Millis, TagAttribute};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumFx {
    /// Maximum swing angle in degrees.
    pub max_angle: f32,
    pub frequency: f32,
    /// Pivot radius; 0 rotates in place.
    pub radius: f32,
}

impl Default for PendulumFx {
    fn default() -> Self {
        Self {
            max_angle: 30.0,
            frequency: 1.0,
            radius: 0.0,
        }
    }
}

impl PendulumFx {
    pub const MAX_ANGLE: f32 = 180.0;
    pub const MAX_FREQUENCY: f32 = 50.0;
    pub const MAX_RADIUS: f32 = 100.0;

    #[must_use]
    pub fn new(max_angle: f32, frequency: f32, radius: f32) -> Self {
        Self {
            max_angle: max_angle.clamp(-Self::MAX_ANGLE, Self::MAX_ANGLE),
            frequency: frequency.clamp(0.0, Self::MAX_FREQUENCY),
            radius: radius.clamp(0.0, Self::MAX_RADIUS),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.float("a", 30.0),
            attribute.float("f", 1.0),
            attribute.float("r", 0.0),
        )
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        #[allow(clippy::cast_precision_loss)]
        let phase = glyph.glyph_index as f32 * 0.3;
        let angle_degrees = (t * self.frequency * TAU + phase).sin() * self.max_angle;
        glyph.rotation_degrees += angle_degrees;

        if self.radius > 0.0 {
            let angle = angle_degrees.to_radians();
            glyph.x_offset += angle.sin() * self.radius;
            glyph.y_offset += (1.0 - angle.cos()) * self.radius;
        }
    }
}
