// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<neon p=10 r=2 a=.12>` — fakes a glow by emitting `p` sibling copies of the glyph
//! around a circle of radius `r`, each at a fraction of the primary's alpha. Cheap
//! bloom without a shader.

use crate::{GlyphSettings, Millis, TagAttribute};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeonFx {
    /// Number of halo passes (sibling copies).
    pub passes: u32,
    pub radius: f32,
    /// Alpha multiplier for each halo copy.
    pub halo_alpha: f32,
}

impl Default for NeonFx {
    fn default() -> Self {
        Self {
            passes: 10,
            radius: 2.0,
            halo_alpha: 0.12,
        }
    }
}

impl NeonFx {
    /// Fewer than 4 passes reads as diagonal smearing, not a glow.
    pub const MIN_PASSES: u32 = 4;
    pub const MAX_PASSES: u32 = 64;
    pub const MAX_RADIUS: f32 = 50.0;

    #[must_use]
    pub fn new(passes: i32, radius: f32, halo_alpha: f32) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let passes = passes.max(0) as u32;
        Self {
            passes: passes.clamp(Self::MIN_PASSES, Self::MAX_PASSES),
            radius: radius.clamp(0.0, Self::MAX_RADIUS),
            halo_alpha: halo_alpha.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.int("p", 10),
            attribute.float("r", 2.0),
            attribute.float("a", 0.12),
        )
    }

    pub fn apply(&self, _now: Millis, glyph: &mut GlyphSettings) {
        #[allow(clippy::cast_precision_loss)]
        let passes_f = self.passes as f32;
        for pass in 0..self.passes {
            #[allow(clippy::cast_precision_loss)]
            let angle = pass as f32 / passes_f * TAU;
            let mut halo = glyph.to_sibling();
            halo.x_offset += angle.cos() * self.radius;
            halo.y_offset += angle.sin() * self.radius;
            halo.alpha *= self.halo_alpha;
            // The halo never casts its own shadow.
            halo.shadow = false;
            glyph.siblings.push(halo);
        }
    }
}
