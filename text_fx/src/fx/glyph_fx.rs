// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tagged dispatch for the effect function family.
//!
//! A concept-level open registry maps tag names to factories (see
//! [`crate::EffectRegistry`]); the effects themselves are closed variants here, which
//! keeps dispatch monomorphic and the whole family `Copy` + comparable in tests. New
//! effects are added by adding a variant and registering a factory — not by
//! subclassing anything.

use crate::{BounceFx, FadeFx, GlitchFx, GlyphSettings, Millis, NeonFx, PendulumFx,
            ScrollFx, ShakeFx, SwingFx, TurbulenceFx, WaveFx, WiggleFx};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphFx {
    Wave(WaveFx),
    Bounce(BounceFx),
    Shake(ShakeFx),
    Turbulence(TurbulenceFx),
    Wiggle(WiggleFx),
    Glitch(GlitchFx),
    Pendulum(PendulumFx),
    Swing(SwingFx),
    Scroll(ScrollFx),
    Fade(FadeFx),
    Neon(NeonFx),
}

impl GlyphFx {
    /// Apply this effect to a glyph's draw settings for the given timestamp. Expected
    /// to run once per glyph per frame.
    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        match self {
            GlyphFx::Wave(fx) => fx.apply(now, glyph),
            GlyphFx::Bounce(fx) => fx.apply(now, glyph),
            GlyphFx::Shake(fx) => fx.apply(now, glyph),
            GlyphFx::Turbulence(fx) => fx.apply(now, glyph),
            GlyphFx::Wiggle(fx) => fx.apply(now, glyph),
            GlyphFx::Glitch(fx) => fx.apply(now, glyph),
            GlyphFx::Pendulum(fx) => fx.apply(now, glyph),
            GlyphFx::Swing(fx) => fx.apply(now, glyph),
            GlyphFx::Scroll(fx) => fx.apply(now, glyph),
            GlyphFx::Fade(fx) => fx.apply(now, glyph),
            GlyphFx::Neon(fx) => fx.apply(now, glyph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, millis};

    /// Determinism is the family-wide contract: identical inputs, identical outputs,
    /// for every variant.
    #[test]
    fn test_every_variant_is_deterministic() {
        let all: Vec<GlyphFx> = vec![
            GlyphFx::Wave(WaveFx::default()),
            GlyphFx::Bounce(BounceFx::default()),
            GlyphFx::Shake(ShakeFx::default()),
            GlyphFx::Turbulence(TurbulenceFx::default()),
            GlyphFx::Wiggle(WiggleFx::default()),
            GlyphFx::Glitch(GlitchFx::default()),
            GlyphFx::Pendulum(PendulumFx::default()),
            GlyphFx::Swing(SwingFx::default()),
            GlyphFx::Scroll(ScrollFx::default()),
            GlyphFx::Fade(FadeFx::default()),
            GlyphFx::Neon(NeonFx::default()),
        ];

        for fx in all {
            for now_ms in [0u64, 16, 500, 12_345] {
                let mut lhs = GlyphSettings::new('g', 3);
                let mut rhs = GlyphSettings::new('g', 3);
                fx.apply(millis(now_ms), &mut lhs);
                fx.apply(millis(now_ms), &mut rhs);
                assert_eq2!(lhs, rhs, "{fx:?} at {now_ms}ms");
            }
        }
    }
}
