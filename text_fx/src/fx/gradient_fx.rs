// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<grad from=FF0000 to=00FF00 hue f=0 sp=20>` — interpolates a color across a span
//! window, by RGB lerp or around the HSV hue circle, optionally animated over time.
//!
//! Unlike the positional effects this is a *style-level* effect: it replaces the
//! glyph's base color before the positional effects run, and it is excluded from the
//! shadow draw pass (a shadow keeps the glyph's plain shadow color — a rainbow shadow
//! looks broken).
//!
//! `<rainbow>` is this effect in hue mode with a default animation speed.
//!
//! # Caching
//!
//! Evaluating HSV per glyph per frame is avoidable work: the color curve only depends
//! on the spec, not on time or index (those only pick the sample point). So a spec
//! can be baked into a fixed table of [`GRADIENT_TABLE_STEPS`] samples, cached by
//! [`GradientSpec::cache_key`] (see [`crate::RenderContext`]), and sampled per glyph.
//! Keys hash the f32 fields by bit pattern: f32 does not implement `Hash` (NaN != NaN,
//! -0.0 == 0.0 with different bits), and bit-pattern hashing is deterministic, which
//! is all a cache key needs.

use crate::{ColorUtils, FxColor, Millis, TagAttribute, fx_color};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Number of baked samples in a gradient table. 64 steps across a default 20-glyph
/// window leaves no visible banding.
pub const GRADIENT_TABLE_STEPS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSpec {
    pub from: FxColor,
    pub to: FxColor,
    /// Interpolate around the HSV hue circle instead of through RGB. When the full
    /// hue circle is wanted (`<rainbow>`), from/to are ignored.
    pub hue: bool,
    /// Window scroll speed in windows/second; 0 is a static gradient.
    pub anim_speed: f32,
    /// How many glyphs one from→to→from cycle spans.
    pub span_window: f32,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            from: fx_color!(white),
            to: fx_color!(white),
            hue: false,
            anim_speed: 0.0,
            span_window: 20.0,
        }
    }
}

impl GradientSpec {
    pub const MAX_ANIM_SPEED: f32 = 20.0;
    pub const MIN_SPAN_WINDOW: f32 = 1.0;
    pub const MAX_SPAN_WINDOW: f32 = 1_000.0;

    #[must_use]
    pub fn new(
        from: FxColor,
        to: FxColor,
        hue: bool,
        anim_speed: f32,
        span_window: f32,
    ) -> Self {
        Self {
            from,
            to,
            hue,
            anim_speed: anim_speed.clamp(-Self::MAX_ANIM_SPEED, Self::MAX_ANIM_SPEED),
            span_window: span_window.clamp(Self::MIN_SPAN_WINDOW, Self::MAX_SPAN_WINDOW),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.color("from", fx_color!(white)),
            attribute.color("to", fx_color!(white)),
            attribute.bool("hue", false),
            attribute.float("f", 0.0),
            attribute.float("sp", 20.0),
        )
    }

    /// The `<rainbow>` configuration: animated full-circle hue sweep.
    #[must_use]
    pub fn rainbow_from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            fx_color!(red),
            fx_color!(red),
            true,
            attribute.float("f", 0.5),
            attribute.float("sp", 20.0),
        )
    }

    /// Sample position in `[0, 1)` for a glyph at this timestamp.
    #[must_use]
    pub fn phase_at(&self, now: Millis, glyph_index: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let index = glyph_index as f32;
        (index / self.span_window + now.as_secs_f32() * self.anim_speed).rem_euclid(1.0)
    }

    /// The color at a phase in `[0, 1)`. Two-color gradients ping-pong (triangle
    /// wave) so the window tiles without a seam; hue mode sweeps the full circle.
    #[must_use]
    pub fn color_at_phase(&self, phase: f32) -> FxColor {
        let phase = phase.rem_euclid(1.0);
        if self.hue {
            ColorUtils::hsv_to_rgb(phase * 360.0, 1.0, 1.0)
        } else {
            // Triangle: 0 → from, 0.5 → to, 1 → from.
            let t = 1.0 - (2.0 * phase - 1.0).abs();
            ColorUtils::lerp_rgb(self.from, self.to, t)
        }
    }

    /// Direct (uncached) evaluation.
    #[must_use]
    pub fn color_at(&self, now: Millis, glyph_index: usize) -> FxColor {
        self.color_at_phase(self.phase_at(now, glyph_index))
    }

    /// Bake the color curve into a table for cached per-glyph sampling.
    #[must_use]
    pub fn build_table(&self) -> Vec<FxColor> {
        (0..GRADIENT_TABLE_STEPS)
            .map(|step| {
                #[allow(clippy::cast_precision_loss)]
                let phase = step as f32 / GRADIENT_TABLE_STEPS as f32;
                self.color_at_phase(phase)
            })
            .collect()
    }

    /// Nearest-sample lookup into a table produced by [`Self::build_table`].
    #[must_use]
    pub fn sample_table(table: &[FxColor], phase: f32) -> FxColor {
        if table.is_empty() {
            return FxColor::default();
        }
        #[allow(clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss)]
        let index = (phase.rem_euclid(1.0) * table.len() as f32) as usize;
        table[index.min(table.len() - 1)]
    }

    /// Deterministic cache key for the baked table.
    #[must_use]
    pub fn cache_key(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.from.hash(&mut hasher);
        self.to.hash(&mut hasher);
        self.hue.hash(&mut hasher);
        self.anim_speed.to_bits().hash(&mut hasher);
        self.span_window.to_bits().hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_eq2, millis};

    #[test]
    fn test_static_two_color_gradient_is_index_weighted() {
        let spec = GradientSpec::new(
            FxColor::from_rgb(255, 0, 0),
            FxColor::from_rgb(0, 255, 0),
            false,
            0.0,
            20.0,
        );
        let at_0 = spec.color_at(millis(0u64), 0);
        let at_1 = spec.color_at(millis(0u64), 1);
        // Index 0 sits at the red end; index 1 has moved slightly toward green.
        assert_eq2!(at_0, FxColor::from_rgb(255, 0, 0));
        assert!(at_1.green > at_0.green);
        assert!(at_1.red < at_0.red);
    }

    #[test]
    fn test_static_gradient_ignores_time() {
        let spec = GradientSpec::new(
            fx_color!(red),
            fx_color!(blue),
            false,
            0.0,
            20.0,
        );
        assert_eq2!(
            spec.color_at(millis(0u64), 5),
            spec.color_at(millis(99_999u64), 5)
        );
    }

    #[test]
    fn test_animated_gradient_moves_over_time() {
        let spec = GradientSpec::new(
            fx_color!(red),
            fx_color!(blue),
            false,
            1.0,
            20.0,
        );
        assert!(spec.color_at(millis(0u64), 0) != spec.color_at(millis(250u64), 0));
    }

    #[test]
    fn test_hue_mode_sweeps_the_circle() {
        let spec = GradientSpec::new(fx_color!(white), fx_color!(white), true, 0.0, 4.0);
        // Four glyphs across a 4-glyph window: 0°, 90°, 180°, 270°.
        assert_eq2!(spec.color_at(millis(0u64), 0), FxColor::from_rgb(255, 0, 0));
        assert_eq2!(
            spec.color_at(millis(0u64), 2),
            ColorUtils::hsv_to_rgb(180.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_span_window_clamp_avoids_divide_by_zero() {
        let spec = GradientSpec::new(fx_color!(red), fx_color!(blue), false, 0.0, 0.0);
        assert_eq2!(spec.span_window, 1.0);
        let color = spec.color_at(millis(0u64), 3);
        // Must be a real color, not NaN fallout.
        let _unused = color;
    }

    #[test]
    fn test_table_matches_direct_evaluation() {
        let spec = GradientSpec::new(fx_color!(red), fx_color!(green), false, 0.0, 20.0);
        let table = spec.build_table();
        assert_eq2!(table.len(), GRADIENT_TABLE_STEPS);
        // Sampling at exact table phases reproduces direct evaluation.
        for step in [0usize, 16, 32, 63] {
            #[allow(clippy::cast_precision_loss)]
            let phase = step as f32 / GRADIENT_TABLE_STEPS as f32;
            assert_eq2!(
                GradientSpec::sample_table(&table, phase),
                spec.color_at_phase(phase)
            );
        }
    }

    #[test]
    fn test_cache_key_distinguishes_specs() {
        let lhs = GradientSpec::new(fx_color!(red), fx_color!(blue), false, 0.0, 20.0);
        let rhs = GradientSpec::new(fx_color!(red), fx_color!(blue), true, 0.0, 20.0);
        assert!(lhs.cache_key() != rhs.cache_key());
        assert_eq2!(lhs.cache_key(), lhs.cache_key());
    }
}
