// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<glitch f=1 j=.015 b=.003 s=.08>` — probabilistic per-step jitter, alpha blink,
//! and horizontal "slicing" that splits the glyph into top/bottom sibling halves with
//! independent offset, alpha and color tint.
//!
//! All three sub-effects roll independently per time step (salted hashes), so a glyph
//! can jitter and slice in the same step. The slice path replaces the primary glyph
//! (its alpha drops to 0) with two sibling halves; siblings inherit the primary's
//! shadow flag so a shadowed glyph glitches with its shadow.

use crate::{FxColor, GlyphSettings, Millis, SliceHalf, TagAttribute, pseudo_signed,
            pseudo_unit, time_step};

const SALT_JITTER_ROLL: u32 = 0x611c_0001;
const SALT_JITTER_X: u32 = 0x611c_0002;
const SALT_JITTER_Y: u32 = 0x611c_0003;
const SALT_BLINK_ROLL: u32 = 0x611c_0004;
const SALT_SLICE_ROLL: u32 = 0x611c_0005;
const SALT_SLICE_SHIFT: u32 = 0x611c_0006;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlitchFx {
    pub frequency: f32,
    /// Probability per step of a positional jitter.
    pub jitter_chance: f32,
    /// Probability per step of an alpha blink.
    pub blink_chance: f32,
    /// Probability per step of the top/bottom slice.
    pub slice_chance: f32,
}

impl Default for GlitchFx {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            jitter_chance: 0.015,
            blink_chance: 0.003,
            slice_chance: 0.08,
        }
    }
}

impl GlitchFx {
    pub const MAX_FREQUENCY: f32 = 50.0;
    /// Base duration of one glitch step at frequency 1.
    const BASE_STEP_MS: f32 = 40.0;
    /// How dim a blinked glyph gets.
    const BLINK_ALPHA: f32 = 0.15;
    /// Chromatic tints for the two slice halves (classic RGB-split look).
    const TOP_TINT: FxColor = FxColor::from_rgb(255, 64, 64);
    const BOTTOM_TINT: FxColor = FxColor::from_rgb(64, 224, 255);

    #[must_use]
    pub fn new(
        frequency: f32,
        jitter_chance: f32,
        blink_chance: f32,
        slice_chance: f32,
    ) -> Self {
        Self {
            frequency: frequency.clamp(0.01, Self::MAX_FREQUENCY),
            jitter_chance: jitter_chance.clamp(0.0, 1.0),
            blink_chance: blink_chance.clamp(0.0, 1.0),
            slice_chance: slice_chance.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(
            attribute.float("f", 1.0),
            attribute.float("j", 0.015),
            attribute.float("b", 0.003),
            attribute.float("s", 0.08),
        )
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let step = time_step(now, Self::BASE_STEP_MS / self.frequency);
        let index = glyph.glyph_index;
        let codepoint = glyph.codepoint;

        if pseudo_unit(step, index, codepoint, SALT_JITTER_ROLL) < self.jitter_chance {
            glyph.x_offset +=
                pseudo_signed(step, index, codepoint, SALT_JITTER_X) * 1.5;
            glyph.y_offset +=
                pseudo_signed(step, index, codepoint, SALT_JITTER_Y) * 0.5;
        }

        if pseudo_unit(step, index, codepoint, SALT_BLINK_ROLL) < self.blink_chance {
            glyph.alpha *= Self::BLINK_ALPHA;
        }

        if pseudo_unit(step, index, codepoint, SALT_SLICE_ROLL) < self.slice_chance {
            self.slice(step, glyph);
        }
    }

    /// Replace the primary glyph with two horizontally-shifted half copies.
    fn slice(&self, step: u64, glyph: &mut GlyphSettings) {
        let shift = 0.5
            + pseudo_unit(step, glyph.glyph_index, glyph.codepoint, SALT_SLICE_SHIFT)
                * 1.0;

        let mut top = glyph.to_sibling();
        top.slice = Some(SliceHalf::Top);
        top.x_offset += shift;
        top.alpha *= 0.9;
        top.color = tint_helper::blend_tint(top.color, Self::TOP_TINT);

        let mut bottom = glyph.to_sibling();
        bottom.slice = Some(SliceHalf::Bottom);
        bottom.x_offset -= shift;
        bottom.alpha *= 0.9;
        bottom.color = tint_helper::blend_tint(bottom.color, Self::BOTTOM_TINT);

        glyph.siblings.push(top);
        glyph.siblings.push(bottom);
        // The halves replace the whole.
        glyph.alpha = 0.0;
    }
}

mod tint_helper {
    use super::FxColor;
    use crate::ColorUtils;

    /// A light chromatic tint: 35% toward the tint color, alpha preserved.
    pub fn blend_tint(base: FxColor, tint: FxColor) -> FxColor {
        ColorUtils::lerp_rgb(base, tint, 0.35).with_alpha(base.alpha)
    }
}
