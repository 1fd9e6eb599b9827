// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `<scroll f=1>` — monotonic looping horizontal offset with no per-character
//! variance (the whole span slides as a unit and wraps every 40 units).

use crate::{GlyphSettings, Millis, TagAttribute};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFx {
    pub frequency: f32,
}

impl Default for ScrollFx {
    fn default() -> Self { Self { frequency: 1.0 } }
}

impl ScrollFx {
    pub const MAX_FREQUENCY: f32 = 50.0;
    /// The loop period in layout units.
    pub const PERIOD: f32 = 40.0;
    /// Units scrolled per second at frequency 1.
    const UNITS_PER_SEC: f32 = 20.0;

    #[must_use]
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency: frequency.clamp(0.0, Self::MAX_FREQUENCY),
        }
    }

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        Self::new(attribute.float("f", 1.0))
    }

    pub fn apply(&self, now: Millis, glyph: &mut GlyphSettings) {
        let t = now.as_secs_f32();
        glyph.x_offset +=
            (t * self.frequency * Self::UNITS_PER_SEC).rem_euclid(Self::PERIOD);
    }
}
