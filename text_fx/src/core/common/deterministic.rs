// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Deterministic per-glyph pseudo-randomness.
//!
//! Effects that look random (shake, glitch) must still be pure functions of elapsed
//! time and glyph identity, so that two renders of the same message at the same
//! timestamp are pixel-identical. The "randomness" here is a [`rustc_hash::FxHasher`]
//! over a seed combining:
//!
//! - the elapsed time coarsened to a step (so a glyph keeps one jitter direction for a
//!   little while instead of vibrating every frame),
//! - the glyph's logical index,
//! - the glyph's codepoint,
//! - a per-call-site salt (so e.g. the jitter roll and the blink roll of the same
//!   glyph in the same step are independent).

use crate::Millis;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Coarsen elapsed time into discrete steps of `step_ms` milliseconds. The step length
/// is floored at 1 ms so a runaway frequency parameter can never divide by zero.
#[must_use]
pub fn time_step(now: Millis, step_ms: f32) -> u64 {
    let step_ms = step_ms.max(1.0) as f64;
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let it = (now.as_u64() as f64 / step_ms) as u64;
    it
}

/// Deterministic hash random in `[0, 1)`.
#[must_use]
pub fn pseudo_unit(step: u64, glyph_index: usize, codepoint: char, salt: u32) -> f32 {
    let mut hasher = FxHasher::default();
    step.hash(&mut hasher);
    glyph_index.hash(&mut hasher);
    (codepoint as u32).hash(&mut hasher);
    salt.hash(&mut hasher);
    let bits = hasher.finish();
    // Use the top 24 bits for a clean mantissa-sized value.
    #[allow(clippy::cast_precision_loss)]
    let it = (bits >> 40) as f32 / (1u64 << 24) as f32;
    it
}

/// Deterministic hash random in `[-1, 1)`.
#[must_use]
pub fn pseudo_signed(step: u64, glyph_index: usize, codepoint: char, salt: u32) -> f32 {
    pseudo_unit(step, glyph_index, codepoint, salt) * 2.0 - 1.0
}
