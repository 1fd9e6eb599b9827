// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Host-owned switches sampled (not owned) by this core, plus the layout constants
//! the ordinal math needs.

use serde::{Deserialize, Serialize};

/// Global animation switches. The host owns the real settings (config screen, user
/// toggle); it pushes the current values into the [`crate::RenderContext`] and the
/// renderer samples them once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxConfig {
    /// When off: per-glyph effects and gradient animation are skipped entirely
    /// (static colors still apply).
    pub animations_enabled: bool,
    /// When off: typewriter tracks never hide anything, all text is fully revealed.
    pub typewriter_gating_enabled: bool,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            typewriter_gating_enabled: true,
        }
    }
}

/// Layout constants the host's font metrics imply. Used only for visual ordinal
/// estimation, never for actual layout (which stays host-side).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub avg_char_width: f32,
    pub line_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            avg_char_width: 6.0,
            line_height: 9.0,
        }
    }
}
