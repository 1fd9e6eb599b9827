// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The per-glyph visual effect function library.
//!
//! Every effect here is a pure function of `(elapsed time, glyph index, glyph
//! codepoint, parameters)` applied to a mutable [`crate::GlyphSettings`]. There are no
//! hidden counters: two renders of the same message at the same timestamp are
//! pixel-identical, and any per-character pseudo-randomness derives from
//! [`crate::pseudo_unit`] over a coarsened time step.
//!
//! Parameters are clamped to documented bounds at construction time, never rejected —
//! a hostile `<wave a=99999>` renders something sane instead of erroring.

// Attach sources.
pub mod bounce;
pub mod fade;
pub mod glitch;
pub mod glyph_fx;
pub mod gradient_fx;
pub mod neon;
pub mod pendulum;
pub mod scroll;
pub mod shake;
pub mod swing;
pub mod turbulence;
pub mod wave;
pub mod wiggle;

// Re-export.
pub use bounce::*;
pub use fade::*;
pub use glitch::*;
pub use glyph_fx::*;
pub use gradient_fx::*;
pub use neon::*;
pub use pendulum::*;
pub use scroll::*;
pub use shake::*;
pub use swing::*;
pub use turbulence::*;
pub use wave::*;
pub use wiggle::*;
