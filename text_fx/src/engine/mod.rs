// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The compilation and frame-assembly engine: cascading styles, the tag registry,
//! the tag-stack compiler, and the per-frame renderer that turns compiled glyphs
//! into draw records.

// Attach sources.
pub mod builtin_tags;
pub mod compiled_text;
pub mod effect_registry;
pub mod frame_renderer;
pub mod glyph_settings;
pub mod glyph_style;
pub mod inline_attachment;
pub mod legacy_codes;
pub mod tag_stack_compiler;

// Re-export.
pub use compiled_text::*;
pub use effect_registry::*;
pub use frame_renderer::*;
pub use glyph_settings::*;
pub use glyph_style::*;
pub use inline_attachment::*;
pub use legacy_codes::*;
pub use tag_stack_compiler::*;
