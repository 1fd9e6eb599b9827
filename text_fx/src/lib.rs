// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words typewriter glyph glyphs lolcat

//! # Animated inline rich text, compiled from compact tag markup
//!
//! This crate turns author-friendly markup like
//!
//! ```text
//! <grad from=FF0000 to=00FF00><wave a=2>Hello</wave></grad> <typewriter s=30>world</typewriter>
//! ```
//!
//! into an ordered sequence of per-glyph draw records — color, x/y offset, rotation,
//! scale, alpha, optional sibling copies — that a host renderer draws every frame. The
//! host brings its own font metrics and pixel drawing; this crate owns everything in
//! between:
//!
//! 1. **Tokenizer** — one pass over the markup string, producing plain text plus a flat
//!    list of positioned open/close instructions. Malformed markup degrades to literal
//!    text, never an error. See [`tokenize`].
//! 2. **Tag-stack compiler** — walks the plain text with an explicit stack of open tags,
//!    producing a cascading style per glyph. Improperly nested closes are tolerated.
//!    See [`compile_markup`] and [`CompiledText`].
//! 3. **Effect registry** — maps tag names (and aliases) to factories that decode
//!    attributes leniently and produce style mutations and per-glyph effects. Open for
//!    extension via [`EffectRegistry::register`].
//! 4. **Per-glyph effect functions** — a library of pure, deterministic time-driven
//!    transforms: [`wave`](GlyphFx::Wave), [`shake`](GlyphFx::Shake),
//!    [`glitch`](GlyphFx::Glitch), [`neon`](GlyphFx::Neon),
//!    [`gradient`](GradientSpec), and friends. Two renders of the same text at the same
//!    timestamp are pixel-identical.
//! 5. **Typewriter reveal engine** — progressive character/word reveal per independent
//!    track, keyed to host visibility events (tooltip shown, screen opened) through the
//!    [`ViewStateTracker`], with reveal order derived from *visual* (line, column)
//!    position so multi-line text always reveals top-to-bottom.
//!
//! # Quick start
//!
//! ```
//! use r3bl_text_fx::{DrawPass, EffectRegistry, FrameParams, FrameRenderer,
//!                    RenderContext, compile_markup, millis};
//!
//! let registry = EffectRegistry::with_builtin_tags();
//! let ctx = RenderContext::new();
//! let compiled = compile_markup("<wave a=2>Hi</wave>", &registry, &ctx);
//! assert_eq!(compiled.plain_text(), "Hi");
//!
//! let renderer = FrameRenderer::new(&compiled, &ctx, FrameParams {
//!     now: millis(16u64),
//!     pass: DrawPass::Main,
//!     context_id: None,
//! });
//! let glyphs = renderer.render_all();
//! assert_eq!(glyphs.len(), 2);
//! ```
//!
//! # Determinism contract
//!
//! Every effect is a pure function of `(elapsed time, glyph index, glyph codepoint,
//! parameters)`. The only "randomness" is a hash over those inputs. The host supplies
//! the clock ([`Millis`]) on every call; nothing in this crate reads a system clock,
//! which makes the whole pipeline trivially testable with a fake clock.
//!
//! # Error philosophy
//!
//! Markup is user/content authored and must never crash rendering. The compiler returns
//! diagnostics as data ([`CompileDiagnostic`]) instead of failing; attribute values
//! that fail to parse fall back to documented defaults. The single fallible surface is
//! the programmatic [`AttributedTextBuilder`].

// Enable strict error handling in production code (but not in tests, and not in
// doc-tests).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

pub mod core;
pub mod engine;
pub mod fx;
pub mod markup;
pub mod typewriter;

// Re-export everything from the top-level modules, so callers and internal code can use
// flat `crate::{..}` imports.
pub use core::*;

pub use engine::*;
pub use fx::*;
pub use markup::*;
pub use typewriter::*;
