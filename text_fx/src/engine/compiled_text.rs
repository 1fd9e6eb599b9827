// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Output of the tag-stack compiler: for every glyph, the style visible at its
//! position, plus the attachments, diagnostics and span view produced along the way.
//!
//! Styles live in an arena and glyphs carry indices into it — restoring a style on
//! tag close is an index swap, and identical runs of glyphs share one style entry.

use crate::{AttributedText, GlyphStyle, InlineAttachment, InlineString, TrackId};
use rustc_hash::FxHashMap;
use std::fmt::{self, Display, Formatter};

/// Reveal ranks of a glyph within its typewriter track, by granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRanks {
    pub char_rank: u32,
    pub word_rank: u32,
}

/// Per-track unit totals (denominators for cycle wrapping and completion).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackTotals {
    pub chars: u32,
    pub words: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledGlyph {
    pub codepoint: char,
    /// Character offset in the plain text (legacy format codes occupy plain-text
    /// positions but produce no glyph, so this can skip ahead of `glyph_index`).
    pub plain_index: usize,
    /// Dense index among emitted glyphs.
    pub glyph_index: usize,
    /// Index into the style arena.
    pub style_index: usize,
    /// Present iff the glyph's style carries an active typewriter track.
    pub track_ranks: Option<TrackRanks>,
}

/// Non-fatal compile events, returned as data. The compiler also emits them on
/// `tracing` (warn for unmatched closes, debug otherwise); whether and where they
/// surface further is the host's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileDiagnostic {
    UnmatchedClose {
        tag_name: InlineString,
        position: usize,
    },
    UnknownTag {
        tag_name: InlineString,
        position: usize,
    },
    UnknownLegacyCode {
        code: char,
        position: usize,
    },
}

impl Display for CompileDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompileDiagnostic::UnmatchedClose { tag_name, position } => {
                write!(f, "unmatched </{tag_name}> at {position}")
            }
            CompileDiagnostic::UnknownTag { tag_name, position } => {
                write!(f, "unknown tag <{tag_name}> at {position}")
            }
            CompileDiagnostic::UnknownLegacyCode { code, position } => {
                write!(f, "unknown legacy code §{code} at {position}")
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CompiledText {
    pub(crate) plain_text: String,
    pub(crate) glyphs: Vec<CompiledGlyph>,
    pub(crate) style_arena: Vec<GlyphStyle>,
    pub(crate) attachments: Vec<InlineAttachment>,
    pub(crate) diagnostics: Vec<CompileDiagnostic>,
    pub(crate) attributed: AttributedText,
    pub(crate) track_totals: FxHashMap<TrackId, TrackTotals>,
}

impl CompiledText {
    #[must_use]
    pub fn plain_text(&self) -> &str { &self.plain_text }

    #[must_use]
    pub fn glyphs(&self) -> &[CompiledGlyph] { &self.glyphs }

    #[must_use]
    pub fn glyph_count(&self) -> usize { self.glyphs.len() }

    #[must_use]
    pub fn style_of(&self, glyph: &CompiledGlyph) -> &GlyphStyle {
        &self.style_arena[glyph.style_index]
    }

    #[must_use]
    pub fn style_at(&self, style_index: usize) -> Option<&GlyphStyle> {
        self.style_arena.get(style_index)
    }

    #[must_use]
    pub fn attachments(&self) -> &[InlineAttachment] { &self.attachments }

    #[must_use]
    pub fn diagnostics(&self) -> &[CompileDiagnostic] { &self.diagnostics }

    /// The span view of the compiled markup (structurally equal across re-parses of
    /// the same input).
    #[must_use]
    pub fn attributed_text(&self) -> &AttributedText { &self.attributed }

    #[must_use]
    pub fn track_totals(&self, track_id: &TrackId) -> TrackTotals {
        self.track_totals.get(track_id).copied().unwrap_or_default()
    }
}
