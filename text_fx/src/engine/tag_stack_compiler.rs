// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The tag-stack compiler.
//!
//! Walks the plain text with an explicit stack of open tags, applying the
//! instruction stream as it goes, and produces the style visible at every glyph
//! position. Styles cascade by snapshot (arena index per [`ActiveTag`]), so closing a
//! tag is an O(1) restore.
//!
//! Batch ordering at one character boundary: closes that match an already-open tag
//! apply first (emission order), then opens (emission order), then closes that only
//! match a tag opened in this same batch — which is how a self-closing tag's
//! zero-width Open+Close pair resolves. Closes that match nothing are tolerated and
//! recorded as diagnostics; compilation never fails, for any input.

use crate::{ActiveEffect, AttributedText, CloseAction, CompileDiagnostic,
            CompiledGlyph, CompiledText, EffectRegistry, GlyphStyle, InlineAttachment,
            InstructionKind, LegacyCode, MarkupInstruction, RenderContext, Span,
            TagAttribute, TagContext, TokenizedMarkup, TrackId, TrackRanks,
            TrackTotals, TypewriterMode, constants, decode_legacy_code,
            inline_string, tokenize};
use rustc_hash::FxHashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Compile a markup string end to end: tokenize + tag-stack walk.
#[must_use]
pub fn compile_markup(
    arg_markup: &str,
    registry: &EffectRegistry,
    ctx: &RenderContext,
) -> CompiledText {
    compile_tokens(tokenize(arg_markup), registry, ctx)
}

/// Compile pre-tokenized markup (the live pipeline tokenizes once and re-compiles on
/// registry changes).
#[must_use]
pub fn compile_tokens(
    tokenized: TokenizedMarkup,
    registry: &EffectRegistry,
    ctx: &RenderContext,
) -> CompiledText {
    let (plain_text, instructions) = tokenized.into_parts();
    Compiler::new(registry, ctx).run(plain_text, &instructions)
}

/// Stack entry for one currently-open tag.
#[derive(Debug)]
struct ActiveTag {
    attribute: TagAttribute,
    open_position: usize,
    /// Arena index of the style in effect before this tag opened; restored on close.
    previous_style_index: usize,
    close_action: Option<CloseAction>,
}

/// Per-track reveal-unit bookkeeping during the walk.
#[derive(Debug, Default)]
struct TrackCounter {
    chars: u32,
    completed_words: u32,
    in_word: bool,
}

struct Compiler<'a> {
    registry: &'a EffectRegistry,
    ctx: &'a RenderContext,
    arena: Vec<GlyphStyle>,
    current_style_index: usize,
    stack: Vec<ActiveTag>,
    glyphs: Vec<CompiledGlyph>,
    spans: Vec<Span>,
    attachments: Vec<InlineAttachment>,
    diagnostics: Vec<CompileDiagnostic>,
    track_counters: FxHashMap<TrackId, TrackCounter>,
}

impl<'a> Compiler<'a> {
    fn new(registry: &'a EffectRegistry, ctx: &'a RenderContext) -> Self {
        Self {
            registry,
            ctx,
            arena: vec![GlyphStyle::base()],
            current_style_index: 0,
            stack: Vec::new(),
            glyphs: Vec::new(),
            spans: Vec::new(),
            attachments: Vec::new(),
            diagnostics: Vec::new(),
            track_counters: FxHashMap::default(),
        }
    }

    fn run(mut self, plain_text: String, instructions: &[MarkupInstruction]) -> CompiledText {
        let chars: Vec<char> = plain_text.chars().collect();
        let word_chars = word_helper::word_char_flags(&plain_text);
        let mut instruction_index = 0;
        let mut skip_legacy_code_char = false;

        // One extra iteration at chars.len() applies the trailing instruction batch.
        for position in 0..=chars.len() {
            instruction_index =
                self.apply_batch_at(position, instructions, instruction_index);

            if position == chars.len() {
                break;
            }
            if skip_legacy_code_char {
                skip_legacy_code_char = false;
                continue;
            }

            let ch = chars[position];
            if ch == constants::LEGACY_CODE_PREFIX && position + 1 < chars.len() {
                self.apply_legacy_code(chars[position + 1], position);
                skip_legacy_code_char = true;
                continue;
            }

            self.emit_glyph(ch, position, word_chars[position]);
        }

        // Tags still open at end of text: their spans run to the end (an unclosed
        // `<rainbow>` styles everything after it).
        while let Some(tag) = self.stack.pop() {
            self.finalize_tag(tag, chars.len());
        }

        let track_totals = self
            .track_counters
            .into_iter()
            .map(|(track_id, counter)| {
                (track_id, TrackTotals {
                    chars: counter.chars,
                    words: counter.completed_words + u32::from(counter.in_word),
                })
            })
            .collect();

        CompiledText {
            attributed: AttributedText::from_parts(plain_text.clone(), self.spans),
            plain_text,
            glyphs: self.glyphs,
            style_arena: self.arena,
            attachments: self.attachments,
            diagnostics: self.diagnostics,
            track_totals,
        }
    }

    /// Apply the instruction batch at `position`. Returns the next unconsumed
    /// instruction index.
    fn apply_batch_at(
        &mut self,
        position: usize,
        instructions: &[MarkupInstruction],
        mut index: usize,
    ) -> usize {
        let batch_start = index;
        while index < instructions.len() && instructions[index].position == position {
            index += 1;
        }
        if batch_start == index {
            return index;
        }
        let batch = &instructions[batch_start..index];

        // Pass 1: closes that match an already-open tag.
        let mut deferred_closes = Vec::new();
        for instruction in batch {
            if instruction.kind == InstructionKind::Close
                && !self.try_close(instruction.tag_name(), position)
            {
                deferred_closes.push(instruction);
            }
        }

        // Pass 2: opens.
        for instruction in batch {
            if instruction.kind == InstructionKind::Open {
                self.open_tag(&instruction.attribute, position);
            }
        }

        // Pass 3: deferred closes can now match opens from this batch (zero-width
        // self-closing pairs). Still-unmatched closes are tolerated.
        for instruction in deferred_closes {
            if !self.try_close(instruction.tag_name(), position) {
                tracing::warn!(
                    tag_name = instruction.tag_name(),
                    position,
                    "unmatched closing tag"
                );
                self.diagnostics.push(CompileDiagnostic::UnmatchedClose {
                    tag_name: inline_string(instruction.tag_name()),
                    position,
                });
            }
        }

        index
    }

    /// Search the stack top-down for the nearest tag with this name; pop everything
    /// above and including it (improperly nested younger siblings are discarded with
    /// it), restoring the style recorded when that tag opened. Returns `false` when
    /// no tag matches.
    fn try_close(&mut self, tag_name: &str, position: usize) -> bool {
        let Some(found) = self
            .stack
            .iter()
            .rposition(|tag| tag.attribute.id() == tag_name)
        else {
            return false;
        };

        let restore_index = self.stack[found].previous_style_index;
        while self.stack.len() > found {
            let tag = self.stack.pop().expect("len checked");
            self.finalize_tag(tag, position);
        }
        self.current_style_index = restore_index;
        true
    }

    fn open_tag(&mut self, attribute: &TagAttribute, position: usize) {
        let previous_style_index = self.current_style_index;
        let mut style = self.arena[previous_style_index].clone();
        let mut close_action = None;

        match self.registry.factory_for(attribute.id()) {
            Some(factory) => {
                let tag_ctx = TagContext::new(attribute);
                let ActiveEffect {
                    mut mutation,
                    close_action: action,
                } = factory(&tag_ctx);

                // Typewriter track resolution at open time: an explicit id is kept;
                // otherwise inherit the enclosing track (nested spans share one
                // reveal), else allocate a fresh unique id.
                if let Some(track) = &mut mutation.typewriter
                    && !matches!(track.track_id, TrackId::Explicit(_))
                {
                    track.track_id = match &style.typewriter {
                        Some(parent) => parent.track_id.clone(),
                        None => self.ctx.allocate_track_id(),
                    };
                }

                mutation.apply_to(&mut style);
                close_action = action;
            }
            None => {
                tracing::debug!(tag_name = attribute.id(), position, "unknown tag");
                self.diagnostics.push(CompileDiagnostic::UnknownTag {
                    tag_name: inline_string(attribute.id()),
                    position,
                });
            }
        }

        self.arena.push(style);
        self.current_style_index = self.arena.len() - 1;
        self.stack.push(ActiveTag {
            attribute: attribute.clone(),
            open_position: position,
            previous_style_index,
            close_action,
        });
    }

    /// A popped tag becomes a span; attachment tags materialize their payload.
    fn finalize_tag(&mut self, tag: ActiveTag, end_position: usize) {
        if let Some(CloseAction::EmitAttachment { kind }) = tag.close_action {
            self.attachments.push(InlineAttachment::from_tag(
                kind,
                &tag.attribute,
                tag.open_position,
            ));
        }
        self.spans
            .push(Span::new(tag.open_position, end_position, tag.attribute));
    }

    /// A legacy `§x` code is a flat mutation of the current style — no stack entry,
    /// so the enclosing tag's close discards it along with everything else.
    fn apply_legacy_code(&mut self, code: char, position: usize) {
        match decode_legacy_code(code) {
            Some(LegacyCode::Reset) => {
                while let Some(tag) = self.stack.pop() {
                    self.finalize_tag(tag, position);
                }
                self.current_style_index = 0;
            }
            Some(decoded) => {
                let mut style = self.arena[self.current_style_index].clone();
                match decoded {
                    LegacyCode::Color(color) => style.color_fg = Some(color),
                    LegacyCode::Bold => {
                        style.attribs.bold = Some(crate::style_attrib::Bold);
                    }
                    LegacyCode::Italic => {
                        style.attribs.italic = Some(crate::style_attrib::Italic);
                    }
                    LegacyCode::Underline => {
                        style.attribs.underline = Some(crate::style_attrib::Underline);
                    }
                    LegacyCode::Strikethrough => {
                        style.attribs.strikethrough =
                            Some(crate::style_attrib::Strikethrough);
                    }
                    LegacyCode::Obfuscated => {
                        style.attribs.obfuscated = Some(crate::style_attrib::Obfuscated);
                    }
                    LegacyCode::Reset => unreachable!("handled above"),
                }
                self.arena.push(style);
                self.current_style_index = self.arena.len() - 1;
            }
            None => {
                tracing::debug!(code = %code, position, "unknown legacy code");
                self.diagnostics.push(CompileDiagnostic::UnknownLegacyCode {
                    code,
                    position,
                });
            }
        }
    }

    fn emit_glyph(&mut self, codepoint: char, plain_index: usize, is_word_char: bool) {
        let style = &self.arena[self.current_style_index];

        let track_ranks = style.typewriter.as_ref().and_then(|track| {
            if track.mode == TypewriterMode::Off {
                return None;
            }
            let counter = self
                .track_counters
                .entry(track.track_id.clone())
                .or_default();

            let char_rank = counter.chars;
            counter.chars += 1;

            if is_word_char {
                counter.in_word = true;
            } else if counter.in_word {
                counter.completed_words += 1;
                counter.in_word = false;
            }
            let word_rank = counter.completed_words;

            Some(TrackRanks {
                char_rank,
                word_rank,
            })
        });

        self.glyphs.push(CompiledGlyph {
            codepoint,
            plain_index,
            glyph_index: self.glyphs.len(),
            style_index: self.current_style_index,
            track_ranks,
        });
    }
}

mod word_helper {
    use super::UnicodeSegmentation;

    /// Per-character "belongs to a word" flags for the whole plain text, from
    /// Unicode word segmentation (handles CJK and punctuation runs better than a
    /// whitespace split). A segment counts as a word if it contains any
    /// alphanumeric character.
    pub fn word_char_flags(plain_text: &str) -> Vec<bool> {
        let mut flags = Vec::with_capacity(plain_text.chars().count());
        for segment in plain_text.split_word_bounds() {
            let is_word = segment.chars().any(char::is_alphanumeric);
            for _ch in segment.chars() {
                flags.push(is_word);
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FxColor, GlyphFx, TrackId, assert_eq2, fx_color};

    fn compile(markup: &str) -> CompiledText {
        let registry = EffectRegistry::with_builtin_tags();
        let ctx = RenderContext::new();
        compile_markup(markup, &registry, &ctx)
    }

    #[test]
    fn test_nested_gradient_and_wave() {
        let compiled = compile("<grad from=FF0000 to=00FF00><wave a=2>Hi</wave></grad>");
        assert_eq2!(compiled.plain_text(), "Hi");
        assert_eq2!(compiled.glyph_count(), 2);

        for glyph in compiled.glyphs() {
            let style = compiled.style_of(glyph);
            let gradient = style.gradient.expect("gradient applies to both glyphs");
            assert_eq2!(gradient.from, FxColor::from_rgb(255, 0, 0));
            assert_eq2!(gradient.to, FxColor::from_rgb(0, 255, 0));
            assert_eq2!(style.fx.len(), 1);
            match style.fx[0] {
                GlyphFx::Wave(wave) => assert_eq2!(wave.amplitude, 2.0),
                ref other => panic!("expected wave, got {other:?}"),
            }
        }
        assert!(compiled.diagnostics().is_empty());
    }

    #[test]
    fn test_close_restores_previous_style() {
        let compiled = compile("a<bold>b</bold>c");
        let styles: Vec<bool> = compiled
            .glyphs()
            .iter()
            .map(|glyph| compiled.style_of(glyph).attribs.bold.is_some())
            .collect();
        assert_eq2!(styles, vec![false, true, false]);
        // "a" and "c" share the base style arena entry.
        assert_eq2!(
            compiled.glyphs()[0].style_index,
            compiled.glyphs()[2].style_index
        );
    }

    #[test]
    fn test_improperly_nested_close_is_tolerated() {
        // "<a><b>X</a>Y</b>": closing a discards b too; the trailing </b> is
        // unmatched and tolerated. Every glyph still gets a deterministic style.
        let compiled = compile("<bold><italic>X</bold>Y</italic>");
        assert_eq2!(compiled.plain_text(), "XY");

        let x_style = compiled.style_of(&compiled.glyphs()[0]);
        assert!(x_style.attribs.bold.is_some());
        assert!(x_style.attribs.italic.is_some());

        let y_style = compiled.style_of(&compiled.glyphs()[1]);
        assert!(y_style.attribs.bold.is_none());
        assert!(y_style.attribs.italic.is_none());

        assert_eq2!(compiled.diagnostics().len(), 1);
        assert!(matches!(
            compiled.diagnostics()[0],
            CompileDiagnostic::UnmatchedClose { .. }
        ));
    }

    #[test]
    fn test_unclosed_tag_styles_to_end() {
        let compiled = compile("<rainbow>no close");
        assert_eq2!(compiled.plain_text(), "no close");
        for glyph in compiled.glyphs() {
            assert!(compiled.style_of(glyph).gradient.is_some());
        }
        let spans = compiled.attributed_text().spans();
        assert_eq2!(spans.len(), 1);
        assert_eq2!(spans[0].start, 0);
        assert_eq2!(spans[0].end, 8);
    }

    #[test]
    fn test_unknown_tag_is_inert_span() {
        let compiled = compile("<sparkle intensity=11>hi</sparkle>");
        assert_eq2!(compiled.plain_text(), "hi");
        for glyph in compiled.glyphs() {
            assert_eq2!(compiled.style_of(glyph), &GlyphStyle::base());
        }
        assert!(matches!(
            compiled.diagnostics()[0],
            CompileDiagnostic::UnknownTag { .. }
        ));
        // The span is still recorded, attributes intact, for host-side tooling.
        let spans = compiled.attributed_text().spans();
        assert_eq2!(spans.len(), 1);
        assert_eq2!(spans[0].attributes[0].float("intensity", 0.0), 11.0);
    }

    #[test]
    fn test_self_closing_attachment() {
        let compiled = compile(r#"get <item id="minecraft:diamond" scale=1.5/> now"#);
        assert_eq2!(compiled.plain_text(), "get  now");
        assert_eq2!(compiled.attachments().len(), 1);
        let attachment = &compiled.attachments()[0];
        assert_eq2!(attachment.id, "minecraft:diamond");
        assert_eq2!(attachment.position, 4);
        assert_eq2!(attachment.scale, 1.5);
        // No spurious unmatched-close diagnostic from the zero-width pair.
        assert!(compiled.diagnostics().is_empty());
    }

    #[test]
    fn test_legacy_codes_mutate_flat() {
        let compiled = compile("a§cb§lc");
        // § codes are consumed: 3 visible glyphs from 7 plain chars.
        assert_eq2!(compiled.plain_text(), "a§cb§lc");
        assert_eq2!(compiled.glyph_count(), 3);

        let a = compiled.style_of(&compiled.glyphs()[0]);
        assert_eq2!(a.color_fg, None);

        let b = compiled.style_of(&compiled.glyphs()[1]);
        assert_eq2!(b.color_fg, Some(FxColor::from_rgb(255, 85, 85)));
        assert!(b.attribs.bold.is_none());

        let c = compiled.style_of(&compiled.glyphs()[2]);
        assert_eq2!(c.color_fg, Some(FxColor::from_rgb(255, 85, 85)));
        assert!(c.attribs.bold.is_some());
    }

    #[test]
    fn test_legacy_reset_clears_stack() {
        let compiled = compile("<bold><color red>a§rb");
        let a = compiled.style_of(&compiled.glyphs()[0]);
        assert!(a.attribs.bold.is_some());
        assert_eq2!(a.color_fg, Some(fx_color!(red)));

        let b = compiled.style_of(&compiled.glyphs()[1]);
        assert_eq2!(b, &GlyphStyle::base());
    }

    #[test]
    fn test_tag_close_discards_legacy_mutation() {
        // §l inside <color> is discarded when </color> restores the snapshot.
        let compiled = compile("<color red>a§lb</color>c");
        let b = compiled.style_of(&compiled.glyphs()[1]);
        assert!(b.attribs.bold.is_some());
        let c = compiled.style_of(&compiled.glyphs()[2]);
        assert!(c.attribs.bold.is_none());
        assert_eq2!(c.color_fg, None);
    }

    #[test]
    fn test_trailing_lone_legacy_prefix_is_literal() {
        let compiled = compile("ab§");
        assert_eq2!(compiled.glyph_count(), 3);
        assert_eq2!(compiled.glyphs()[2].codepoint, '§');
    }

    #[test]
    fn test_typewriter_track_assignment_and_ranks() {
        let compiled = compile("<typewriter>ab cd</typewriter>");
        let ranks: Vec<(u32, u32)> = compiled
            .glyphs()
            .iter()
            .map(|glyph| {
                let it = glyph.track_ranks.expect("in track");
                (it.char_rank, it.word_rank)
            })
            .collect();
        assert_eq2!(ranks, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 1)]);

        let track = compiled
            .style_of(&compiled.glyphs()[0])
            .typewriter
            .clone()
            .expect("track");
        assert!(matches!(track.track_id, TrackId::Assigned(_)));
        let totals = compiled.track_totals(&track.track_id);
        assert_eq2!(totals.chars, 5);
        assert_eq2!(totals.words, 2);
    }

    #[test]
    fn test_nested_typewriter_inherits_parent_track() {
        let compiled = compile("<typewriter>ab<typewriter s=40>cd</typewriter></typewriter>");
        let outer = compiled
            .style_of(&compiled.glyphs()[0])
            .typewriter
            .clone()
            .unwrap();
        let inner = compiled
            .style_of(&compiled.glyphs()[2])
            .typewriter
            .clone()
            .unwrap();
        assert_eq2!(outer.track_id, inner.track_id);
        // The inner span still keeps its own speed.
        assert_eq2!(inner.speed_multiplier, 2.0);
        // Shared track: ranks continue across the nesting boundary.
        let totals = compiled.track_totals(&outer.track_id);
        assert_eq2!(totals.chars, 4);
    }

    #[test]
    fn test_distinct_anonymous_tracks_do_not_share() {
        let compiled = compile("<typewriter>ab</typewriter> <typewriter>cd</typewriter>");
        let lhs = compiled
            .style_of(&compiled.glyphs()[0])
            .typewriter
            .clone()
            .unwrap();
        let rhs = compiled
            .style_of(&compiled.glyphs()[3])
            .typewriter
            .clone()
            .unwrap();
        assert!(lhs.track_id != rhs.track_id);
        assert_eq2!(compiled.track_totals(&lhs.track_id).chars, 2);
        assert_eq2!(compiled.track_totals(&rhs.track_id).chars, 2);
    }

    #[test]
    fn test_explicit_track_id_shared_across_spans() {
        let compiled =
            compile("<typewriter id=x>ab</typewriter> <typewriter id=x>cd</typewriter>");
        let lhs = compiled
            .style_of(&compiled.glyphs()[0])
            .typewriter
            .clone()
            .unwrap();
        assert_eq2!(compiled.track_totals(&lhs.track_id).chars, 4);
    }

    #[test]
    fn test_idempotent_reparse() {
        let markup = "<grad from=FF0000 to=00FF00><wave a=2>Hi</wave></grad> §cx";
        let registry = EffectRegistry::with_builtin_tags();
        let ctx = RenderContext::new();
        let lhs = compile_markup(markup, &registry, &ctx);
        let rhs = compile_markup(markup, &registry, &ctx);
        assert_eq2!(lhs.attributed_text(), rhs.attributed_text());
        assert_eq2!(lhs.plain_text(), rhs.plain_text());
        assert_eq2!(lhs.glyph_count(), rhs.glyph_count());
    }

    #[test]
    fn test_adversarial_inputs_never_panic() {
        let inputs = [
            "",
            "<",
            ">",
            "</>",
            "</nope></nope></nope>",
            "<a><b><c>deep</a>",
            "§",
            "§§§§",
            "<typewriter><typewriter><typewriter>x",
            "\u{fffd}<wave>\u{0}</wave>",
            "<bold>🦀🦀🦀",
            "<<<<<>>>>>",
        ];
        for input in inputs {
            let _unused = compile(input);
        }
    }

    #[test]
    fn test_sibling_tags_at_same_boundary() {
        // </bold><italic> at one boundary: close applies before open.
        let compiled = compile("<bold>a</bold><italic>b</italic>");
        let a = compiled.style_of(&compiled.glyphs()[0]);
        assert!(a.attribs.bold.is_some());
        assert!(a.attribs.italic.is_none());
        let b = compiled.style_of(&compiled.glyphs()[1]);
        assert!(b.attribs.bold.is_none());
        assert!(b.attribs.italic.is_some());
    }

    #[test]
    fn test_fx_accumulate_across_nesting() {
        let compiled = compile("<wave><shake>x</shake></wave>");
        let style = compiled.style_of(&compiled.glyphs()[0]);
        assert_eq2!(style.fx.len(), 2);
    }
}
