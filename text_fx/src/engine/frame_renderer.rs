// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-frame assembly: compiled glyph + clock → final draw record.
//!
//! The host walks its laid-out glyphs each frame and calls [`FrameRenderer::emit`]
//! with each glyph's index and (optionally) its layout position; position feeds the
//! typewriter's visual ordinals. Order of operations per glyph:
//!
//! 1. base style resolution (foreground color, shadow flag),
//! 2. gradient color evaluation (main pass only — a rainbow shadow looks broken),
//! 3. per-glyph effects in accumulation order (outermost tag first),
//! 4. typewriter gating (alpha forced to 0 for unrevealed glyphs, shadow included).
//!
//! With `animations_enabled` off, steps 2 and 3 degrade to their static forms: the
//! gradient is sampled at time zero and positional effects are skipped.

use crate::{CompiledGlyph, CompiledText, DrawPass, FxColor, FxConfig, GlyphPos,
            GlyphSettings, GradientSpec, Millis, RenderContext, TypewriterMode,
            TypewriterTrack, millis, reveal_count};

/// Per-frame inputs. `context_id` names the view (tooltip/screen/quest) this text is
/// rendered inside; without one, each typewriter track falls back to a context keyed
/// by its own identity.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams<'a> {
    pub now: Millis,
    pub pass: DrawPass,
    pub context_id: Option<&'a str>,
}

#[derive(Debug)]
pub struct FrameRenderer<'a> {
    compiled: &'a CompiledText,
    ctx: &'a RenderContext,
    params: FrameParams<'a>,
    /// Sampled once per frame; the host may flip switches mid-game on another thread.
    config: FxConfig,
}

impl<'a> FrameRenderer<'a> {
    #[must_use]
    pub fn new(
        compiled: &'a CompiledText,
        ctx: &'a RenderContext,
        params: FrameParams<'a>,
    ) -> Self {
        ctx.begin_frame(params.now);
        Self {
            compiled,
            ctx,
            params,
            config: ctx.config(),
        }
    }

    /// Produce the draw record for one glyph. `maybe_pos` is the host's layout
    /// position for the glyph (pre-effect pen position); supplying it makes
    /// typewriter reveal follow visual (line, column) order instead of logical
    /// order. Returns [`None`] only for an out-of-range index.
    #[must_use]
    pub fn emit(
        &self,
        glyph_index: usize,
        maybe_pos: Option<GlyphPos>,
    ) -> Option<GlyphSettings> {
        let glyph = self.compiled.glyphs().get(glyph_index)?;
        let style = self.compiled.style_of(glyph);

        let mut settings = GlyphSettings::new(glyph.codepoint, glyph.glyph_index);
        settings.shadow = style.shadow;
        settings.color = style.color_fg.unwrap_or_default();

        if let Some(gradient) = &style.gradient
            && self.params.pass != DrawPass::Shadow
        {
            settings.color = self.gradient_color(gradient, glyph);
        }

        if self.config.animations_enabled {
            for fx in &style.fx {
                fx.apply(self.params.now, &mut settings);
            }
        }

        if let Some(track) = &style.typewriter {
            self.apply_typewriter_gate(track, glyph, maybe_pos, &mut settings);
        }

        Some(settings)
    }

    /// Layout-free convenience: every glyph, logical reveal order. Useful for hosts
    /// that do their own wrapping later, and for tests.
    #[must_use]
    pub fn render_all(&self) -> Vec<GlyphSettings> {
        (0..self.compiled.glyph_count())
            .filter_map(|glyph_index| self.emit(glyph_index, None))
            .collect()
    }

    fn gradient_color(&self, gradient: &GradientSpec, glyph: &CompiledGlyph) -> FxColor {
        // With animations off the gradient still colors the text, frozen at t=0.
        let effective_now = if self.config.animations_enabled {
            self.params.now
        } else {
            millis(0u64)
        };
        let phase = gradient.phase_at(effective_now, glyph.glyph_index);
        let table = self.ctx.gradient_table(gradient);
        GradientSpec::sample_table(&table, phase)
    }

    fn apply_typewriter_gate(
        &self,
        track: &TypewriterTrack,
        glyph: &CompiledGlyph,
        maybe_pos: Option<GlyphPos>,
        settings: &mut GlyphSettings,
    ) {
        if track.mode == TypewriterMode::Off || !self.config.typewriter_gating_enabled {
            return;
        }
        let Some(ranks) = glyph.track_ranks else {
            return;
        };

        let context_key = match self.params.context_id {
            Some(context_id) => context_id.to_string(),
            None => track.track_id.fallback_context_key(),
        };
        let view_start = self
            .ctx
            .view_states()
            .view_start(&context_key, self.params.now);

        let totals = self.compiled.track_totals(&track.track_id);
        let total_units = match track.mode {
            TypewriterMode::Word => totals.words as usize,
            _ => totals.chars as usize,
        };
        let revealed = reveal_count(track, view_start, self.params.now, total_units);

        let rank = match (track.mode, maybe_pos) {
            // Word reveal is logical: a word appears as a unit wherever it wrapped.
            (TypewriterMode::Word, _) => ranks.word_rank as usize,
            (_, Some(pos)) => self.ctx.observe_glyph(
                &context_key,
                &track.track_id,
                self.params.pass,
                pos,
            ),
            (_, None) => ranks.char_rank as usize,
        };

        if rank >= revealed {
            settings.force_invisible();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EffectRegistry, assert_eq2, compile_markup};

    fn compile(markup: &str, ctx: &RenderContext) -> CompiledText {
        let registry = EffectRegistry::with_builtin_tags();
        compile_markup(markup, &registry, ctx)
    }

    fn frame<'a>(
        compiled: &'a CompiledText,
        ctx: &'a RenderContext,
        now_ms: u64,
    ) -> FrameRenderer<'a> {
        FrameRenderer::new(compiled, ctx, FrameParams {
            now: millis(now_ms),
            pass: DrawPass::Main,
            context_id: Some("test:ctx"),
        })
    }

    #[test]
    fn test_gradient_and_wave_scenario() {
        let ctx = RenderContext::new();
        let compiled =
            compile("<grad from=FF0000 to=00FF00><wave a=2>Hi</wave></grad>", &ctx);
        let renderer = frame(&compiled, &ctx, 100);
        let glyphs = renderer.render_all();
        assert_eq2!(glyphs.len(), 2);

        // Both carry an index-weighted red→green color.
        assert_eq2!(glyphs[0].color, FxColor::from_rgb(255, 0, 0));
        assert!(glyphs[1].color.green > glyphs[0].color.green);
        assert!(glyphs[1].color.red < glyphs[0].color.red);

        // Both carry a wave offset with amplitude 2 and per-index phase.
        assert!(glyphs[0].y_offset.abs() <= 2.0 + f32::EPSILON);
        assert!(glyphs[0].y_offset != glyphs[1].y_offset);
    }

    #[test]
    fn test_shadow_pass_excludes_gradient_but_keeps_motion() {
        let ctx = RenderContext::new();
        let compiled = compile("<grad from=FF0000 to=0000FF><wave>x</wave></grad>", &ctx);

        let main = FrameRenderer::new(&compiled, &ctx, FrameParams {
            now: millis(100u64),
            pass: DrawPass::Main,
            context_id: None,
        });
        let shadow = FrameRenderer::new(&compiled, &ctx, FrameParams {
            now: millis(100u64),
            pass: DrawPass::Shadow,
            context_id: None,
        });

        let main_glyph = main.emit(0, None).unwrap();
        let shadow_glyph = shadow.emit(0, None).unwrap();

        assert_eq2!(main_glyph.color, FxColor::from_rgb(255, 0, 0));
        // Shadow keeps the base color, not the gradient sample.
        assert_eq2!(shadow_glyph.color, FxColor::default());
        // But the shadow moves with the glyph.
        assert_eq2!(shadow_glyph.y_offset, main_glyph.y_offset);
    }

    #[test]
    fn test_animations_disabled_is_static() {
        let ctx = RenderContext::new();
        ctx.set_config(FxConfig {
            animations_enabled: false,
            typewriter_gating_enabled: true,
        });
        let compiled = compile("<wave a=5><grad from=FF0000 to=00FF00>ab</grad></wave>", &ctx);

        let lhs = frame(&compiled, &ctx, 100).render_all();
        let rhs = frame(&compiled, &ctx, 7_777).render_all();
        // No motion...
        assert_eq2!(lhs[0].y_offset, 0.0);
        // ...and identical output at any timestamp (gradient frozen at t=0).
        assert_eq2!(lhs, rhs);
        // Static gradient colors still apply.
        assert_eq2!(lhs[0].color, FxColor::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_typewriter_reveals_over_time() {
        let ctx = RenderContext::new();
        let compiled = compile("<typewriter>abcd</typewriter>", &ctx);

        // At the context's first frame nothing is revealed.
        let glyphs = frame(&compiled, &ctx, 1_000).render_all();
        assert!(glyphs.iter().all(|glyph| glyph.alpha == 0.0));

        // 100ms later (2 ticks at 20 chars/sec): 2 glyphs visible.
        let glyphs = frame(&compiled, &ctx, 1_100).render_all();
        let visible: Vec<bool> = glyphs.iter().map(|glyph| glyph.alpha > 0.0).collect();
        assert_eq2!(visible, vec![true, true, false, false]);

        // Long after: everything visible.
        let glyphs = frame(&compiled, &ctx, 5_000).render_all();
        assert!(glyphs.iter().all(|glyph| glyph.alpha > 0.0));
    }

    #[test]
    fn test_typewriter_reset_on_view_restart() {
        let ctx = RenderContext::new();
        let compiled = compile("<typewriter>abcd</typewriter>", &ctx);

        let _seed = frame(&compiled, &ctx, 0).render_all();
        let glyphs = frame(&compiled, &ctx, 150).render_all();
        assert!(glyphs[3].alpha == 0.0 && glyphs[0].alpha > 0.0);

        // The view re-shows: reveal restarts from zero.
        ctx.view_states().mark_view_started("test:ctx", millis(10_000u64));
        let glyphs = frame(&compiled, &ctx, 10_000).render_all();
        assert!(glyphs.iter().all(|glyph| glyph.alpha == 0.0));
    }

    #[test]
    fn test_typewriter_gating_disabled_shows_everything() {
        let ctx = RenderContext::new();
        ctx.set_config(FxConfig {
            animations_enabled: true,
            typewriter_gating_enabled: false,
        });
        let compiled = compile("<typewriter>abcd</typewriter>", &ctx);
        let glyphs = frame(&compiled, &ctx, 0).render_all();
        assert!(glyphs.iter().all(|glyph| glyph.alpha > 0.0));
    }

    #[test]
    fn test_word_mode_reveals_whole_words() {
        let ctx = RenderContext::new();
        let compiled = compile("<typewriter by=word s=1>ab cd</typewriter>", &ctx);

        // s=1 char/sec ⇒ multiplier 0.05 ⇒ 1 word per 20 ticks (1000ms).
        let _seed = frame(&compiled, &ctx, 0).render_all();
        let glyphs = frame(&compiled, &ctx, 1_000).render_all();
        let visible: Vec<bool> = glyphs.iter().map(|glyph| glyph.alpha > 0.0).collect();
        // First word visible as a unit, separator and second word still hidden.
        assert_eq2!(visible, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_visual_positions_flip_reveal_order() {
        let ctx = RenderContext::new();
        let compiled = compile("<typewriter>ab</typewriter>", &ctx);

        // Feed a frame where glyph 0 sits on the SECOND line and glyph 1 on the
        // first (emission order opposite to visual order), then advance the frame.
        let positions = [
            GlyphPos { x: 0.0, y: 9.0 },
            GlyphPos { x: 0.0, y: 0.0 },
        ];
        let renderer = frame(&compiled, &ctx, 0);
        for (glyph_index, pos) in positions.iter().enumerate() {
            let _unused = renderer.emit(glyph_index, Some(*pos));
        }

        // 1 tick after start: exactly one unit revealed — and it must be glyph 1,
        // the visually-first one, despite being emitted second.
        let renderer = frame(&compiled, &ctx, 50);
        let glyph_0 = renderer.emit(0, Some(positions[0])).unwrap();
        let glyph_1 = renderer.emit(1, Some(positions[1])).unwrap();
        assert_eq2!(glyph_0.alpha, 0.0);
        assert!(glyph_1.alpha > 0.0);
    }

    #[test]
    fn test_unrevealed_glyph_kills_shadow_too() {
        let ctx = RenderContext::new();
        let compiled = compile("<shadow><typewriter><neon>ab</neon></typewriter></shadow>", &ctx);
        let glyphs = frame(&compiled, &ctx, 0).render_all();
        // Nothing revealed yet: primary and all siblings fully transparent.
        for glyph in &glyphs {
            assert_eq2!(glyph.alpha, 0.0);
            assert!(glyph.shadow);
            for sibling in glyph.siblings.iter() {
                assert_eq2!(sibling.alpha, 0.0);
            }
        }
    }

    #[test]
    fn test_out_of_range_index() {
        let ctx = RenderContext::new();
        let compiled = compile("x", &ctx);
        let renderer = frame(&compiled, &ctx, 0);
        assert!(renderer.emit(5, None).is_none());
    }
}
