// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The standard tag set.
//!
//! | Tag | Aliases | Effect |
//! |---|---|---|
//! | `color value=..` | `colour`, `c` | foreground color (also accepts a bare name: `<color red>`) |
//! | `bg value=..` | | background color |
//! | `bold` | `b` | bold |
//! | `italic` | `i` | italic |
//! | `underline` | `u` | underline |
//! | `strikethrough` | `st` | strikethrough |
//! | `obfuscated` | `obf` | scrambled rendering flag |
//! | `shadow` / `noshadow` | | drop shadow on/off |
//! | `wave`, `bounce`, `shake`, `turbulence`/`turb`, `wiggle`, `glitch`, `pendulum`/`pend`, `swing`, `scroll`, `fade`, `neon` | | positional/alpha effects, see [`crate::fx`] |
//! | `grad from=.. to=..` | `gradient` | color gradient across the span |
//! | `rainbow` | | animated full-hue gradient |
//! | `typewriter` | `type` | progressive reveal, see [`crate::TypewriterTrack`] |
//! | `item id=.. />`, `entity id=.. />` | | inline 3D-icon attachments |

use crate::{ActiveEffect, AttachmentKind, BounceFx, CloseAction, EffectRegistry,
            FadeFx, FxColor, GlitchFx, GlyphFx, GradientSpec, NeonFx, PendulumFx,
            ScrollFx, ShakeFx, SwingFx, TagContext, TurbulenceFx, TypewriterTrack,
            WaveFx, WiggleFx};

/// Register every built-in tag into `registry`.
pub fn register_all(registry: &mut EffectRegistry) {
    // Static style tags.
    registry.register_with_aliases("color", color_factory, &["colour", "c"]);
    registry.register("bg", bg_factory);
    registry.register_with_aliases("bold", bold_factory, &["b"]);
    registry.register_with_aliases("italic", italic_factory, &["i"]);
    registry.register_with_aliases("underline", underline_factory, &["u"]);
    registry.register_with_aliases("strikethrough", strikethrough_factory, &["st"]);
    registry.register_with_aliases("obfuscated", obfuscated_factory, &["obf"]);
    registry.register("shadow", shadow_factory);
    registry.register("noshadow", noshadow_factory);

    // Per-glyph effects.
    registry.register("wave", wave_factory);
    registry.register("bounce", bounce_factory);
    registry.register("shake", shake_factory);
    registry.register_with_aliases("turbulence", turbulence_factory, &["turb"]);
    registry.register("wiggle", wiggle_factory);
    registry.register("glitch", glitch_factory);
    registry.register_with_aliases("pendulum", pendulum_factory, &["pend"]);
    registry.register("swing", swing_factory);
    registry.register("scroll", scroll_factory);
    registry.register("fade", fade_factory);
    registry.register("neon", neon_factory);

    // Color curves.
    registry.register_with_aliases("grad", grad_factory, &["gradient"]);
    registry.register("rainbow", rainbow_factory);

    // Reveal.
    registry.register_with_aliases("typewriter", typewriter_factory, &["type"]);

    // Inline attachments.
    registry.register("item", item_factory);
    registry.register("entity", entity_factory);
}

// Each factory below is deliberately tiny: decode leniently, fill a mutation.

fn color_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    // `<color value=FF0000>`, `<color c=red>`, or positional-ish `<color red>`.
    let raw = ctx
        .string("value")
        .or_else(|| ctx.string("c"))
        .or_else(|| ctx.attribute().first_bare_key());
    let mut it = ActiveEffect::inert();
    it.mutation.color_fg =
        raw.map(|value| FxColor::parse_lenient(value, FxColor::default()));
    it
}

fn bg_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    let raw = ctx
        .string("value")
        .or_else(|| ctx.string("c"))
        .or_else(|| ctx.attribute().first_bare_key());
    let mut it = ActiveEffect::inert();
    it.mutation.color_bg =
        raw.map(|value| FxColor::parse_lenient(value, FxColor::default()));
    it
}

fn bold_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.bold = Some(true);
    it
}

fn italic_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.italic = Some(true);
    it
}

fn underline_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.underline = Some(true);
    it
}

fn strikethrough_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.strikethrough = Some(true);
    it
}

fn obfuscated_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.obfuscated = Some(true);
    it
}

fn shadow_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.shadow = Some(true);
    it
}

fn noshadow_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.shadow = Some(false);
    it
}

fn wave_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Wave(WaveFx::from_tag(ctx.attribute())))
}

fn bounce_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Bounce(BounceFx::from_tag(ctx.attribute())))
}

fn shake_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Shake(ShakeFx::from_tag(ctx.attribute())))
}

fn turbulence_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Turbulence(TurbulenceFx::from_tag(ctx.attribute())))
}

fn wiggle_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Wiggle(WiggleFx::from_tag(ctx.attribute())))
}

fn glitch_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Glitch(GlitchFx::from_tag(ctx.attribute())))
}

fn pendulum_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Pendulum(PendulumFx::from_tag(ctx.attribute())))
}

fn swing_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Swing(SwingFx::from_tag(ctx.attribute())))
}

fn scroll_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Scroll(ScrollFx::from_tag(ctx.attribute())))
}

fn fade_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Fade(FadeFx::from_tag(ctx.attribute())))
}

fn neon_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    fx_effect(GlyphFx::Neon(NeonFx::from_tag(ctx.attribute())))
}

fn fx_effect(fx: GlyphFx) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.add_fx.push(fx);
    it
}

fn grad_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.gradient = Some(GradientSpec::from_tag(ctx.attribute()));
    it
}

fn rainbow_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.gradient = Some(GradientSpec::rainbow_from_tag(ctx.attribute()));
    it
}

fn typewriter_factory(ctx: &TagContext<'_>) -> ActiveEffect {
    let mut it = ActiveEffect::inert();
    it.mutation.typewriter = Some(TypewriterTrack::from_tag(ctx.attribute()));
    it
}

fn item_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    ActiveEffect {
        mutation: crate::StyleMutation::default(),
        close_action: Some(CloseAction::EmitAttachment {
            kind: AttachmentKind::Item,
        }),
    }
}

fn entity_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
    ActiveEffect {
        mutation: crate::StyleMutation::default(),
        close_action: Some(CloseAction::EmitAttachment {
            kind: AttachmentKind::Entity,
        }),
    }
}
