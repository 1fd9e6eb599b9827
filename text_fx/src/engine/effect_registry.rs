// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The open tag registry: name → factory, with aliasing and case-insensitive lookup.
//!
//! A factory receives a [`TagContext`] (lenient typed accessors over the tag's
//! attributes) and produces an [`ActiveEffect`]: a plain-data description of (1) the
//! static style mutation to apply over the tag's range, and (2) an optional
//! close-time action (used by self-closing inline attachments). Per-glyph effects
//! ride along inside the style mutation and accumulate across nesting.
//!
//! Unknown tag names are a no-op at compile time — forward-compatible markup from
//! newer content packs degrades gracefully instead of erroring.

use crate::{AttachmentKind, FxColor, GlyphFx, GlyphStyle, GradientSpec, InlineString,
            TagAttribute, TypewriterTrack, builtin_tags, inline_string, style_attrib};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Lenient attribute access handed to factories. Thin wrapper today; keeps factory
/// signatures stable if compile-time context (locale, host capabilities) grows later.
#[derive(Debug, Clone, Copy)]
pub struct TagContext<'a> {
    attribute: &'a TagAttribute,
}

impl<'a> TagContext<'a> {
    #[must_use]
    pub fn new(attribute: &'a TagAttribute) -> Self { Self { attribute } }

    #[must_use]
    pub fn attribute(&self) -> &'a TagAttribute { self.attribute }

    #[must_use]
    pub fn float(&self, key: &str, default: f32) -> f32 {
        self.attribute.float(key, default)
    }

    #[must_use]
    pub fn optional_float(&self, key: &str) -> Option<f32> {
        self.attribute.optional_float(key)
    }

    #[must_use]
    pub fn int(&self, key: &str, default: i32) -> i32 { self.attribute.int(key, default) }

    #[must_use]
    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.attribute.bool(key, default)
    }

    #[must_use]
    pub fn color(&self, key: &str, default: FxColor) -> FxColor {
        self.attribute.color(key, default)
    }

    #[must_use]
    pub fn string(&self, key: &str) -> Option<&'a str> { self.attribute.string(key) }
}

/// Tri-state attribute flips: `None` inherits, `Some(true)` sets, `Some(false)`
/// clears (e.g. `<noshadow>` inside a shadowed span).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMutation {
    pub color_fg: Option<FxColor>,
    pub color_bg: Option<FxColor>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub obfuscated: Option<bool>,
    pub shadow: Option<bool>,
    pub gradient: Option<GradientSpec>,
    pub typewriter: Option<TypewriterTrack>,
    pub add_fx: SmallVec<[GlyphFx; 2]>,
}

impl StyleMutation {
    /// Apply onto a style inherited from the enclosing tag. Scalar fields override;
    /// `add_fx` accumulates.
    pub fn apply_to(&self, style: &mut GlyphStyle) {
        if let Some(color) = self.color_fg {
            style.color_fg = Some(color);
        }
        if let Some(color) = self.color_bg {
            style.color_bg = Some(color);
        }
        apply_helper::set_marker(&mut style.attribs.bold, self.bold, style_attrib::Bold);
        apply_helper::set_marker(
            &mut style.attribs.italic,
            self.italic,
            style_attrib::Italic,
        );
        apply_helper::set_marker(
            &mut style.attribs.underline,
            self.underline,
            style_attrib::Underline,
        );
        apply_helper::set_marker(
            &mut style.attribs.strikethrough,
            self.strikethrough,
            style_attrib::Strikethrough,
        );
        apply_helper::set_marker(
            &mut style.attribs.obfuscated,
            self.obfuscated,
            style_attrib::Obfuscated,
        );
        if let Some(shadow) = self.shadow {
            style.shadow = shadow;
        }
        if let Some(gradient) = self.gradient {
            style.gradient = Some(gradient);
        }
        if let Some(typewriter) = &self.typewriter {
            style.typewriter = Some(typewriter.clone());
        }
        for fx in &self.add_fx {
            style.fx.push(*fx);
        }
    }
}

mod apply_helper {
    /// Tri-state → marker option.
    pub fn set_marker<M>(slot: &mut Option<M>, mutation: Option<bool>, marker: M) {
        match mutation {
            Some(true) => *slot = Some(marker),
            Some(false) => *slot = None,
            None => {}
        }
    }
}

/// What to do when the tag's range ends.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseAction {
    /// Materialize an inline 3D-icon payload at the tag's position. Only meaningful
    /// for self-closing tags (the payload is zero-width).
    EmitAttachment { kind: AttachmentKind },
}

/// The unit of behavior a factory produces for one opened tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEffect {
    pub mutation: StyleMutation,
    pub close_action: Option<CloseAction>,
}

impl ActiveEffect {
    /// An effect that changes nothing (useful for tags that only exist for their
    /// close action).
    #[must_use]
    pub fn inert() -> Self { Self::default() }
}

/// Factory signature: decode attributes, produce the effect. Plain function pointers
/// keep the registry `Send + Sync + 'static` for free.
pub type EffectFactory = fn(&TagContext<'_>) -> ActiveEffect;

#[derive(Debug, Clone, Default)]
pub struct EffectRegistry {
    factories: FxHashMap<InlineString, EffectFactory>,
}

impl EffectRegistry {
    /// An empty registry: every tag is unknown (compiles to an inert span).
    #[must_use]
    pub fn new_empty() -> Self { Self::default() }

    /// The standard tag set. See [`crate::builtin_tags`] for the full list.
    #[must_use]
    pub fn with_builtin_tags() -> Self {
        let mut registry = Self::new_empty();
        builtin_tags::register_all(&mut registry);
        registry
    }

    /// Register a factory under a (case-folded) name. Re-registering a name replaces
    /// the previous factory — hosts can override built-ins.
    pub fn register(&mut self, name: &str, factory: EffectFactory) {
        self.factories
            .insert(inline_string(&name.to_ascii_lowercase()), factory);
    }

    pub fn register_with_aliases(
        &mut self,
        name: &str,
        factory: EffectFactory,
        aliases: &[&str],
    ) {
        self.register(name, factory);
        for alias in aliases {
            self.register(alias, factory);
        }
    }

    /// Case-insensitive lookup. `None` means "unknown tag" — the compiler treats the
    /// span as inert, never as an error.
    #[must_use]
    pub fn factory_for(&self, name: &str) -> Option<EffectFactory> {
        self.factories
            .get(inline_string(&name.to_ascii_lowercase()).as_str())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    fn marker_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
        let mut it = ActiveEffect::inert();
        it.mutation.bold = Some(true);
        it
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut registry = EffectRegistry::new_empty();
        registry.register("Wave", marker_factory);
        assert!(registry.factory_for("wave").is_some());
        assert!(registry.factory_for("WAVE").is_some());
        assert!(registry.factory_for("unknown").is_none());
    }

    #[test]
    fn test_aliases_share_a_factory() {
        let mut registry = EffectRegistry::new_empty();
        registry.register_with_aliases("gradient", marker_factory, &["grad", "g"]);
        assert!(registry.factory_for("grad").is_some());
        assert!(registry.factory_for("g").is_some());
    }

    #[test]
    fn test_reregistering_overrides() {
        fn other_factory(_ctx: &TagContext<'_>) -> ActiveEffect {
            let mut it = ActiveEffect::inert();
            it.mutation.italic = Some(true);
            it
        }

        let mut registry = EffectRegistry::new_empty();
        registry.register("x", marker_factory);
        registry.register("x", other_factory);

        let attribute = TagAttribute::new("x");
        let ctx = TagContext::new(&attribute);
        let effect = registry.factory_for("x").unwrap()(&ctx);
        assert_eq2!(effect.mutation.italic, Some(true));
        assert_eq2!(effect.mutation.bold, None);
    }

    #[test]
    fn test_mutation_tristate_attribs() {
        let mut style = GlyphStyle::base();
        style.shadow = true;
        style.attribs.bold = Some(style_attrib::Bold);

        let mutation = StyleMutation {
            bold: Some(false),
            shadow: Some(false),
            italic: Some(true),
            ..Default::default()
        };
        mutation.apply_to(&mut style);

        assert_eq2!(style.attribs.bold, None);
        assert_eq2!(style.attribs.italic, Some(style_attrib::Italic));
        assert!(!style.shadow);
    }

    #[test]
    fn test_fx_accumulate_across_mutations() {
        let mut style = GlyphStyle::base();
        let wave = StyleMutation {
            add_fx: smallvec::smallvec![GlyphFx::Wave(crate::WaveFx::default())],
            ..Default::default()
        };
        let shake = StyleMutation {
            add_fx: smallvec::smallvec![GlyphFx::Shake(crate::ShakeFx::default())],
            ..Default::default()
        };
        wave.apply_to(&mut style);
        shake.apply_to(&mut style);
        assert_eq2!(style.fx.len(), 2);
    }
}
