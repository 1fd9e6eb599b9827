// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The cascading computed style for a run of glyphs.
//!
//! Styles cascade by snapshot, not by dispatch: when a tag opens, the compiler clones
//! the enclosing style, applies the tag's mutation, and pushes the result into an
//! arena; when the tag closes, the previous arena index is restored in O(1). Nothing
//! re-derives styles on close.

use crate::{FxColor, GlyphFx, GradientSpec, TypewriterTrack};
use smallvec::SmallVec;

/// Attribute marker newtypes (`Option<Bold>` reads better than a raw `bool` and
/// cannot be mixed up across fields).
pub mod style_attrib {
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct Bold;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct Italic;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct Underline;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct Strikethrough;

    /// Scrambled rendering (the host substitutes random glyphs of equal width). A
    /// static flag as far as this core is concerned.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct Obfuscated;
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyleAttribs {
    pub bold: Option<style_attrib::Bold>,
    pub italic: Option<style_attrib::Italic>,
    pub underline: Option<style_attrib::Underline>,
    pub strikethrough: Option<style_attrib::Strikethrough>,
    pub obfuscated: Option<style_attrib::Obfuscated>,
}

pub(crate) mod sizing {
    use super::{GlyphFx, SmallVec};

    /// Stacked effects per style; deep nesting spills.
    pub(crate) type VecFx = SmallVec<[GlyphFx; MAX_STACKED_FX]>;
    const MAX_STACKED_FX: usize = 4;
}

/// The style visible at one glyph position. Inner tags inherit-and-override the
/// enclosing style, except for `fx`, which *accumulates* — nested positional effects
/// compose additively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphStyle {
    /// `None` means "the host's default text color".
    pub color_fg: Option<FxColor>,
    pub color_bg: Option<FxColor>,
    pub attribs: StyleAttribs,
    /// Whether glyphs in this style cast a drop shadow.
    pub shadow: bool,
    /// Style-level color curve; evaluated before the positional effects and excluded
    /// from the shadow pass.
    pub gradient: Option<GradientSpec>,
    pub typewriter: Option<TypewriterTrack>,
    /// Per-glyph effects accumulated from every open tag, outermost first.
    pub fx: sizing::VecFx,
}

impl GlyphStyle {
    /// The base style of unstyled text.
    #[must_use]
    pub fn base() -> Self { Self::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_base_style_is_inert() {
        let style = GlyphStyle::base();
        assert_eq2!(style.color_fg, None);
        assert!(style.fx.is_empty());
        assert!(style.typewriter.is_none());
        assert!(!style.shadow);
    }
}
