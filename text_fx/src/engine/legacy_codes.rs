// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Legacy `§x` formatting codes.
//!
//! Older content embeds single-character formatting codes in the plain text itself.
//! The compiler treats each as a flat style mutation at the point it appears —
//! equivalent to a self-closing tag — and `§r` clears the whole tag stack back to the
//! text's base style. The two characters are consumed, never rendered.

use crate::FxColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCode {
    Color(FxColor),
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Obfuscated,
    Reset,
}

/// Decode the character following a `§`. Unknown codes yield [`None`] (the compiler
/// consumes them anyway and records a diagnostic).
#[must_use]
pub fn decode_legacy_code(code: char) -> Option<LegacyCode> {
    let it = match code.to_ascii_lowercase() {
        '0' => LegacyCode::Color(FxColor::from_rgb(0, 0, 0)),
        '1' => LegacyCode::Color(FxColor::from_rgb(0, 0, 170)),
        '2' => LegacyCode::Color(FxColor::from_rgb(0, 170, 0)),
        '3' => LegacyCode::Color(FxColor::from_rgb(0, 170, 170)),
        '4' => LegacyCode::Color(FxColor::from_rgb(170, 0, 0)),
        '5' => LegacyCode::Color(FxColor::from_rgb(170, 0, 170)),
        '6' => LegacyCode::Color(FxColor::from_rgb(255, 170, 0)),
        '7' => LegacyCode::Color(FxColor::from_rgb(170, 170, 170)),
        '8' => LegacyCode::Color(FxColor::from_rgb(85, 85, 85)),
        '9' => LegacyCode::Color(FxColor::from_rgb(85, 85, 255)),
        'a' => LegacyCode::Color(FxColor::from_rgb(85, 255, 85)),
        'b' => LegacyCode::Color(FxColor::from_rgb(85, 255, 255)),
        'c' => LegacyCode::Color(FxColor::from_rgb(255, 85, 85)),
        'd' => LegacyCode::Color(FxColor::from_rgb(255, 85, 255)),
        'e' => LegacyCode::Color(FxColor::from_rgb(255, 255, 85)),
        'f' => LegacyCode::Color(FxColor::from_rgb(255, 255, 255)),
        'k' => LegacyCode::Obfuscated,
        'l' => LegacyCode::Bold,
        'm' => LegacyCode::Strikethrough,
        'n' => LegacyCode::Underline,
        'o' => LegacyCode::Italic,
        'r' => LegacyCode::Reset,
        _ => return None,
    };
    Some(it)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_color_codes() {
        assert_eq2!(
            decode_legacy_code('c'),
            Some(LegacyCode::Color(FxColor::from_rgb(255, 85, 85)))
        );
        assert_eq2!(
            decode_legacy_code('0'),
            Some(LegacyCode::Color(FxColor::from_rgb(0, 0, 0)))
        );
    }

    #[test]
    fn test_attrib_codes_case_insensitive() {
        assert_eq2!(decode_legacy_code('L'), Some(LegacyCode::Bold));
        assert_eq2!(decode_legacy_code('k'), Some(LegacyCode::Obfuscated));
        assert_eq2!(decode_legacy_code('R'), Some(LegacyCode::Reset));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq2!(decode_legacy_code('z'), None);
        assert_eq2!(decode_legacy_code('§'), None);
    }
}
