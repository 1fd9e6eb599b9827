// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! RGBA color value type used by styles and glyph draw records.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

/// Creates a [`FxColor`] instance using various convenient syntaxes.
///
/// # Usage
///
/// ```rust
/// use r3bl_text_fx::fx_color;
///
/// // Named colors.
/// let red = fx_color!(red);
/// let gold = fx_color!(gold);
///
/// // RGB / RGBA values.
/// let custom = fx_color!(255, 128, 0);
/// let translucent = fx_color!(255, 128, 0, 128);
/// ```
///
/// For hex parsing use [`FxColor::try_from_hex`] (fallible) or
/// [`FxColor::parse_lenient`] (never fails, falls back to the given default).
#[macro_export]
macro_rules! fx_color {
    (black) => {
        $crate::FxColor::from_rgb(0, 0, 0)
    };

    (white) => {
        $crate::FxColor::from_rgb(255, 255, 255)
    };

    (red) => {
        $crate::FxColor::from_rgb(255, 85, 85)
    };

    (green) => {
        $crate::FxColor::from_rgb(85, 255, 85)
    };

    (blue) => {
        $crate::FxColor::from_rgb(85, 85, 255)
    };

    (yellow) => {
        $crate::FxColor::from_rgb(255, 255, 85)
    };

    (aqua) => {
        $crate::FxColor::from_rgb(85, 255, 255)
    };

    (light_purple) => {
        $crate::FxColor::from_rgb(255, 85, 255)
    };

    (gold) => {
        $crate::FxColor::from_rgb(255, 170, 0)
    };

    (gray) => {
        $crate::FxColor::from_rgb(170, 170, 170)
    };

    (dark_gray) => {
        $crate::FxColor::from_rgb(85, 85, 85)
    };

    (
        $arg_r:expr, $arg_g:expr, $arg_b:expr $(,)?
    ) => {
        $crate::FxColor::from_rgb($arg_r, $arg_g, $arg_b)
    };

    (
        $arg_r:expr, $arg_g:expr, $arg_b:expr, $arg_a:expr $(,)?
    ) => {
        $crate::FxColor::from_rgba($arg_r, $arg_g, $arg_b, $arg_a)
    };
}

/// An RGBA color. [`Default`] is opaque white (the "unstyled glyph" color).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FxColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Default for FxColor {
    fn default() -> Self { FxColor::from_rgb(255, 255, 255) }
}

impl Debug for FxColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.alpha == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl FxColor {
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    #[must_use]
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA` (leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not one of the recognized hex forms.
    pub fn try_from_hex(arg_hex: &str) -> Result<Self, ParseHexColorError> {
        let hex = arg_hex.trim().trim_start_matches('#');
        let parse_pair = |chunk: &str| u8::from_str_radix(chunk, 16);

        match hex.len() {
            3 => {
                // Short form: each nibble doubled, e.g. "f80" == "ff8800".
                let mut channels = [0u8; 3];
                for (index, ch) in hex.chars().enumerate() {
                    let nibble = ch
                        .to_digit(16)
                        .ok_or(ParseHexColorError::InvalidDigit)?;
                    #[allow(clippy::cast_possible_truncation)]
                    {
                        channels[index] = (nibble * 16 + nibble) as u8;
                    }
                }
                Ok(Self::from_rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let red = parse_pair(&hex[0..2])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                let green = parse_pair(&hex[2..4])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                let blue = parse_pair(&hex[4..6])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                Ok(Self::from_rgb(red, green, blue))
            }
            8 => {
                let red = parse_pair(&hex[0..2])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                let green = parse_pair(&hex[2..4])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                let blue = parse_pair(&hex[4..6])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                let alpha = parse_pair(&hex[6..8])
                    .map_err(|_| ParseHexColorError::InvalidDigit)?;
                Ok(Self::from_rgba(red, green, blue, alpha))
            }
            _ => Err(ParseHexColorError::InvalidLength),
        }
    }

    /// Lenient color parsing for attribute values: tries the named-color table first,
    /// then hex. Returns `default` on any failure — attribute parsing never throws.
    #[must_use]
    pub fn parse_lenient(arg_val: &str, default: FxColor) -> FxColor {
        let val = arg_val.trim();
        if let Some(named) = Self::from_named(val) {
            return named;
        }
        Self::try_from_hex(val).unwrap_or(default)
    }

    /// The classic 16-color names (and a few synonyms) used by legacy formatting
    /// codes and by content authors who don't want to write hex.
    #[must_use]
    pub fn from_named(arg_name: &str) -> Option<FxColor> {
        let it = match arg_name.to_ascii_lowercase().as_str() {
            "black" => fx_color!(black),
            "dark_blue" => FxColor::from_rgb(0, 0, 170),
            "dark_green" => FxColor::from_rgb(0, 170, 0),
            "dark_aqua" => FxColor::from_rgb(0, 170, 170),
            "dark_red" => FxColor::from_rgb(170, 0, 0),
            "dark_purple" => FxColor::from_rgb(170, 0, 170),
            "gold" | "orange" => fx_color!(gold),
            "gray" | "grey" => fx_color!(gray),
            "dark_gray" | "dark_grey" => fx_color!(dark_gray),
            "blue" => fx_color!(blue),
            "green" => fx_color!(green),
            "aqua" | "cyan" => fx_color!(aqua),
            "red" => fx_color!(red),
            "light_purple" | "magenta" | "pink" => fx_color!(light_purple),
            "yellow" => fx_color!(yellow),
            "white" => fx_color!(white),
            _ => return None,
        };
        Some(it)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    /// Multiply the alpha channel by a `[0, 1]` factor (clamped).
    #[must_use]
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let alpha = (f32::from(self.alpha) * factor).round() as u8;
        Self { alpha, ..self }
    }
}

/// Why a hex color string failed to parse. See [`FxColor::try_from_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseHexColorError {
    InvalidLength,
    InvalidDigit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_hex_parsing_forms() {
        assert_eq2!(
            FxColor::try_from_hex("#ff8000"),
            Ok(FxColor::from_rgb(255, 128, 0))
        );
        assert_eq2!(
            FxColor::try_from_hex("ff8000"),
            Ok(FxColor::from_rgb(255, 128, 0))
        );
        assert_eq2!(
            FxColor::try_from_hex("#f80"),
            Ok(FxColor::from_rgb(255, 136, 0))
        );
        assert_eq2!(
            FxColor::try_from_hex("#ff800080"),
            Ok(FxColor::from_rgba(255, 128, 0, 128))
        );
        assert_eq2!(
            FxColor::try_from_hex("#ff80"),
            Err(ParseHexColorError::InvalidLength)
        );
        assert_eq2!(
            FxColor::try_from_hex("zzzzzz"),
            Err(ParseHexColorError::InvalidDigit)
        );
    }

    #[test]
    fn test_lenient_parse_falls_back_to_default() {
        let default = fx_color!(white);
        assert_eq2!(FxColor::parse_lenient("red", default), fx_color!(red));
        assert_eq2!(
            FxColor::parse_lenient("00FF00", default),
            FxColor::from_rgb(0, 255, 0)
        );
        assert_eq2!(FxColor::parse_lenient("not-a-color", default), default);
        assert_eq2!(FxColor::parse_lenient("", default), default);
    }

    #[test]
    fn test_scale_alpha_clamps() {
        let color = FxColor::from_rgba(10, 20, 30, 200);
        assert_eq2!(color.scale_alpha(2.0).alpha, 200);
        assert_eq2!(color.scale_alpha(-1.0).alpha, 0);
        assert_eq2!(color.scale_alpha(0.5).alpha, 100);
    }
}
