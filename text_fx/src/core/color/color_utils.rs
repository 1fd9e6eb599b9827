// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Color math shared by the gradient and rainbow effects: RGB/HSV interpolation, the
//! sine color wheel, and a luminance-based contrast helper.

use crate::FxColor;
use std::f32::consts::PI;

pub struct ColorUtils;

impl ColorUtils {
    /// Linear interpolation between two colors in RGB space. `t` is clamped to
    /// `[0, 1]`. Alpha interpolates too.
    #[must_use]
    pub fn lerp_rgb(from: FxColor, to: FxColor, t: f32) -> FxColor {
        let t = t.clamp(0.0, 1.0);
        let lerp_channel = |a: u8, b: u8| -> u8 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let it = (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
            it
        };
        FxColor::from_rgba(
            lerp_channel(from.red, to.red),
            lerp_channel(from.green, to.green),
            lerp_channel(from.blue, to.blue),
            lerp_channel(from.alpha, to.alpha),
        )
    }

    /// Interpolation between two colors through HSV space, taking the short way around
    /// the hue circle. Produces livelier in-between colors than [`Self::lerp_rgb`] for
    /// saturated endpoints.
    #[must_use]
    pub fn lerp_hsv(from: FxColor, to: FxColor, t: f32) -> FxColor {
        let t = t.clamp(0.0, 1.0);
        let (h1, s1, v1) = Self::rgb_to_hsv(from);
        let (h2, s2, v2) = Self::rgb_to_hsv(to);

        // Shortest angular distance on the hue circle.
        let mut hue_delta = h2 - h1;
        if hue_delta > 180.0 {
            hue_delta -= 360.0;
        } else if hue_delta < -180.0 {
            hue_delta += 360.0;
        }

        let hue = (h1 + hue_delta * t).rem_euclid(360.0);
        let sat = s1 + (s2 - s1) * t;
        let val = v1 + (v2 - v1) * t;
        let alpha_t = f32::from(from.alpha)
            + (f32::from(to.alpha) - f32::from(from.alpha)) * t;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let alpha = alpha_t.round() as u8;
        Self::hsv_to_rgb(hue, sat, val).with_alpha(alpha)
    }

    /// Convert HSV to RGB. `hue` in degrees (wrapped), `saturation`/`value` clamped to
    /// `[0, 1]`.
    #[must_use]
    pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> FxColor {
        let hue = hue.rem_euclid(360.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let value = value.clamp(0.0, 1.0);

        let c = value * saturation;
        let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = value - c;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sector = (hue / 60.0) as u32;
        let (r, g, b) = match sector {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_channel = |channel: f32| -> u8 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let it = ((channel + m) * 255.0).round() as u8;
            it
        };
        FxColor::from_rgb(to_channel(r), to_channel(g), to_channel(b))
    }

    /// Convert RGB to HSV: `(hue degrees, saturation, value)`.
    #[must_use]
    pub fn rgb_to_hsv(color: FxColor) -> (f32, f32, f32) {
        let r = f32::from(color.red) / 255.0;
        let g = f32::from(color.green) / 255.0;
        let b = f32::from(color.blue) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta).rem_euclid(6.0))
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        (hue, saturation, max)
    }

    /// The classic sine color wheel: three phase-shifted sinusoids, one per channel.
    /// `position` is a continuous coordinate along the wheel (seed, glyph index, or a
    /// blend of both).
    #[must_use]
    pub fn sine_wheel(position: f32, frequency: f32, spread: f32) -> FxColor {
        // Spread is a divisor, floor it away from zero.
        let spread = spread.max(f32::EPSILON);
        let i = frequency * position / spread;
        let to_channel = |phase: f32| -> u8 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let it = ((i + phase).sin() * 127.0 + 128.0) as u8;
            it
        };
        FxColor::from_rgb(
            to_channel(0.0),
            to_channel(PI * 2.0 / 3.0),
            to_channel(PI * 4.0 / 3.0),
        )
    }

    /// More info on luminance:
    /// - <https://stackoverflow.com/a/49092130/2085356>
    /// - <https://stackoverflow.com/a/3118280/2085356>
    #[must_use]
    pub fn calc_fg_color(bg: FxColor) -> FxColor {
        let luminance = 0.2126 * f32::from(bg.red)
            + 0.7152 * f32::from(bg.green)
            + 0.0722 * f32::from(bg.blue);
        if luminance < 140.0 {
            FxColor::from_rgb(255, 255, 255)
        } else {
            FxColor::from_rgb(0, 0, 0)
        }
    }
}
