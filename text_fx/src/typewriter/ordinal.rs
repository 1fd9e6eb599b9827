// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Visual reveal ordinals.
//!
//! Formatted text may be emitted out of visual order: a line-wrapped layout can render
//! bottom-up, and shadow/main passes interleave. Raw emission order is therefore
//! useless as a reveal ordinal — a typewriter must reveal top-to-bottom,
//! left-to-right, whatever order draw calls arrive in. So ordinals derive from each
//! glyph's *visual position*:
//!
//! ```text
//! ordinal = round(relative_line) * 10_000 + round(relative_x / avg_char_width)
//! ```
//!
//! where `relative_line` counts from the minimum Y seen for the stream and
//! `relative_x` from the minimum X seen on that glyph's line.
//!
//! Positions are cached per `(context, track, draw pass)` for the duration of one
//! render frame (identified by a frame-timestamp token) and rotated at the start of
//! the next. Ranking uses the *previous* frame's complete position set when one
//! exists: within a frame glyphs arrive one at a time, and ranking against a partial
//! set would mis-order the first frames of every line. Shadow and main passes are
//! independent streams, so a shadow glyph is never miscounted against the main
//! glyph's reveal state.

use crate::{Millis, TrackId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A glyph's layout position (the host's pre-effect pen position for the glyph).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphPos {
    pub x: f32,
    pub y: f32,
}

/// Shadow and main draws are tracked as independent ordinal streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
         strum_macros::Display)]
pub enum DrawPass {
    Main,
    Shadow,
}

/// Key for one ordinal stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrdinalStreamKey {
    pub context_id: String,
    pub track_id: TrackId,
    pub pass: DrawPass,
}

/// Sub-pixel quantization for position identity (1/16 of a unit).
const POSITION_QUANT: f32 = 16.0;

#[allow(clippy::cast_possible_truncation)]
fn quantize(pos: GlyphPos) -> (i32, i32) {
    (
        (pos.x * POSITION_QUANT).round() as i32,
        (pos.y * POSITION_QUANT).round() as i32,
    )
}

fn dequantize(q: i32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let it = q as f32 / POSITION_QUANT;
    it
}

/// Positions observed for one stream, double-buffered across frames.
#[derive(Debug, Default)]
pub struct OrdinalStream {
    current: Vec<(i32, i32)>,
    previous: Vec<(i32, i32)>,
}

impl OrdinalStream {
    fn observe(&mut self, q: (i32, i32)) {
        if !self.current.contains(&q) {
            self.current.push(q);
        }
    }

    /// The position set ordinals are computed against: last complete frame if there
    /// is one, else whatever has been observed so far this frame.
    fn basis(&self) -> &[(i32, i32)] {
        if self.previous.is_empty() {
            &self.current
        } else {
            &self.previous
        }
    }

    /// The visual ordinal of a position. The queried position participates in the
    /// min computations even if the basis predates it.
    fn ordinal_of(&self, q: (i32, i32), line_height: f32, avg_char_width: f32) -> i64 {
        let line_height = line_height.max(1.0);
        let avg_char_width = avg_char_width.max(0.1);
        let basis = self.basis();

        let min_y = basis
            .iter()
            .map(|&(_, y)| y)
            .chain(std::iter::once(q.1))
            .min()
            .unwrap_or(q.1);

        let line_of = |y_q: i32| -> i64 {
            let relative_y = dequantize(y_q - min_y);
            #[allow(clippy::cast_possible_truncation)]
            let it = (relative_y / line_height).round() as i64;
            it
        };

        let line = line_of(q.1);
        let min_x = basis
            .iter()
            .filter(|&&(_, y)| line_of(y) == line)
            .map(|&(x, _)| x)
            .chain(std::iter::once(q.0))
            .min()
            .unwrap_or(q.0);

        let relative_x = dequantize(q.0 - min_x);
        #[allow(clippy::cast_possible_truncation)]
        let column = (relative_x / avg_char_width).round() as i64;

        line * 10_000 + column
    }

    /// Dense reveal rank: how many basis positions have a strictly smaller ordinal.
    fn rank_of(&self, q: (i32, i32), line_height: f32, avg_char_width: f32) -> usize {
        let own = self.ordinal_of(q, line_height, avg_char_width);
        self.basis()
            .iter()
            .filter(|&&other| {
                other != q && self.ordinal_of(other, line_height, avg_char_width) < own
            })
            .count()
    }
}

/// All ordinal streams for one frame, rotated by the frame token.
#[derive(Debug, Default)]
pub struct OrdinalCache {
    streams: FxHashMap<OrdinalStreamKey, OrdinalStream>,
    frame_token: Option<Millis>,
}

impl OrdinalCache {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Rotate buffers when a new frame begins. Idempotent within a frame (the token
    /// is the frame's clock sample).
    pub fn begin_frame(&mut self, token: Millis) {
        if self.frame_token == Some(token) {
            return;
        }
        self.frame_token = Some(token);
        self.streams.retain(|_, stream| {
            stream.previous = std::mem::take(&mut stream.current);
            // Streams that produced nothing for a whole frame are gone (their text
            // stopped rendering); drop them instead of leaking.
            !stream.previous.is_empty()
        });
    }

    /// Record a glyph position for this frame and return its reveal rank.
    pub fn observe_and_rank(
        &mut self,
        key: &OrdinalStreamKey,
        pos: GlyphPos,
        line_height: f32,
        avg_char_width: f32,
    ) -> usize {
        let q = quantize(pos);
        let stream = self.streams.entry(key.clone()).or_default();
        stream.observe(q);
        stream.rank_of(q, line_height, avg_char_width)
    }

    /// The ordinal itself (mostly for tests and debugging overlays).
    #[must_use]
    pub fn ordinal_of(
        &self,
        key: &OrdinalStreamKey,
        pos: GlyphPos,
        line_height: f32,
        avg_char_width: f32,
    ) -> Option<i64> {
        self.streams
            .get(key)
            .map(|stream| stream.ordinal_of(quantize(pos), line_height, avg_char_width))
    }

    /// Wholesale clear (resource reload, GUI scale change).
    pub fn clear(&mut self) {
        self.streams.clear();
        self.frame_token = None;
    }
}
