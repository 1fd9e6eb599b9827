// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The typewriter track attached to a compiled style.

use crate::{InlineString, TagAttribute, inline_string};
use serde::{Deserialize, Serialize};

/// Reveal granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
         strum_macros::Display, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TypewriterMode {
    Off,
    #[default]
    Char,
    Word,
}

/// Identity of a reveal counter. Two spans with the same id advance together. Spans
/// without an explicit id get a unique integer assigned at compile time (see
/// [`crate::RenderContext::allocate_track_id`]), unless an enclosing tag already
/// carries a track — nested typewriter spans share a single progressive reveal unless
/// explicitly re-seeded with an `id` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackId {
    /// Shared by name across spans (and even across separate compiles).
    Explicit(InlineString),
    /// Compiler-assigned unique integer.
    Assigned(u64),
    /// Not yet resolved (factory output before the compiler assigns one).
    Unassigned,
}

impl TrackId {
    /// The view-context key used when the host does not supply one: anonymous tracks
    /// are keyed by their own identity.
    #[must_use]
    pub fn fallback_context_key(&self) -> String {
        match self {
            TrackId::Explicit(id) => format!("track:{id}"),
            TrackId::Assigned(id) => format!("track:#{id}"),
            TrackId::Unassigned => "track:unassigned".to_string(),
        }
    }
}

/// `<typewriter s=20 d=0 c=false by=char id=...>` (alias `type`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypewriterTrack {
    pub mode: TypewriterMode,
    /// Reveal speed as a multiplier over the base rate of one unit per 50 ms tick
    /// (so 1.0 ⇔ 20 chars/sec). Always > 0.
    pub speed_multiplier: f32,
    /// Initial hold before the first unit appears.
    pub delay_ms: u64,
    /// Restart from zero after completing (with a short pause).
    pub cycle: bool,
    pub track_id: TrackId,
}

impl Default for TypewriterTrack {
    fn default() -> Self {
        Self {
            mode: TypewriterMode::Char,
            speed_multiplier: 1.0,
            delay_ms: 0,
            cycle: false,
            track_id: TrackId::Unassigned,
        }
    }
}

impl TypewriterTrack {
    /// Base reveal rate in characters per second at `speed_multiplier` 1.0.
    pub const BASE_UNITS_PER_SEC: f32 = 20.0;
    pub const MIN_SPEED_MULTIPLIER: f32 = 0.001;
    pub const MAX_SPEED_MULTIPLIER: f32 = 1_000.0;
    pub const MAX_DELAY_MS: u64 = 600_000;

    #[must_use]
    pub fn from_tag(attribute: &TagAttribute) -> Self {
        let chars_per_sec = attribute.float("s", Self::BASE_UNITS_PER_SEC);
        let speed_multiplier = (chars_per_sec / Self::BASE_UNITS_PER_SEC)
            .clamp(Self::MIN_SPEED_MULTIPLIER, Self::MAX_SPEED_MULTIPLIER);

        let delay_secs = attribute.float("d", 0.0).max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delay_ms = ((delay_secs * 1_000.0) as u64).min(Self::MAX_DELAY_MS);

        let mode = attribute
            .string("by")
            .and_then(|raw| raw.trim().parse::<TypewriterMode>().ok())
            .unwrap_or(TypewriterMode::Char);

        let track_id = attribute
            .string("id")
            .map_or(TrackId::Unassigned, |id| TrackId::Explicit(inline_string(id)));

        Self {
            mode,
            speed_multiplier,
            delay_ms,
            cycle: attribute.bool("c", false),
            track_id,
        }
    }

    /// Same track, different id — used by the compiler when resolving inheritance and
    /// assignment.
    #[must_use]
    pub fn with_track_id(mut self, track_id: TrackId) -> Self {
        self.track_id = track_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_defaults_from_empty_tag() {
        let track = TypewriterTrack::from_tag(&TagAttribute::new("typewriter"));
        assert_eq2!(track.mode, TypewriterMode::Char);
        assert_eq2!(track.speed_multiplier, 1.0);
        assert_eq2!(track.delay_ms, 0);
        assert!(!track.cycle);
        assert_eq2!(track.track_id, TrackId::Unassigned);
    }

    #[test]
    fn test_speed_attribute_is_chars_per_second() {
        let attribute = TagAttribute::new("typewriter").with_param("s", "40");
        let track = TypewriterTrack::from_tag(&attribute);
        assert_eq2!(track.speed_multiplier, 2.0);
    }

    #[test]
    fn test_zero_and_negative_speed_clamp_to_minimum() {
        for bad in ["0", "-5"] {
            let attribute = TagAttribute::new("typewriter").with_param("s", bad);
            let track = TypewriterTrack::from_tag(&attribute);
            assert_eq2!(track.speed_multiplier, TypewriterTrack::MIN_SPEED_MULTIPLIER);
        }
    }

    #[test]
    fn test_word_mode_and_explicit_id() {
        let attribute = TagAttribute::new("typewriter")
            .with_param("by", "word")
            .with_param("id", "quest_line")
            .with_param("d", "1.5")
            .with_param("c", "true");
        let track = TypewriterTrack::from_tag(&attribute);
        assert_eq2!(track.mode, TypewriterMode::Word);
        assert_eq2!(track.delay_ms, 1_500);
        assert!(track.cycle);
        assert_eq2!(
            track.track_id,
            TrackId::Explicit(crate::inline_string("quest_line"))
        );
    }

    #[test]
    fn test_bad_mode_falls_back_to_char() {
        let attribute = TagAttribute::new("typewriter").with_param("by", "paragraph");
        let track = TypewriterTrack::from_tag(&attribute);
        assert_eq2!(track.mode, TypewriterMode::Char);
    }
}
