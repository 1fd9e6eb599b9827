// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Reveal-count computation and the track state machine.
//!
//! `revealed = floor(elapsed_50ms_ticks × speed_multiplier)`, clamped at zero, where
//! elapsed time is measured from the track's context view-start (plus the track's
//! configured delay). The count is monotonic as long as the context is not reset.

use crate::{Millis, TypewriterTrack, millis};

/// One reveal tick.
pub const TICK_MS: u64 = 50;

/// Extra pause (in reveal units) appended to a cycling track before it restarts.
pub const CYCLE_PAUSE_UNITS: usize = 20;

/// Observable lifecycle of a track against one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TrackState {
    /// Elapsed time is still inside the configured delay.
    Timed,
    /// Some but not all units are revealed.
    Revealing,
    /// Every unit is revealed (a cycling track is never complete).
    Complete,
}

/// Number of units (chars or words, per the track's mode) revealed at `now` for a
/// context that became visible at `view_start`.
#[must_use]
pub fn reveal_count(
    track: &TypewriterTrack,
    view_start: Millis,
    now: Millis,
    total_units: usize,
) -> usize {
    let elapsed = now.saturating_sub(view_start + millis(track.delay_ms));
    let ticks = elapsed.as_u64() / TICK_MS;

    #[allow(clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss)]
    let raw = (ticks as f64 * f64::from(track.speed_multiplier)).floor() as usize;

    if track.cycle && total_units > 0 {
        raw % (total_units + CYCLE_PAUSE_UNITS)
    } else {
        raw
    }
}

/// Derive the track's observable state at `now`.
#[must_use]
pub fn track_state(
    track: &TypewriterTrack,
    view_start: Millis,
    now: Millis,
    total_units: usize,
) -> TrackState {
    let revealed = reveal_count(track, view_start, now, total_units);
    if revealed == 0 {
        TrackState::Timed
    } else if revealed < total_units || track.cycle {
        TrackState::Revealing
    } else {
        TrackState::Complete
    }
}
