// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Time unit newtype used across the crate.
//!
//! The host samples its monotonic clock once per frame and passes the value in. No
//! function in this crate reads a system clock, so every computation can be replayed
//! with a fake clock in tests.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// Milliseconds on the host's monotonic clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
         Deserialize)]
pub struct Millis(pub u64);

/// Constructor function for [`Millis`].
pub fn millis(arg_val: impl Into<u64>) -> Millis { Millis(arg_val.into()) }

impl Millis {
    #[must_use]
    pub fn as_u64(&self) -> u64 { self.0 }

    #[must_use]
    pub fn as_secs_f32(&self) -> f32 {
        // Precision loss is fine here, animation phase does not need more than f32.
        #[allow(clippy::cast_precision_loss)]
        let it = self.0 as f32 / 1_000.0;
        it
    }

    /// Saturating subtraction, clamped at zero (a clock that appears to run backwards
    /// must not underflow).
    #[must_use]
    pub fn saturating_sub(&self, other: Millis) -> Millis {
        Millis(self.0.saturating_sub(other.0))
    }
}

impl From<u64> for Millis {
    fn from(it: u64) -> Self { Millis(it) }
}

impl Add for Millis {
    type Output = Millis;
    fn add(self, rhs: Millis) -> Millis { Millis(self.0 + rhs.0) }
}

impl AddAssign for Millis {
    fn add_assign(&mut self, rhs: Millis) { self.0 += rhs.0; }
}

impl Sub for Millis {
    type Output = Millis;
    /// Saturating, see [`Millis::saturating_sub`].
    fn sub(self, rhs: Millis) -> Millis { self.saturating_sub(rhs) }
}
