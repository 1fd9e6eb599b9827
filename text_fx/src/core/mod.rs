// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Foundation value types shared by every other area of the crate: colors, the
//! attributed-span data model, time units, and deterministic hashing.

// Attach sources.
pub mod attribute;
pub mod color;
pub mod common;
pub mod decl_macros;
pub mod units;

// Re-export.
pub use attribute::*;
pub use color::*;
pub use common::*;
pub use units::*;
