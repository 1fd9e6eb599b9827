// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod color_utils;
pub mod fx_color;

// Re-export.
pub use color_utils::*;
pub use fx_color::*;
