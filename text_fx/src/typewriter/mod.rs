// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Progressive reveal ("typewriter") and the view-visibility state it is keyed to.
//!
//! A *track* is an independent reveal counter; spans sharing a track id reveal in
//! lockstep. A *view context* (tooltip, screen, quest) supplies the "became visible"
//! timestamp that a track measures elapsed time against — re-showing the same logical
//! text restarts its animation, while continuous visibility never does.

// Attach sources.
pub mod fx_config;
pub mod ordinal;
pub mod render_context;
pub mod reveal;
pub mod typewriter_track;
pub mod view_state;

// Re-export.
pub use fx_config::*;
pub use ordinal::*;
pub use render_context::*;
pub use reveal::*;
pub use typewriter_track::*;
pub use view_state::*;
