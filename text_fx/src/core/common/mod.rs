// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod deterministic;
pub mod inline_types;
pub mod lru_cache;

// Re-export.
pub use deterministic::*;
pub use inline_types::*;
pub use lru_cache::*;
