// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The injectable render context.
//!
//! Everything that would otherwise be a process-wide singleton lives here instead:
//! the view-state tracker, the per-frame ordinal cache, the gradient table cache, the
//! track-id allocator, and the sampled config. Hosts typically create one per window;
//! tests create one per test with a fake clock and never touch global state.
//!
//! Cache invalidation is wholesale only, and other components can register an
//! observer callback to be notified when it happens (explicit registration at
//! startup — there is no reflective cross-module lookup here).

use crate::{DrawPass, FxColor, FxConfig, GlyphPos, GradientSpec, LayoutMetrics,
            LruCache, Millis, OrdinalCache, OrdinalStreamKey, TrackId,
            ViewStateTracker};
use std::sync::{Mutex,
                atomic::{AtomicU64, Ordering}};

/// Callback invoked when the context's caches are invalidated wholesale.
pub type InvalidationObserver = Box<dyn Fn() + Send + Sync>;

const GRADIENT_CACHE_CAPACITY: usize = 256;

pub struct RenderContext {
    view_states: ViewStateTracker,
    ordinal_cache: Mutex<OrdinalCache>,
    gradient_tables: Mutex<LruCache<u64, Vec<FxColor>>>,
    track_id_allocator: AtomicU64,
    config: Mutex<FxConfig>,
    layout: Mutex<LayoutMetrics>,
    invalidation_observers: Mutex<Vec<InvalidationObserver>>,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("view_states", &self.view_states)
            .field("config", &self.config)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl Default for RenderContext {
    fn default() -> Self { Self::new() }
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_states: ViewStateTracker::new(),
            ordinal_cache: Mutex::new(OrdinalCache::new()),
            gradient_tables: Mutex::new(LruCache::new(GRADIENT_CACHE_CAPACITY)),
            track_id_allocator: AtomicU64::new(1),
            config: Mutex::new(FxConfig::default()),
            layout: Mutex::new(LayoutMetrics::default()),
            invalidation_observers: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn view_states(&self) -> &ViewStateTracker { &self.view_states }

    /// Monotonic track-id allocation for anonymous typewriter spans. Ids are unique
    /// for the lifetime of this context.
    #[must_use]
    pub fn allocate_track_id(&self) -> TrackId {
        TrackId::Assigned(self.track_id_allocator.fetch_add(1, Ordering::Relaxed))
    }

    /// Sample the current config (the host may update it from another thread).
    #[must_use]
    pub fn config(&self) -> FxConfig { *self.config.lock().expect("config lock") }

    pub fn set_config(&self, config: FxConfig) {
        *self.config.lock().expect("config lock") = config;
    }

    #[must_use]
    pub fn layout_metrics(&self) -> LayoutMetrics {
        *self.layout.lock().expect("layout lock")
    }

    /// Called on GUI scale change. Implies a wholesale cache invalidation, since
    /// cached ordinal positions are in the old scale.
    pub fn set_layout_metrics(&self, layout: LayoutMetrics) {
        *self.layout.lock().expect("layout lock") = layout;
        self.invalidate_caches();
    }

    /// Start (or re-enter) the frame identified by `token`. Idempotent per token.
    pub fn begin_frame(&self, token: Millis) {
        self.ordinal_cache
            .lock()
            .expect("ordinal cache lock")
            .begin_frame(token);
    }

    /// Record a glyph position for typewriter ordinal tracking and return its reveal
    /// rank within its stream.
    #[must_use]
    pub fn observe_glyph(
        &self,
        context_id: &str,
        track_id: &TrackId,
        pass: DrawPass,
        pos: GlyphPos,
    ) -> usize {
        let layout = self.layout_metrics();
        let key = OrdinalStreamKey {
            context_id: context_id.to_string(),
            track_id: track_id.clone(),
            pass,
        };
        self.ordinal_cache
            .lock()
            .expect("ordinal cache lock")
            .observe_and_rank(&key, pos, layout.line_height, layout.avg_char_width)
    }

    /// The baked color table for a gradient spec, computed once and cached.
    #[must_use]
    pub fn gradient_table(&self, spec: &GradientSpec) -> Vec<FxColor> {
        let key = spec.cache_key();
        let mut tables = self.gradient_tables.lock().expect("gradient cache lock");
        if let Some(table) = tables.get(&key) {
            return table.clone();
        }
        let table = spec.build_table();
        tables.insert(key, table.clone());
        table
    }

    /// Register a callback to run whenever caches are invalidated wholesale.
    pub fn register_invalidation_observer(&self, observer: InvalidationObserver) {
        self.invalidation_observers
            .lock()
            .expect("observer lock")
            .push(observer);
    }

    /// Wholesale cache invalidation: GUI scale change, resource-pack reload, or an
    /// explicit clear. Never piecemeal.
    pub fn invalidate_caches(&self) {
        tracing::debug!("render context caches invalidated");
        self.gradient_tables
            .lock()
            .expect("gradient cache lock")
            .clear();
        self.ordinal_cache
            .lock()
            .expect("ordinal cache lock")
            .clear();
        for observer in self
            .invalidation_observers
            .lock()
            .expect("observer lock")
            .iter()
        {
            observer();
        }
    }

    /// Full reset for resource reload / world unload: caches and view timestamps.
    pub fn reset_all(&self) {
        self.invalidate_caches();
        self.view_states.clear_all();
    }
}
