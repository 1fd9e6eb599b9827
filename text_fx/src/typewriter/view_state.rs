// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tracks when each named view (tooltip, screen, quest) most recently became visible.
//!
//! These timestamps are what typewriter tracks measure elapsed time against. The map
//! is coarsely synchronized per entry-point call — safe for concurrent read from the
//! render thread while input/GUI callbacks mutate it — and is never locked across the
//! rest of the pipeline.
//!
//! Context identity is an explicit host-supplied string (`"tooltip:diamond"`,
//! `"screen:quest_log"`). This core does not try to infer what is on screen.

use crate::Millis;
use rustc_hash::FxHashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct ViewStateTracker {
    /// context id → the timestamp it most recently became visible.
    contexts: Mutex<FxHashMap<String, Millis>>,
    /// The tooltip context currently on screen, if any.
    current_tooltip: Mutex<Option<String>>,
    /// The screen context currently open, if any.
    current_screen: Mutex<Option<String>>,
}

impl ViewStateTracker {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// The view-start timestamp for a context, auto-created at `now` on first read
    /// (an unseen context's clock starts the moment something asks about it).
    pub fn view_start(&self, context_id: &str, now: Millis) -> Millis {
        let mut contexts = self.contexts.lock().expect("view state lock poisoned");
        *contexts.entry(context_id.to_string()).or_insert(now)
    }

    /// Record that a view just became visible, restarting any typewriter tracks keyed
    /// to it. Idempotent for a given `now`: marking an already-marked context with
    /// the same timestamp is a no-op.
    pub fn mark_view_started(&self, context_id: &str, now: Millis) {
        tracing::debug!(context_id, now = now.as_u64(), "view started");
        let mut contexts = self.contexts.lock().expect("view state lock poisoned");
        contexts.insert(context_id.to_string(), now);
    }

    /// Called by the host whenever the hovered tooltip changes. `None` means no
    /// tooltip is showing. Only a *change* of context restarts the clock — a tooltip
    /// that stays visible frame after frame must not restart (no jitter).
    pub fn update_tooltip_context(&self, maybe_context_id: Option<&str>, now: Millis) {
        let mut current = self
            .current_tooltip
            .lock()
            .expect("view state lock poisoned");
        let changed = current.as_deref() != maybe_context_id;
        if !changed {
            return;
        }
        *current = maybe_context_id.map(str::to_string);
        drop(current);
        if let Some(context_id) = maybe_context_id {
            self.mark_view_started(context_id, now);
        }
    }

    /// A screen (inventory, quest log, dialog) opened.
    pub fn mark_screen_opened(&self, screen_id: &str, now: Millis) {
        let mut current = self.current_screen.lock().expect("view state lock poisoned");
        *current = Some(screen_id.to_string());
        drop(current);
        self.mark_view_started(screen_id, now);
    }

    /// The current screen closed.
    pub fn mark_screen_closed(&self) {
        let mut current = self.current_screen.lock().expect("view state lock poisoned");
        *current = None;
    }

    #[must_use]
    pub fn current_screen(&self) -> Option<String> {
        self.current_screen
            .lock()
            .expect("view state lock poisoned")
            .clone()
    }

    /// Wholesale reset — resource reload, world unload.
    pub fn clear_all(&self) {
        tracing::debug!("view state cleared");
        self.contexts
            .lock()
            .expect("view state lock poisoned")
            .clear();
        *self
            .current_tooltip
            .lock()
            .expect("view state lock poisoned") = None;
        *self.current_screen.lock().expect("view state lock poisoned") = None;
    }
}
