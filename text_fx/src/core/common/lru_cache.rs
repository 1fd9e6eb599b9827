// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Generic LRU (Least Recently Used) cache implementation.
//!
//! Used for the gradient color tables, which are expensive to recompute per glyph per
//! frame. Uses [`rustc_hash::FxHashMap`] for fast lookups: keys are trusted internal
//! data (not user input), no cryptographic security is required, and lookups sit on
//! the per-frame hot path.
//!
//! Invalidation is wholesale only ([`LruCache::clear`]) — piecemeal invalidation is a
//! reliable source of stale-entry bugs when the GUI scale or resource pack changes.

use rustc_hash::FxHashMap;
use std::{hash::Hash,
          sync::{Arc, Mutex}};

/// Entry in the LRU cache containing the value and access metadata.
#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    access_count: u64,
}

/// A generic LRU cache. When the cache reaches capacity, the least recently accessed
/// item is evicted to make room for new entries. Access patterns are tracked using a
/// monotonic counter to ensure true LRU behavior.
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: FxHashMap<K, CacheEntry<V>>,
    capacity: usize,
    access_counter: u64,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a new cache with the given capacity (floored at 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            capacity: capacity.max(1),
            access_counter: 0,
        }
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.access_counter += 1;
        let counter = self.access_counter;
        self.map.get_mut(key).map(|entry| {
            entry.access_count = counter;
            &entry.value
        })
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.access_counter += 1;

        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            self.evict_least_recently_used();
        }

        self.map.insert(key, CacheEntry {
            value,
            access_count: self.access_counter,
        });
    }

    pub fn clear(&mut self) { self.map.clear(); }

    #[must_use]
    pub fn len(&self) -> usize { self.map.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    fn evict_least_recently_used(&mut self) {
        let maybe_lru_key = self
            .map
            .iter()
            .min_by_key(|(_, entry)| entry.access_count)
            .map(|(key, _)| key.clone());
        if let Some(lru_key) = maybe_lru_key {
            self.map.remove(&lru_key);
        }
    }
}

/// Thread-safe wrapper: concurrent read from a render thread while being mutated from
/// event callbacks is the expected access pattern.
pub type ThreadSafeLruCache<K, V> = Arc<Mutex<LruCache<K, V>>>;

#[must_use]
pub fn new_threadsafe_lru_cache<K: Eq + Hash + Clone, V>(
    capacity: usize,
) -> ThreadSafeLruCache<K, V> {
    Arc::new(Mutex::new(LruCache::new(capacity)))
}
