// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A parsed tag: its (lowercased) name and its raw string parameters, with lenient
//! typed accessors.
//!
//! Markup is authored by users and content packs, so the accessors never fail: a
//! malformed number, bool, or color silently yields the documented default. This is
//! load-bearing for the "markup must never crash rendering" contract and is
//! unit-tested per effect in the registry.

use crate::{FxColor, InlineString, inline_string};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// These are sized to allow for stack allocation rather than heap allocation. Most
/// tags carry at most a handful of parameters.
pub(crate) mod sizing {
    use super::{InlineString, SmallVec};

    pub(crate) type VecParams = SmallVec<[(InlineString, InlineString); MAX_PARAMS]>;
    const MAX_PARAMS: usize = 4;
}

/// An immutable `(tag name, params)` pair. Keys are case-folded to lowercase on
/// storage; values are kept raw. Bare keys (`<fade fast>`) are stored with the value
/// `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttribute {
    id: InlineString,
    params: sizing::VecParams,
}

impl TagAttribute {
    #[must_use]
    pub fn new(arg_id: &str) -> Self {
        Self {
            id: inline_string(&arg_id.to_ascii_lowercase()),
            params: sizing::VecParams::new(),
        }
    }

    /// Builder-style param insertion (used by tests and programmatic span
    /// construction; the tokenizer goes through [`Self::insert_param`]).
    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.insert_param(key, value);
        self
    }

    /// Keys are case-folded; inserting an existing key overwrites its value (last
    /// occurrence in the tag body wins).
    pub fn insert_param(&mut self, key: &str, value: &str) {
        let key = key.to_ascii_lowercase();
        if let Some(slot) = self.params.iter_mut().find(|(k, _)| k.as_str() == key) {
            slot.1 = inline_string(value);
            return;
        }
        self.params.push((inline_string(&key), inline_string(value)));
    }

    #[must_use]
    pub fn id(&self) -> &str { self.id.as_str() }

    #[must_use]
    pub fn param_count(&self) -> usize { self.params.len() }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw string lookup (case-insensitive key).
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.params
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// The first key that was given without a value (`<color red>`). Lets factories
    /// accept a single positional-ish argument without a structured grammar.
    #[must_use]
    pub fn first_bare_key(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(_, v)| v.as_str() == "true")
            .map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn float(&self, key: &str, default: f32) -> f32 {
        self.optional_float(key).unwrap_or(default)
    }

    #[must_use]
    pub fn optional_float(&self, key: &str) -> Option<f32> {
        self.string(key)
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|it| it.is_finite())
    }

    #[must_use]
    pub fn int(&self, key: &str, default: i32) -> i32 {
        self.string(key)
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .unwrap_or(default)
    }

    /// `true`/`yes`/`on`/`1` are truthy, `false`/`no`/`off`/`0` are falsy, anything
    /// else yields the default.
    #[must_use]
    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.string(key).map(str::trim) {
            Some("true" | "yes" | "on" | "1") => true,
            Some("false" | "no" | "off" | "0") => false,
            _ => default,
        }
    }

    #[must_use]
    pub fn color(&self, key: &str, default: FxColor) -> FxColor {
        self.string(key)
            .map_or(default, |raw| FxColor::parse_lenient(raw, default))
    }
}
