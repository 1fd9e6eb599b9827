// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Structured payloads for `<item .../>` and `<entity .../>` tags.
//!
//! These are not text spans: a self-closing attachment tag occupies zero characters
//! of plain text and materializes as a payload for the host's separate 3D-icon
//! renderer, positioned at the glyph offset where the tag appeared.

use crate::TagAttribute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
         strum_macros::Display, strum_macros::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum AttachmentKind {
    Item,
    Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineAttachment {
    pub kind: AttachmentKind,
    /// Host-namespace identifier, e.g. `minecraft:diamond`.
    pub id: String,
    pub scale: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub rotation_degrees: f32,
    /// Optional named animation for the icon renderer.
    pub animation: Option<String>,
    /// Character offset in the plain text where the attachment sits.
    pub position: usize,
}

impl InlineAttachment {
    pub const MAX_SCALE: f32 = 16.0;

    /// Decode an attachment tag's attributes. The `id` defaults to empty (the host
    /// renders its "missing icon" placeholder rather than us failing).
    #[must_use]
    pub fn from_tag(kind: AttachmentKind, attribute: &TagAttribute, position: usize)
    -> Self {
        Self {
            kind,
            id: attribute.string("id").unwrap_or_default().to_string(),
            scale: attribute.float("scale", 1.0).clamp(0.01, Self::MAX_SCALE),
            x_offset: attribute.float("x", 0.0),
            y_offset: attribute.float("y", 0.0),
            rotation_degrees: attribute.float("rot", 0.0),
            animation: attribute.string("anim").map(str::to_string),
            position,
        }
    }
}
