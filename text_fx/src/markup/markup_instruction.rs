// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The flat instruction stream produced by the tokenizer.

use crate::TagAttribute;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
         strum_macros::Display)]
pub enum InstructionKind {
    Open,
    Close,
}

/// One open/close event at a character position in the plain text.
///
/// Instructions are ordered ascending by `position`. Instructions sharing a position
/// form a batch; the compiler applies all [`InstructionKind::Close`] before all
/// [`InstructionKind::Open`] within a batch (each group in emission order), so sibling
/// tags meeting at one boundary compose deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupInstruction {
    pub kind: InstructionKind,
    /// Character (not byte) offset into the plain text being built — not into the raw
    /// markup.
    pub position: usize,
    /// For [`InstructionKind::Close`] only the tag name is meaningful; attributes on a
    /// closing tag are ignored by the tokenizer.
    pub attribute: TagAttribute,
}

impl MarkupInstruction {
    #[must_use]
    pub fn open(position: usize, attribute: TagAttribute) -> Self {
        Self {
            kind: InstructionKind::Open,
            position,
            attribute,
        }
    }

    #[must_use]
    pub fn close(position: usize, tag_name: &str) -> Self {
        Self {
            kind: InstructionKind::Close,
            position,
            attribute: TagAttribute::new(tag_name),
        }
    }

    #[must_use]
    pub fn tag_name(&self) -> &str { self.attribute.id() }
}

/// Tokenizer output: the plain text (all tags stripped) and the instruction stream
/// that brackets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedMarkup {
    plain_text: String,
    instructions: Vec<MarkupInstruction>,
}

impl TokenizedMarkup {
    #[must_use]
    pub fn new(plain_text: String, instructions: Vec<MarkupInstruction>) -> Self {
        Self {
            plain_text,
            instructions,
        }
    }

    #[must_use]
    pub fn plain_text(&self) -> &str { &self.plain_text }

    #[must_use]
    pub fn instructions(&self) -> &[MarkupInstruction] { &self.instructions }

    #[must_use]
    pub fn into_parts(self) -> (String, Vec<MarkupInstruction>) {
        (self.plain_text, self.instructions)
    }
}
