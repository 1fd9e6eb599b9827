// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw text plus the spans that decorate it.
//!
//! Built once per markup string (by the compiler) or programmatically via
//! [`AttributedTextBuilder`]; never mutated after construction — re-parsing creates a
//! new instance, and parsing the same markup twice yields structurally equal values.

use crate::{Span, TagAttribute, TextFxError, ok};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributedText {
    raw: String,
    spans: Vec<Span>,
}

impl AttributedText {
    /// Construct directly from parts. The compiler uses this; external callers should
    /// prefer [`AttributedTextBuilder`], which validates ranges.
    #[must_use]
    pub fn from_parts(raw: String, spans: Vec<Span>) -> Self { Self { raw, spans } }

    #[must_use]
    pub fn raw(&self) -> &str { &self.raw }

    #[must_use]
    pub fn spans(&self) -> &[Span] { &self.spans }

    /// Number of characters (not bytes) in the raw text. Span endpoints index into
    /// this character sequence.
    #[must_use]
    pub fn char_len(&self) -> usize { self.raw.chars().count() }

    /// Terminal-column estimate of the raw text (wide CJK glyphs count double).
    /// Hosts with real font metrics should prefer those; this is for rough layout
    /// budgeting and debug output.
    #[must_use]
    pub fn display_width(&self) -> usize { self.raw.width() }

    /// All attributes that apply at the given character index, outermost first. This
    /// doesn't resolve conflicts, it just reports everything.
    pub fn attributes_at(&self, char_index: usize) -> impl Iterator<Item = &TagAttribute> {
        self.spans
            .iter()
            .filter(move |span| span.contains(char_index))
            .flat_map(|span| span.attributes.iter())
    }
}

/// Fluent builder for [`AttributedText`]. This is the crate's only fallible surface.
///
/// ```
/// use r3bl_text_fx::{AttributedTextBuilder, TagAttribute};
///
/// let text = AttributedTextBuilder::new("Hello")
///     .with_span(0, 5, TagAttribute::new("bold"))
///     .unwrap()
///     .build();
/// assert_eq!(text.attributes_at(0).count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttributedTextBuilder {
    raw: String,
    spans: Vec<Span>,
}

impl AttributedTextBuilder {
    #[must_use]
    pub fn new(arg_raw: impl Into<String>) -> Self {
        Self {
            raw: arg_raw.into(),
            spans: Vec::new(),
        }
    }

    /// Apply an attribute to a character range.
    ///
    /// # Errors
    ///
    /// - [`TextFxError::InvalidSpanRange`] if `start > end`.
    /// - [`TextFxError::SpanOutOfBounds`] if either endpoint exceeds the character
    ///   length of the text.
    pub fn with_span(
        mut self,
        start: usize,
        end: usize,
        attribute: TagAttribute,
    ) -> Result<Self, TextFxError> {
        if start > end {
            return Err(TextFxError::InvalidSpanRange { start, end });
        }
        let len = self.raw.chars().count();
        if start > len || end > len {
            return Err(TextFxError::SpanOutOfBounds { start, end, len });
        }
        self.spans.push(Span {
            start,
            end,
            attributes: smallvec::smallvec![attribute],
        });
        ok!(self)
    }

    #[must_use]
    pub fn build(self) -> AttributedText {
        AttributedText {
            raw: self.raw,
            spans: self.spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_builder_validates_ranges() {
        let builder = AttributedTextBuilder::new("héllo");

        // "héllo" is 5 characters even though it is 6 bytes.
        let result = builder.clone().with_span(0, 5, TagAttribute::new("bold"));
        assert!(result.is_ok());

        let result = builder.clone().with_span(3, 2, TagAttribute::new("bold"));
        assert_eq2!(
            result.unwrap_err(),
            TextFxError::InvalidSpanRange { start: 3, end: 2 }
        );

        let result = builder.with_span(0, 6, TagAttribute::new("bold"));
        assert_eq2!(
            result.unwrap_err(),
            TextFxError::SpanOutOfBounds {
                start: 0,
                end: 6,
                len: 5
            }
        );
    }

    #[test]
    fn test_attributes_at_reports_nested_spans() {
        let text = AttributedTextBuilder::new("nested")
            .with_span(0, 6, TagAttribute::new("grad"))
            .unwrap()
            .with_span(2, 4, TagAttribute::new("wave"))
            .unwrap()
            .build();

        let at_0: Vec<&str> = text.attributes_at(0).map(TagAttribute::id).collect();
        assert_eq2!(at_0, vec!["grad"]);

        let at_3: Vec<&str> = text.attributes_at(3).map(TagAttribute::id).collect();
        assert_eq2!(at_3, vec!["grad", "wave"]);
    }

    #[test]
    fn test_structural_equality() {
        let make = || {
            AttributedTextBuilder::new("same")
                .with_span(0, 4, TagAttribute::new("fade").with_param("a", ".5"))
                .unwrap()
                .build()
        };
        assert_eq2!(make(), make());
    }

    #[test]
    fn test_display_width_counts_wide_glyphs() {
        let text = AttributedTextBuilder::new("ab漢字").build();
        assert_eq2!(text.char_len(), 4);
        assert_eq2!(text.display_width(), 6);
    }

    #[test]
    fn test_serde_round_trip_is_structural() {
        let text = AttributedTextBuilder::new("Hello")
            .with_span(0, 5, TagAttribute::new("wave").with_param("a", "2"))
            .unwrap()
            .build();
        let json = serde_json::to_string(&text).unwrap();
        let back: AttributedText = serde_json::from_str(&json).unwrap();
        assert_eq2!(text, back);
    }
}
