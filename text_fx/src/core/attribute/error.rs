// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The crate's only error type.
//!
//! Markup compilation is infallible by design (malformed input degrades to plain
//! text). The one place a caller can hand us something programmatically impossible is
//! the [`crate::AttributedTextBuilder`], and that surface returns this type.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TextFxError {
    #[error("invalid span range {start}..{end}: start is greater than end")]
    #[diagnostic(
        code(text_fx::invalid_span_range),
        help("spans are half-open ranges; start must be <= end")
    )]
    InvalidSpanRange { start: usize, end: usize },

    #[error("span range {start}..{end} is out of bounds for text of {len} characters")]
    #[diagnostic(
        code(text_fx::span_out_of_bounds),
        help("span endpoints are character offsets into the raw text")
    )]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
}
