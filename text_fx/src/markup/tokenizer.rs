// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Single-pass markup tokenizer.
//!
//! Scans the markup string left to right exactly once, emitting plain text and a flat
//! list of positioned [`MarkupInstruction`]s. There is no recursion and no DOM — tag
//! nesting is resolved later by the tag-stack compiler.
//!
//! Malformed markup never errors: a `<` is only treated as a tag start if an
//! unescaped `>` exists later in the string, an empty or unparseable tag body is
//! emitted as literal text, and the worst outcome for any input is the input
//! reproduced verbatim as plain text.
//!
//! Escapes: `\<` and `&lt;` both produce a literal `<` and are removed from the
//! tag-detection scan.
//!
//! Note on positions: every instruction records the *character* offset into the plain
//! text being built (tracked incrementally while emitting), not the raw markup
//! offset. Rust strings are always valid UTF-8, so the codepoint iteration here can
//! never observe an unpaired surrogate — inputs that contained one upstream arrive
//! with U+FFFD already substituted.

use crate::{MarkupInstruction, TokenizedMarkup, constants, parse_close_tag_body,
            parse_tag_body};

/// Tokenize a markup string. See the module docs for the grammar.
#[must_use]
pub fn tokenize(arg_markup: &str) -> TokenizedMarkup {
    let mut plain_text = String::with_capacity(arg_markup.len());
    let mut plain_char_count: usize = 0;
    let mut instructions: Vec<MarkupInstruction> = Vec::new();

    let mut rest = arg_markup;
    while !rest.is_empty() {
        // `&lt;` entity → literal `<`, never a tag start.
        if let Some(after_entity) = rest.strip_prefix(constants::LT_ENTITY) {
            plain_text.push(constants::TAG_START);
            plain_char_count += 1;
            rest = after_entity;
            continue;
        }

        let ch = match rest.chars().next() {
            Some(it) => it,
            None => break,
        };

        // `\<` escape → literal `<` (backslash dropped). A backslash before anything
        // else is just a backslash.
        if ch == constants::ESCAPE_CHAR {
            let mut lookahead = rest.chars();
            let _backslash = lookahead.next();
            if lookahead.next() == Some(constants::TAG_START) {
                plain_text.push(constants::TAG_START);
                plain_char_count += 1;
                rest = &rest[2..];
                continue;
            }
            plain_text.push(ch);
            plain_char_count += 1;
            rest = &rest[ch.len_utf8()..];
            continue;
        }

        if ch == constants::TAG_START {
            let after_open = &rest[1..];
            if let Some(close_byte_index) = scan_helper::find_unescaped_tag_end(after_open)
            {
                let body = &after_open[..close_byte_index];
                if scan_helper::emit_tag(body, plain_char_count, &mut instructions) {
                    rest = &after_open[close_byte_index + 1..];
                    continue;
                }
            }
            // No terminator, or empty/unparseable body: the `<` is literal text.
            plain_text.push(constants::TAG_START);
            plain_char_count += 1;
            rest = after_open;
            continue;
        }

        plain_text.push(ch);
        plain_char_count += 1;
        rest = &rest[ch.len_utf8()..];
    }

    TokenizedMarkup::new(plain_text, instructions)
}

mod scan_helper {
    #[allow(clippy::wildcard_imports)]
    use super::*;

    /// Byte index (within the slice) of the first `>` that is not preceded by `\`, if
    /// any. The scan is what decides whether a `<` begins a tag at all.
    pub fn find_unescaped_tag_end(slice: &str) -> Option<usize> {
        let mut previous: Option<char> = None;
        for (byte_index, ch) in slice.char_indices() {
            if ch == constants::TAG_END && previous != Some(constants::ESCAPE_CHAR) {
                return Some(byte_index);
            }
            previous = Some(ch);
        }
        None
    }

    /// Try to turn one tag body into instruction(s) at `position`. Returns `false` if
    /// the body does not form a tag (empty, `/` with no name, no parseable name), in
    /// which case the caller degrades to literal text.
    pub fn emit_tag(
        arg_body: &str,
        position: usize,
        instructions: &mut Vec<MarkupInstruction>,
    ) -> bool {
        let body = arg_body.trim();
        if body.is_empty() {
            return false;
        }

        // Closing tag: `</name ...>` — attributes after the name are ignored.
        if let Some(close_body) = body.strip_prefix(constants::CLOSE_TAG_PREFIX) {
            let Some(name) = parse_close_tag_body(close_body) else {
                return false;
            };
            instructions.push(MarkupInstruction::close(position, name));
            return true;
        }

        // Self-closing tag: `<name ... />` — recorded as a zero-width Open+Close pair
        // at the same position (used by inline attachments that are not text spans).
        let (body, self_closing) = match body.strip_suffix(constants::SELF_CLOSE_SUFFIX) {
            Some(stripped) => (stripped.trim_end(), true),
            None => (body, false),
        };

        let Some(attribute) = parse_tag_body(body) else {
            return false;
        };
        let tag_name = attribute.id().to_owned();
        instructions.push(MarkupInstruction::open(position, attribute));
        if self_closing {
            instructions.push(MarkupInstruction::close(position, &tag_name));
        }
        true
    }
}
