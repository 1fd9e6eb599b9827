// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! nom parsers for the inside of a tag: `name key key=value key='v w' key="v w"`.
//!
//! The outer tokenizer has already located the `<` ... `>` boundaries; these parsers
//! only ever see the body between them. Parsing is lenient: an unparseable token is
//! skipped (up to the next whitespace) rather than failing the whole tag, and a bare
//! key is recorded with the value `"true"`.

use crate::{TagAttribute, constants};
use nom::{IResult, Parser,
          branch::alt,
          bytes::complete::{take_till, take_till1, take_while1},
          character::complete::char,
          combinator::opt,
          sequence::{delimited, preceded}};

/// Tag and attribute-key identifiers: ASCII-ish words, also allowing `_` and `-`.
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-').parse(input)
}

/// A quoted value may contain whitespace; the quote character itself cannot appear
/// inside (there is no quote-escape in this grammar).
fn parse_quoted_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(
            char(constants::QUOTE_DOUBLE),
            take_till(|c| c == constants::QUOTE_DOUBLE),
            char(constants::QUOTE_DOUBLE),
        ),
        delimited(
            char(constants::QUOTE_SINGLE),
            take_till(|c| c == constants::QUOTE_SINGLE),
            char(constants::QUOTE_SINGLE),
        ),
    ))
    .parse(input)
}

fn parse_unquoted_value(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace).parse(input)
}

/// `key`, `key=value`, `key='value'`, or `key="value"`.
fn parse_param(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    (
        parse_identifier,
        opt(preceded(
            char('='),
            alt((parse_quoted_value, parse_unquoted_value)),
        )),
    )
        .parse(input)
}

/// Parse a full (non-closing) tag body into a [`TagAttribute`]. Returns [`None`] only
/// when no tag name can be read at all — in that case the tokenizer degrades the whole
/// `<...>` run to literal text.
#[must_use]
pub fn parse_tag_body(arg_body: &str) -> Option<TagAttribute> {
    let body = arg_body.trim();
    let (mut rest, name) = parse_identifier(body).ok()?;
    let mut attribute = TagAttribute::new(name);

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        match parse_param(rest) {
            Ok((next_rest, (key, maybe_value))) => {
                attribute
                    .insert_param(key, maybe_value.unwrap_or(constants::BARE_KEY_VALUE));
                rest = next_rest;
            }
            Err(_) => {
                // Unparseable token: skip it (up to the next whitespace) and keep
                // going. Attribute parsing never fails the tag.
                match rest.find(char::is_whitespace) {
                    Some(skip_to) => rest = &rest[skip_to..],
                    None => break,
                }
            }
        }
    }

    Some(attribute)
}

/// Parse the body of a closing tag (leading `/` already stripped): just the name,
/// anything after it is ignored.
#[must_use]
pub fn parse_close_tag_body(arg_body: &str) -> Option<&str> {
    let body = arg_body.trim();
    let (_rest, name) = parse_identifier(body).ok()?;
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_name_only() {
        let attribute = parse_tag_body("rainbow").unwrap();
        assert_eq2!(attribute.id(), "rainbow");
        assert_eq2!(attribute.param_count(), 0);
    }

    #[test]
    fn test_key_value_params() {
        let attribute = parse_tag_body("wave a=2 f=0.5 w=1").unwrap();
        assert_eq2!(attribute.id(), "wave");
        assert_eq2!(attribute.float("a", 0.0), 2.0);
        assert_eq2!(attribute.float("f", 0.0), 0.5);
        assert_eq2!(attribute.float("w", 0.0), 1.0);
    }

    #[test]
    fn test_quoted_values_keep_whitespace() {
        let attribute =
            parse_tag_body(r#"item id="golden apple" anim='spin slow'"#).unwrap();
        assert_eq2!(attribute.string("id"), Some("golden apple"));
        assert_eq2!(attribute.string("anim"), Some("spin slow"));
    }

    #[test]
    fn test_bare_key_defaults_to_true() {
        let attribute = parse_tag_body("grad hue from=FF0000").unwrap();
        assert!(attribute.bool("hue", false));
        assert_eq2!(attribute.string("from"), Some("FF0000"));
    }

    #[test]
    fn test_keys_case_folded() {
        let attribute = parse_tag_body("Wave A=2").unwrap();
        assert_eq2!(attribute.id(), "wave");
        assert_eq2!(attribute.float("a", 0.0), 2.0);
    }

    #[test]
    fn test_junk_tokens_are_skipped() {
        let attribute = parse_tag_body("wave =3 a=2 === f=4").unwrap();
        assert_eq2!(attribute.float("a", 0.0), 2.0);
        assert_eq2!(attribute.float("f", 0.0), 4.0);
    }

    #[test]
    fn test_empty_body_yields_none() {
        assert!(parse_tag_body("").is_none());
        assert!(parse_tag_body("   ").is_none());
        assert!(parse_tag_body("=x").is_none());
    }

    #[test]
    fn test_close_tag_body() {
        assert_eq2!(parse_close_tag_body("wave"), Some("wave"));
        assert_eq2!(parse_close_tag_body(" wave ignored=1 "), Some("wave"));
        assert_eq2!(parse_close_tag_body(""), None);
    }
}
