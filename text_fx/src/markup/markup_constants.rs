// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Constants for the markup syntax.

pub mod constants {
    pub const TAG_START: char = '<';
    pub const TAG_END: char = '>';
    pub const CLOSE_TAG_PREFIX: char = '/';
    pub const SELF_CLOSE_SUFFIX: char = '/';
    pub const ESCAPE_CHAR: char = '\\';
    /// The HTML-style entity form of a literal `<`.
    pub const LT_ENTITY: &str = "&lt;";
    /// Legacy single-character formatting codes are introduced by this character.
    pub const LEGACY_CODE_PREFIX: char = '\u{00a7}';
    /// Value stored for bare (valueless) attribute keys.
    pub const BARE_KEY_VALUE: &str = "true";
    pub const QUOTE_DOUBLE: char = '"';
    pub const QUOTE_SINGLE: char = '\'';
}
