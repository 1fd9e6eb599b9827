// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stack-allocated string/vector aliases.
//!
//! These are sized to allow for stack allocation rather than heap allocation. If for
//! some reason these are exceeded, then they will [`smallvec::SmallVec::spilled`] over
//! into the heap.

use smallstr::SmallString;

/// Tag names, attribute keys, attribute values. Most fit in 16 bytes.
pub type InlineString = SmallString<[u8; MAX_INLINE_STRING_BYTES]>;
const MAX_INLINE_STRING_BYTES: usize = 16;

/// Constructor function for [`InlineString`] that copies the given slice.
pub fn inline_string(arg_val: &str) -> InlineString { InlineString::from_str(arg_val) }
