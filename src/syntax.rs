//! Syntax module for phonological environment expressions
//!
//! This module provides the token layer and the recursive-descent grammar that recognises
//! `LeftContext / LeftContext _ RightContext`. Nothing is retained after a parse: the grammar
//! only answers whether the expression is well formed against a [`ValidationContext`].
//!
//! [`ValidationContext`]: crate::symbols::ValidationContext

use serde::{Deserialize, Serialize};

pub mod lexer;
pub mod parser;

/// Represents a span in the source text, in character offsets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at `pos`.
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Converts this character span into a byte range over `source`.
    ///
    /// Offsets past the end of `source` clamp to its byte length.
    pub fn to_byte_range(&self, source: &str) -> std::ops::Range<usize> {
        char_to_byte(source, self.start)..char_to_byte(source, self.end)
    }
}

/// Byte offset of the `pos`th character of `source`, or `source.len()` past the end.
pub(crate) fn char_to_byte(source: &str, pos: usize) -> usize {
    source
        .char_indices()
        .nth(pos)
        .map(|(byte, _)| byte)
        .unwrap_or(source.len())
}
