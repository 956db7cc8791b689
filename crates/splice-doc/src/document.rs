// SPDX-License-Identifier: Apache-2.0
//! Owned token document.

use alloc::vec::Vec;

use crate::{BufCursor, Token};

/// An owned, ordered token sequence representing one complete value.
///
/// Typically produced by [`BufSink::finish`] and consumed through
/// [`Document::cursor`]. Equality is token-sequence equality, which is what
/// round-trip tests compare.
///
/// [`BufSink::finish`]: crate::BufSink::finish
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    tokens: Vec<Token>,
}

impl Document {
    /// Wrap a raw token sequence.
    ///
    /// The sequence is not validated; a malformed sequence surfaces as
    /// [`DocError`] values from the cursor that reads it.
    ///
    /// [`DocError`]: crate::DocError
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Borrow the token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Open a cursor at the start of the document.
    #[must_use]
    pub fn cursor(&self) -> BufCursor<'_> {
        BufCursor::new(&self.tokens)
    }
}
