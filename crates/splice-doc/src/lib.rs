// SPDX-License-Identifier: Apache-2.0
//! Document token contract for splice codecs.
//!
//! This crate defines the object-document model consumed by the codec layer:
//! an ordered token sequence, a forward-only [`Cursor`] reader with isolated
//! lookahead branches, and a [`Sink`] writer with a flatten mode that merges
//! a nested object's fields into the enclosing object.
//!
//! It contains NO dispatch logic—label registries and polymorphic codecs
//! live in splice-codec.
//!
//! # Design Principles
//!
//! - **Branches are forks** — a lookahead branch owns its own position into
//!   the shared token buffer; advancing it never advances the parent.
//! - **Flatten is the writer's job** — codecs write complete objects; the
//!   sink suppresses the enclosing begin/end pair while flatten is active.
//! - **No text format** — tokenization to/from concrete wire text is out of
//!   scope; this crate starts and ends at the token sequence.
//!
//! # Crate Features
//!
//! - `std` (default): Enables std library. Disable for no_std contexts.

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// Error type for document cursor and sink operations.
///
/// These errors pass through the codec layer unmodified; the codec adds no
/// retry or suppression logic around them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    /// The cursor met a token that does not fit the requested read.
    #[error("expected {expected} but found {found}")]
    UnexpectedToken {
        /// What the caller asked the cursor for.
        expected: &'static str,
        /// Rendering of the token actually at the cursor.
        found: String,
    },
    /// The cursor ran off the end of the token buffer mid-value.
    #[error("unexpected end of document")]
    UnexpectedEnd,
    /// A sink call violated the writer's scope discipline.
    #[error("scope error: {0}")]
    Scope(String),
}

mod cursor;
mod document;
mod sink;
mod token;

pub use cursor::{BufCursor, Cursor};
pub use document::Document;
pub use sink::{BufSink, FlattenToken, Sink};
pub use token::{Scalar, Token, ValueKind};
