// SPDX-License-Identifier: Apache-2.0
//! Error taxonomy for registry configuration and codec execution.
//!
//! Every error aborts the whole decode or encode call; nothing is caught
//! and converted into a fallback value. The only implicit fallback in the
//! system is a configured default subtype, which is a decode-time feature,
//! not error suppression.

use alloc::string::String;
use alloc::vec::Vec;

use splice_doc::DocError;
use thiserror::Error;

use crate::TypeKey;

/// Raised while building a [`TagRegistry`]; never deferred to codec time.
///
/// [`TagRegistry`]: crate::TagRegistry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A base type name, discriminant key, or label was empty.
    #[error("{what} must not be empty")]
    EmptyIdentifier {
        /// Which identifier was empty.
        what: &'static str,
    },
    /// The label is already bound to another subtype.
    #[error("label {label:?} is already registered; labels must be unique")]
    DuplicateLabel {
        /// The colliding label.
        label: String,
    },
    /// The subtype is already bound to another label.
    #[error("subtype {subtype} is already registered; subtypes must be unique")]
    DuplicateSubtype {
        /// The colliding subtype.
        subtype: TypeKey,
    },
}

/// Raised by [`PolyCodec::decode`].
///
/// [`PolyCodec::decode`]: crate::PolyCodec::decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The discriminant value matches no registered label and no default
    /// subtype is configured.
    #[error(
        "expected one of {expected:?} for key {key:?} but found {label:?}; \
         register a subtype for this label"
    )]
    UnknownLabel {
        /// The discriminant key that was scanned for.
        key: String,
        /// The unrecognized discriminant value.
        label: String,
        /// Every registered label, in registration order.
        expected: Vec<String>,
    },
    /// The object carries no discriminant field and no default subtype is
    /// configured.
    #[error("missing discriminant {key:?}; expected one of {expected:?}")]
    MissingDiscriminant {
        /// The discriminant key that was scanned for.
        key: String,
        /// Every registered label, in registration order.
        expected: Vec<String>,
    },
    /// Underlying document error, passed through unmodified.
    #[error(transparent)]
    Doc(#[from] DocError),
}

/// Raised by [`PolyCodec::encode`].
///
/// [`PolyCodec::encode`]: crate::PolyCodec::encode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value's concrete type matches no registered subtype. The default
    /// subtype is never consulted for encoding.
    #[error("expected a value of one of {registered:?} but found {found}; register this subtype")]
    UnregisteredType {
        /// The value's concrete type.
        found: TypeKey,
        /// Every registered subtype, in registration order.
        registered: Vec<TypeKey>,
    },
    /// Underlying document error, passed through unmodified.
    #[error(transparent)]
    Doc(#[from] DocError),
}
