// SPDX-License-Identifier: Apache-2.0
//! Runtime polymorphic codec: lookahead dispatch and flatten encode.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use splice_doc::{Cursor, Scalar, Sink, ValueKind};

use crate::{DecodeError, EncodeError, Tagged, TypeKey};

/// Encode/decode capability bound to exactly one concrete subtype.
///
/// Implementations are shared immutably behind `Arc` and read concurrently,
/// hence the `Send + Sync` bound.
///
/// # Contract
///
/// - `decode` reads one complete object, from `begin_object` through
///   `end_object`. The discriminant field may appear among the fields; the
///   codec must tolerate and ignore it (skipping unknown fields covers
///   this).
/// - `encode` writes one complete object for the variant's own fields. It
///   opens and closes that object normally; under the polymorphic encode
///   path the sink's flatten mode suppresses the enclosing pair so the
///   fields land beside the discriminant.
pub trait VariantCodec<T>: Send + Sync {
    /// Decode one value of this codec's subtype from a complete object.
    fn decode(&self, cursor: &mut dyn Cursor) -> Result<T, DecodeError>;

    /// Encode the variant's fields as one object.
    ///
    /// The caller guarantees `value`'s concrete variant is this codec's
    /// subtype.
    fn encode(&self, value: &T, sink: &mut dyn Sink) -> Result<(), EncodeError>;
}

/// Polymorphic codec for one base type, built by
/// [`TagRegistry::codec_for`].
///
/// Immutable after construction: the discriminant key, the label/subtype
/// tables, and one resolved variant codec per entry (plus the optional
/// default) are fixed for the codec's lifetime, so a `PolyCodec` is safely
/// shared and read concurrently without locking.
///
/// Null passthrough is built in: a null value at the call site bypasses all
/// dispatch logic on both paths ([`PolyCodec::decode`] returns `Ok(None)`,
/// [`PolyCodec::encode`] writes a bare null for `None`).
///
/// [`TagRegistry::codec_for`]: crate::TagRegistry::codec_for
pub struct PolyCodec<T> {
    key: String,
    labels: Vec<String>,
    subtypes: Vec<TypeKey>,
    codecs: Vec<Arc<dyn VariantCodec<T>>>,
    default_codec: Option<Arc<dyn VariantCodec<T>>>,
}

impl<T> fmt::Debug for PolyCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyCodec")
            .field("key", &self.key)
            .field("labels", &self.labels)
            .field("subtypes", &self.subtypes)
            .field("default", &self.default_codec.is_some())
            .finish()
    }
}

impl<T> PolyCodec<T> {
    pub(crate) fn new(
        key: String,
        labels: Vec<String>,
        subtypes: Vec<TypeKey>,
        codecs: Vec<Arc<dyn VariantCodec<T>>>,
        default_codec: Option<Arc<dyn VariantCodec<T>>>,
    ) -> Self {
        debug_assert_eq!(labels.len(), subtypes.len());
        debug_assert_eq!(labels.len(), codecs.len());
        Self {
            key,
            labels,
            subtypes,
            codecs,
            default_codec,
        }
    }

    /// The discriminant field name this codec scans for and writes.
    #[must_use]
    pub fn discriminant_key(&self) -> &str {
        &self.key
    }

    /// Decode one value, or `None` for an explicit null.
    ///
    /// The discriminant is located through a lookahead branch that leaves
    /// `cursor` untouched; the selected variant codec then re-reads the
    /// whole object from the original position. A discriminant that is the
    /// first field keeps the rescan cheap.
    pub fn decode(&self, cursor: &mut dyn Cursor) -> Result<Option<T>, DecodeError> {
        if cursor.peek()? == ValueKind::Null {
            cursor.next_scalar()?;
            return Ok(None);
        }
        let codec = self.select(&*cursor)?;
        codec.decode(cursor).map(Some)
    }

    /// Scan a lookahead branch for the discriminant and pick the variant
    /// codec. The branch is dropped on return; `cursor` never advances.
    fn select(&self, cursor: &dyn Cursor) -> Result<&Arc<dyn VariantCodec<T>>, DecodeError> {
        let mut look = cursor.branch();
        look.begin_object()?;
        while look.has_next() {
            let name = look.next_name()?;
            if name != self.key {
                look.skip_value()?;
                continue;
            }
            let label = look.next_string()?;
            return match self.labels.iter().position(|known| *known == label) {
                Some(index) => Ok(&self.codecs[index]),
                None => self.default_codec.as_ref().ok_or_else(|| {
                    DecodeError::UnknownLabel {
                        key: self.key.clone(),
                        label,
                        expected: self.labels.clone(),
                    }
                }),
            };
        }
        self.default_codec
            .as_ref()
            .ok_or_else(|| DecodeError::MissingDiscriminant {
                key: self.key.clone(),
                expected: self.labels.clone(),
            })
    }
}

impl<T: Tagged> PolyCodec<T> {
    /// Encode one value, or a bare null for `None`.
    ///
    /// The value's concrete variant must be a registered subtype; the
    /// default subtype is never consulted here. The discriminant field is
    /// written first, then the variant's fields are flattened into the same
    /// object as its siblings.
    pub fn encode(&self, value: Option<&T>, sink: &mut dyn Sink) -> Result<(), EncodeError> {
        let Some(value) = value else {
            sink.scalar(Scalar::Null)?;
            return Ok(());
        };
        let found = value.type_key();
        let index = self
            .subtypes
            .iter()
            .position(|subtype| *subtype == found)
            .ok_or_else(|| EncodeError::UnregisteredType {
                found,
                registered: self.subtypes.clone(),
            })?;

        sink.begin_object()?;
        sink.name(&self.key)?;
        sink.scalar(Scalar::Str(self.labels[index].clone()))?;
        let flat = sink.begin_flatten()?;
        self.codecs[index].encode(value, sink)?;
        sink.end_flatten(flat)?;
        sink.end_object()?;
        Ok(())
    }
}
