// SPDX-License-Identifier: Apache-2.0
//! Immutable registry binding labels to subtypes and their codecs.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{ConfigError, PolyCodec, TypeKey, VariantCodec};

/// One registered (label, subtype, codec) binding.
struct Entry<T> {
    label: String,
    subtype: TypeKey,
    codec: Arc<dyn VariantCodec<T>>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            subtype: self.subtype,
            codec: Arc::clone(&self.codec),
        }
    }
}

/// Immutable configuration for one flattened tagged union.
///
/// A registry binds a base type, a discriminant field name, an ordered set
/// of unique (label, subtype, codec) entries, and an optional default
/// subtype consulted when decoding meets an unrecognized label.
///
/// # Persistence
///
/// Every configuration call returns a NEW registry; a registry already
/// handed out is never mutated. That makes any registry value safe to share
/// across concurrent readers without synchronization, and safe to keep
/// using after deriving further registries from it.
///
/// Entry order is insertion order. Dispatch is exact string match, but the
/// order fixes how labels and subtypes are enumerated in diagnostics.
pub struct TagRegistry<T> {
    base: TypeKey,
    key: String,
    entries: Vec<Entry<T>>,
    default: Option<(TypeKey, Arc<dyn VariantCodec<T>>)>,
}

impl<T> Clone for TagRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base,
            key: self.key.clone(),
            entries: self.entries.clone(),
            default: self
                .default
                .as_ref()
                .map(|(subtype, codec)| (*subtype, Arc::clone(codec))),
        }
    }
}

impl<T> fmt::Debug for TagRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("base", &self.base)
            .field("key", &self.key)
            .field("labels", &self.labels())
            .field("default", &self.default.as_ref().map(|(subtype, _)| subtype))
            .finish()
    }
}

impl<T> TagRegistry<T> {
    /// Create an empty registry for `base`, discriminated by `key`.
    ///
    /// Fails if the base type name or the discriminant key is empty.
    pub fn of(base: TypeKey, key: &str) -> Result<Self, ConfigError> {
        if base.name().is_empty() {
            return Err(ConfigError::EmptyIdentifier {
                what: "base type name",
            });
        }
        if key.is_empty() {
            return Err(ConfigError::EmptyIdentifier {
                what: "discriminant key",
            });
        }
        Ok(Self {
            base,
            key: String::from(key),
            entries: Vec::new(),
            default: None,
        })
    }

    /// Return a new registry with `(label, subtype, codec)` appended.
    ///
    /// Fails if `label` or `subtype` is already registered (exact,
    /// case-sensitive match on both). `self` is left untouched either way.
    pub fn with_subtype(
        &self,
        subtype: TypeKey,
        label: &str,
        codec: Arc<dyn VariantCodec<T>>,
    ) -> Result<Self, ConfigError> {
        if label.is_empty() {
            return Err(ConfigError::EmptyIdentifier { what: "label" });
        }
        if subtype.name().is_empty() {
            return Err(ConfigError::EmptyIdentifier {
                what: "subtype name",
            });
        }
        if self.entries.iter().any(|entry| entry.label == label) {
            return Err(ConfigError::DuplicateLabel {
                label: String::from(label),
            });
        }
        if self.entries.iter().any(|entry| entry.subtype == subtype) {
            return Err(ConfigError::DuplicateSubtype { subtype });
        }
        let mut next = self.clone();
        next.entries.push(Entry {
            label: String::from(label),
            subtype,
            codec,
        });
        Ok(next)
    }

    /// Return a new registry with the default subtype replaced.
    ///
    /// The default is consulted only when decoding meets an unrecognized or
    /// missing discriminant; it is never consulted for encoding. `None`
    /// clears any previous default. The default need not be unique against
    /// the registered entries.
    #[must_use]
    pub fn with_default_subtype(
        &self,
        default: Option<(TypeKey, Arc<dyn VariantCodec<T>>)>,
    ) -> Self {
        let mut next = self.clone();
        next.default = default;
        next
    }

    /// The base type this registry configures.
    #[must_use]
    pub fn base(&self) -> TypeKey {
        self.base
    }

    /// The discriminant field name.
    #[must_use]
    pub fn discriminant_key(&self) -> &str {
        &self.key
    }

    /// Registered labels in insertion order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.label.as_str()).collect()
    }

    /// Build the polymorphic codec for `requested`.
    ///
    /// Returns `None` when `requested` is not this registry's base type.
    /// That is a pass signal, not an error: this factory participates in a
    /// chain of responsibility beside unrelated codec factories, and a
    /// non-matching request belongs to one of them.
    ///
    /// Each entry's variant codec (and the default's, if configured) is
    /// resolved exactly once here and cached in the returned codec for its
    /// lifetime.
    #[must_use]
    pub fn codec_for(&self, requested: TypeKey) -> Option<PolyCodec<T>> {
        if requested != self.base {
            return None;
        }
        let labels = self
            .entries
            .iter()
            .map(|entry| entry.label.clone())
            .collect();
        let subtypes = self.entries.iter().map(|entry| entry.subtype).collect();
        let codecs = self
            .entries
            .iter()
            .map(|entry| Arc::clone(&entry.codec))
            .collect();
        let default_codec = self.default.as_ref().map(|(_, codec)| Arc::clone(codec));
        Some(PolyCodec::new(
            self.key.clone(),
            labels,
            subtypes,
            codecs,
            default_codec,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeError, EncodeError};
    use alloc::format;
    use alloc::string::ToString;
    use splice_doc::{Cursor, Sink};

    #[derive(Debug, PartialEq)]
    struct Unit;

    struct NoopCodec;

    impl VariantCodec<Unit> for NoopCodec {
        fn decode(&self, cursor: &mut dyn Cursor) -> Result<Unit, DecodeError> {
            cursor.begin_object()?;
            while cursor.has_next() {
                cursor.next_name()?;
                cursor.skip_value()?;
            }
            cursor.end_object()?;
            Ok(Unit)
        }

        fn encode(&self, _value: &Unit, sink: &mut dyn Sink) -> Result<(), EncodeError> {
            sink.begin_object()?;
            sink.end_object()?;
            Ok(())
        }
    }

    const BASE: TypeKey = TypeKey::of("Unit");
    const A: TypeKey = TypeKey::of("A");
    const B: TypeKey = TypeKey::of("B");

    #[test]
    fn rejects_empty_identifiers() {
        assert_eq!(
            TagRegistry::<Unit>::of(TypeKey::of(""), "kind").unwrap_err(),
            ConfigError::EmptyIdentifier {
                what: "base type name",
            }
        );
        assert_eq!(
            TagRegistry::<Unit>::of(BASE, "").unwrap_err(),
            ConfigError::EmptyIdentifier {
                what: "discriminant key",
            }
        );
        let registry = TagRegistry::<Unit>::of(BASE, "kind").unwrap();
        assert_eq!(
            registry
                .with_subtype(A, "", Arc::new(NoopCodec))
                .unwrap_err(),
            ConfigError::EmptyIdentifier { what: "label" }
        );
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_subtype(A, "a", Arc::new(NoopCodec))
            .unwrap();
        assert_eq!(
            registry
                .with_subtype(B, "a", Arc::new(NoopCodec))
                .unwrap_err(),
            ConfigError::DuplicateLabel {
                label: "a".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_subtype_is_rejected() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_subtype(A, "a", Arc::new(NoopCodec))
            .unwrap();
        assert_eq!(
            registry
                .with_subtype(A, "b", Arc::new(NoopCodec))
                .unwrap_err(),
            ConfigError::DuplicateSubtype { subtype: A }
        );
    }

    #[test]
    fn labels_are_case_sensitive() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_subtype(A, "a", Arc::new(NoopCodec))
            .unwrap()
            .with_subtype(B, "A", Arc::new(NoopCodec))
            .unwrap();
        assert_eq!(registry.labels(), ["a", "A"]);
    }

    #[test]
    fn configuration_is_copy_on_write() {
        let one = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_subtype(A, "a", Arc::new(NoopCodec))
            .unwrap();
        let two = one.with_subtype(B, "b", Arc::new(NoopCodec)).unwrap();

        // The parent snapshot is unaffected by the derived one.
        assert_eq!(one.labels(), ["a"]);
        assert_eq!(two.labels(), ["a", "b"]);
    }

    #[test]
    fn default_is_replaced_not_accumulated() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_default_subtype(Some((A, Arc::new(NoopCodec))))
            .with_default_subtype(Some((B, Arc::new(NoopCodec))));
        assert!(format!("{registry:?}").contains('B'));

        let cleared = registry.with_default_subtype(None);
        assert!(format!("{cleared:?}").contains("None"));
    }

    #[test]
    fn default_may_repeat_a_registered_subtype() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_subtype(A, "a", Arc::new(NoopCodec))
            .unwrap()
            .with_default_subtype(Some((A, Arc::new(NoopCodec))));
        assert!(registry.codec_for(BASE).is_some());
    }

    #[test]
    fn codec_for_declines_other_types() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind").unwrap();
        assert!(registry.codec_for(TypeKey::of("Other")).is_none());
        assert!(registry.codec_for(BASE).is_some());
    }

    #[test]
    fn preserves_insertion_order() {
        let registry = TagRegistry::<Unit>::of(BASE, "kind")
            .unwrap()
            .with_subtype(B, "b", Arc::new(NoopCodec))
            .unwrap()
            .with_subtype(A, "a", Arc::new(NoopCodec))
            .unwrap();
        assert_eq!(registry.labels(), ["b", "a"]);
    }
}
