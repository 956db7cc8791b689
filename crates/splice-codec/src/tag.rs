// SPDX-License-Identifier: Apache-2.0
//! Subtype identity.

use core::fmt;

/// Exact, case-sensitive identity of one concrete subtype.
///
/// `TypeKey` is a dedicated wrapper over a static name so registry lookups
/// compare identities, not arbitrary strings; using a wrapper prevents
/// accidental mixing of subtype identities and discriminant labels, which
/// are a separate namespace.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey(&'static str);

impl TypeKey {
    /// Create a key from a static type name.
    #[must_use]
    pub const fn of(name: &'static str) -> Self {
        Self(name)
    }

    /// The type name this key was created from.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Reports the concrete variant identity of a value of the base type.
///
/// For an enum base type this is an exhaustive `match`, one arm per
/// variant, so adding a variant without registering it is caught by the
/// compiler at the `match` and by [`EncodeError::UnregisteredType`] at the
/// registry seam.
///
/// [`EncodeError::UnregisteredType`]: crate::EncodeError::UnregisteredType
pub trait Tagged {
    /// The identity of this value's concrete variant.
    fn type_key(&self) -> TypeKey;
}
