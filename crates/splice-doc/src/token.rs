// SPDX-License-Identifier: Apache-2.0
//! Token model for buffered object documents.

use alloc::string::String;
use core::fmt;

/// Scalar value carried by a [`Token::Scalar`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(v) => write!(f, "{v}"),
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Str(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(String::from(v))
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

/// One element of a buffered document.
///
/// A well-formed document is a balanced token sequence: every `BeginObject`
/// pairs with an `EndObject`, every `BeginArray` with an `EndArray`, and
/// inside an object a `Name` precedes each value.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Start of an object.
    BeginObject,
    /// End of an object.
    EndObject,
    /// Start of an array.
    BeginArray,
    /// End of an array.
    EndArray,
    /// Field name inside an object.
    Name(String),
    /// Scalar value.
    Scalar(Scalar),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::BeginObject => write!(f, "begin of object"),
            Token::EndObject => write!(f, "end of object"),
            Token::BeginArray => write!(f, "begin of array"),
            Token::EndArray => write!(f, "end of array"),
            Token::Name(name) => write!(f, "name {name:?}"),
            Token::Scalar(value) => write!(f, "scalar {value}"),
        }
    }
}

/// Shape of the next value at a cursor, reported by [`Cursor::peek`].
///
/// [`Cursor::peek`]: crate::Cursor::peek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Explicit null.
    Null,
    /// Boolean scalar.
    Bool,
    /// Numeric scalar (integer or float).
    Number,
    /// String scalar.
    Str,
    /// Nested object.
    Object,
    /// Nested array.
    Array,
}
