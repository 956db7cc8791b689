// SPDX-License-Identifier: Apache-2.0
//! Forward-only document reader with isolated lookahead branches.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use crate::{DocError, Scalar, Token, ValueKind};

/// Forward-only reader over an ordered (name, value) pair sequence.
///
/// The cursor is the codec layer's only view of a document being decoded.
/// Reads consume tokens; [`Cursor::peek`] and [`Cursor::branch`] do not.
///
/// # Branch Semantics
///
/// [`Cursor::branch`] forks an independent lookahead cursor over the same
/// underlying buffer. Advancing the branch NEVER advances the parent; the
/// two share no mutable position state. This is the load-bearing invariant
/// of the lookahead decode path: a shared position would double-read or
/// double-skip fields and silently corrupt decoding.
pub trait Cursor {
    /// Consume the start of an object.
    fn begin_object(&mut self) -> Result<(), DocError>;

    /// Consume the end of an object.
    fn end_object(&mut self) -> Result<(), DocError>;

    /// Consume the start of an array.
    fn begin_array(&mut self) -> Result<(), DocError>;

    /// Consume the end of an array.
    fn end_array(&mut self) -> Result<(), DocError>;

    /// True while fields or elements remain in the current object or array.
    fn has_next(&self) -> bool;

    /// Consume and return the next field name.
    fn next_name(&mut self) -> Result<String, DocError>;

    /// Consume and return the next value as a string scalar.
    fn next_string(&mut self) -> Result<String, DocError>;

    /// Consume and return the next scalar value.
    fn next_scalar(&mut self) -> Result<Scalar, DocError>;

    /// Report the shape of the next value without advancing.
    fn peek(&self) -> Result<ValueKind, DocError>;

    /// Skip one complete value (scalar or nested object/array) without
    /// materializing it.
    fn skip_value(&mut self) -> Result<(), DocError>;

    /// Fork an independent lookahead cursor at the current position.
    fn branch(&self) -> Box<dyn Cursor + '_>;
}

/// Buffered cursor: a shared token slice plus an owned position index.
///
/// Branching copies the index and shares the slice, which makes branch
/// isolation structural rather than a runtime discipline.
#[derive(Debug, Clone)]
pub struct BufCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> BufCursor<'a> {
    /// Create a cursor over a token slice, positioned at the first token.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Number of tokens consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn peek_token(&self) -> Result<&'a Token, DocError> {
        self.tokens.get(self.pos).ok_or(DocError::UnexpectedEnd)
    }

    fn take_token(&mut self) -> Result<&'a Token, DocError> {
        let token = self.tokens.get(self.pos).ok_or(DocError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, want: &Token, expected: &'static str) -> Result<(), DocError> {
        let found = self.peek_token()?;
        if found == want {
            self.pos += 1;
            Ok(())
        } else {
            Err(DocError::UnexpectedToken {
                expected,
                found: format!("{found}"),
            })
        }
    }
}

impl Cursor for BufCursor<'_> {
    fn begin_object(&mut self) -> Result<(), DocError> {
        self.expect(&Token::BeginObject, "begin of object")
    }

    fn end_object(&mut self) -> Result<(), DocError> {
        self.expect(&Token::EndObject, "end of object")
    }

    fn begin_array(&mut self) -> Result<(), DocError> {
        self.expect(&Token::BeginArray, "begin of array")
    }

    fn end_array(&mut self) -> Result<(), DocError> {
        self.expect(&Token::EndArray, "end of array")
    }

    fn has_next(&self) -> bool {
        !matches!(
            self.tokens.get(self.pos),
            None | Some(Token::EndObject | Token::EndArray)
        )
    }

    fn next_name(&mut self) -> Result<String, DocError> {
        match self.take_token()? {
            Token::Name(name) => Ok(name.clone()),
            other => {
                self.pos -= 1;
                Err(DocError::UnexpectedToken {
                    expected: "field name",
                    found: format!("{other}"),
                })
            }
        }
    }

    fn next_string(&mut self) -> Result<String, DocError> {
        match self.take_token()? {
            Token::Scalar(Scalar::Str(value)) => Ok(value.clone()),
            other => {
                self.pos -= 1;
                Err(DocError::UnexpectedToken {
                    expected: "string value",
                    found: format!("{other}"),
                })
            }
        }
    }

    fn next_scalar(&mut self) -> Result<Scalar, DocError> {
        match self.take_token()? {
            Token::Scalar(value) => Ok(value.clone()),
            other => {
                self.pos -= 1;
                Err(DocError::UnexpectedToken {
                    expected: "scalar value",
                    found: format!("{other}"),
                })
            }
        }
    }

    fn peek(&self) -> Result<ValueKind, DocError> {
        match self.peek_token()? {
            Token::BeginObject => Ok(ValueKind::Object),
            Token::BeginArray => Ok(ValueKind::Array),
            Token::Scalar(Scalar::Null) => Ok(ValueKind::Null),
            Token::Scalar(Scalar::Bool(_)) => Ok(ValueKind::Bool),
            Token::Scalar(Scalar::Int(_) | Scalar::Float(_)) => Ok(ValueKind::Number),
            Token::Scalar(Scalar::Str(_)) => Ok(ValueKind::Str),
            other => Err(DocError::UnexpectedToken {
                expected: "value",
                found: format!("{other}"),
            }),
        }
    }

    fn skip_value(&mut self) -> Result<(), DocError> {
        match self.take_token()? {
            Token::Scalar(_) => Ok(()),
            Token::BeginObject | Token::BeginArray => {
                let mut depth = 1usize;
                while depth > 0 {
                    match self.take_token()? {
                        Token::BeginObject | Token::BeginArray => depth += 1,
                        Token::EndObject | Token::EndArray => depth -= 1,
                        Token::Name(_) | Token::Scalar(_) => {}
                    }
                }
                Ok(())
            }
            other => {
                self.pos -= 1;
                Err(DocError::UnexpectedToken {
                    expected: "value",
                    found: format!("{other}"),
                })
            }
        }
    }

    fn branch(&self) -> Box<dyn Cursor + '_> {
        Box::new(BufCursor {
            tokens: self.tokens,
            pos: self.pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn name(s: &str) -> Token {
        Token::Name(s.to_string())
    }

    fn scalar(s: impl Into<Scalar>) -> Token {
        Token::Scalar(s.into())
    }

    #[test]
    fn walks_a_flat_object() {
        let tokens = vec![
            Token::BeginObject,
            name("kind"),
            scalar("a"),
            name("x"),
            scalar(1i64),
            Token::EndObject,
        ];
        let mut c = BufCursor::new(&tokens);
        c.begin_object().unwrap();
        assert!(c.has_next());
        assert_eq!(c.next_name().unwrap(), "kind");
        assert_eq!(c.next_string().unwrap(), "a");
        assert_eq!(c.next_name().unwrap(), "x");
        assert_eq!(c.next_scalar().unwrap(), Scalar::Int(1));
        assert!(!c.has_next());
        c.end_object().unwrap();
    }

    #[test]
    fn skip_value_spans_nested_structures() {
        let tokens = vec![
            Token::BeginObject,
            name("inner"),
            Token::BeginObject,
            name("list"),
            Token::BeginArray,
            scalar(1i64),
            scalar(2i64),
            Token::EndArray,
            Token::EndObject,
            name("tail"),
            scalar(true),
            Token::EndObject,
        ];
        let mut c = BufCursor::new(&tokens);
        c.begin_object().unwrap();
        assert_eq!(c.next_name().unwrap(), "inner");
        c.skip_value().unwrap();
        assert_eq!(c.next_name().unwrap(), "tail");
        assert_eq!(c.next_scalar().unwrap(), Scalar::Bool(true));
        c.end_object().unwrap();
    }

    #[test]
    fn branch_never_advances_the_parent() {
        let tokens = vec![
            Token::BeginObject,
            name("x"),
            scalar(1i64),
            Token::EndObject,
        ];
        let c = BufCursor::new(&tokens);
        {
            let mut look = c.branch();
            look.begin_object().unwrap();
            assert_eq!(look.next_name().unwrap(), "x");
            look.skip_value().unwrap();
            look.end_object().unwrap();
        }
        // The parent still sees the whole object.
        assert_eq!(c.position(), 0);
        let mut c = c;
        c.begin_object().unwrap();
        assert_eq!(c.next_name().unwrap(), "x");
    }

    #[test]
    fn peek_classifies_without_advancing() {
        let tokens = vec![scalar(Scalar::Null)];
        let c = BufCursor::new(&tokens);
        assert_eq!(c.peek().unwrap(), ValueKind::Null);
        assert_eq!(c.peek().unwrap(), ValueKind::Null);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn mismatched_reads_report_the_found_token() {
        let tokens = vec![Token::BeginObject, name("x"), scalar(1i64), Token::EndObject];
        let mut c = BufCursor::new(&tokens);
        c.begin_object().unwrap();
        c.next_name().unwrap();
        let err = c.next_string().unwrap_err();
        assert_eq!(
            err,
            DocError::UnexpectedToken {
                expected: "string value",
                found: "scalar 1".to_string(),
            }
        );
        // The failed read consumed nothing.
        assert_eq!(c.next_scalar().unwrap(), Scalar::Int(1));
    }

    #[test]
    fn reading_past_the_end_fails() {
        let tokens = vec![Token::BeginObject, Token::EndObject];
        let mut c = BufCursor::new(&tokens);
        c.begin_object().unwrap();
        c.end_object().unwrap();
        assert_eq!(c.next_scalar().unwrap_err(), DocError::UnexpectedEnd);
    }

    #[test]
    fn truncated_nested_value_fails_skip() {
        let tokens = vec![name("inner"), Token::BeginObject, name("x")];
        let mut c = BufCursor::new(&tokens);
        c.next_name().unwrap();
        assert_eq!(c.skip_value().unwrap_err(), DocError::UnexpectedEnd);
    }
}
