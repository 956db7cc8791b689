// SPDX-License-Identifier: Apache-2.0
//! Document writer with flatten support.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{DocError, Document, Scalar, Token};

/// Writer over an object document.
///
/// # Flatten Mode
///
/// Between [`Sink::begin_flatten`] and [`Sink::end_flatten`], the begin/end
/// pair of an object opened directly inside the currently open object is
/// suppressed: the nested object's fields are written as siblings of the
/// enclosing object's own fields instead of nesting under a value. This is
/// how a polymorphic codec merges a variant's fields next to the
/// discriminant field it has already written.
///
/// Flatten applies to objects only; array values written while flatten is
/// active nest normally.
pub trait Sink {
    /// Open an object.
    fn begin_object(&mut self) -> Result<(), DocError>;

    /// Close the current object.
    fn end_object(&mut self) -> Result<(), DocError>;

    /// Open an array.
    fn begin_array(&mut self) -> Result<(), DocError>;

    /// Close the current array.
    fn end_array(&mut self) -> Result<(), DocError>;

    /// Write a field name inside the current object.
    fn name(&mut self, name: &str) -> Result<(), DocError>;

    /// Write a scalar value.
    fn scalar(&mut self, value: Scalar) -> Result<(), DocError>;

    /// Enter flatten mode for the currently open object.
    ///
    /// Returns a token that restores the previous flatten state when passed
    /// to [`Sink::end_flatten`]; flatten sections nest.
    fn begin_flatten(&mut self) -> Result<FlattenToken, DocError>;

    /// Leave flatten mode, restoring the state captured by the token.
    fn end_flatten(&mut self, token: FlattenToken) -> Result<(), DocError>;
}

/// Restores the enclosing flatten state on [`Sink::end_flatten`].
///
/// Opaque by design: holding one only proves a matching `begin_flatten`
/// happened.
#[derive(Debug)]
#[must_use = "end_flatten must receive this token to restore the writer state"]
pub struct FlattenToken(Option<usize>);

/// Open scopes tracked by [`BufSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object,
    Array,
    /// An object whose begin/end pair was suppressed by flatten mode.
    Flattened,
}

/// Buffered sink producing an owned [`Document`].
#[derive(Debug, Default)]
pub struct BufSink {
    tokens: Vec<Token>,
    stack: Vec<Frame>,
    /// Stack depth at which object begin/end pairs are currently suppressed.
    flatten_at: Option<usize>,
}

impl BufSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish writing and return the document.
    ///
    /// Fails if any object, array, or flatten section is still open.
    pub fn finish(self) -> Result<Document, DocError> {
        if !self.stack.is_empty() {
            return Err(DocError::Scope(format!(
                "document finished with {} open scope(s)",
                self.stack.len()
            )));
        }
        if self.flatten_at.is_some() {
            return Err(DocError::Scope(String::from(
                "document finished inside a flatten section",
            )));
        }
        Ok(Document::from_tokens(self.tokens))
    }

    fn in_object(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Object | Frame::Flattened))
    }
}

impl Sink for BufSink {
    fn begin_object(&mut self) -> Result<(), DocError> {
        if self.flatten_at == Some(self.stack.len()) {
            self.stack.push(Frame::Flattened);
        } else {
            self.tokens.push(Token::BeginObject);
            self.stack.push(Frame::Object);
        }
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), DocError> {
        match self.stack.pop() {
            Some(Frame::Object) => {
                self.tokens.push(Token::EndObject);
                Ok(())
            }
            Some(Frame::Flattened) => Ok(()),
            Some(Frame::Array) => {
                self.stack.push(Frame::Array);
                Err(DocError::Scope(String::from(
                    "end_object inside an open array",
                )))
            }
            None => Err(DocError::Scope(String::from(
                "end_object with no open object",
            ))),
        }
    }

    fn begin_array(&mut self) -> Result<(), DocError> {
        self.tokens.push(Token::BeginArray);
        self.stack.push(Frame::Array);
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), DocError> {
        match self.stack.pop() {
            Some(Frame::Array) => {
                self.tokens.push(Token::EndArray);
                Ok(())
            }
            Some(frame) => {
                self.stack.push(frame);
                Err(DocError::Scope(String::from(
                    "end_array inside an open object",
                )))
            }
            None => Err(DocError::Scope(String::from(
                "end_array with no open array",
            ))),
        }
    }

    fn name(&mut self, name: &str) -> Result<(), DocError> {
        if !self.in_object() {
            return Err(DocError::Scope(format!(
                "name {name:?} written outside an object"
            )));
        }
        self.tokens.push(Token::Name(String::from(name)));
        Ok(())
    }

    fn scalar(&mut self, value: Scalar) -> Result<(), DocError> {
        self.tokens.push(Token::Scalar(value));
        Ok(())
    }

    fn begin_flatten(&mut self) -> Result<FlattenToken, DocError> {
        if !self.in_object() {
            return Err(DocError::Scope(String::from(
                "begin_flatten with no open object",
            )));
        }
        let token = FlattenToken(self.flatten_at);
        self.flatten_at = Some(self.stack.len());
        Ok(token)
    }

    fn end_flatten(&mut self, token: FlattenToken) -> Result<(), DocError> {
        self.flatten_at = token.0;
        Ok(())
    }
}
