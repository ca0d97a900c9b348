//! Source code representation and error management.

mod char_stream;
mod error;

pub use char_stream::CharStream;
pub use error::{Error, Result};

/// Represents source code.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Byte offset of `content` inside the outermost source.
    /// Non-zero only for sources carved out of a larger one (e.g. template literal spans).
    pub base_offset: usize,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            base_offset: 0,
        }
    }

    /// Create a `Source` for a fragment that starts at `base_offset` of an enclosing source.
    /// Positions reported while scanning the fragment are relative to the enclosing source.
    pub fn nested(content: &'a str, base_offset: usize) -> Self {
        Self {
            content,
            base_offset,
        }
    }

    /// Creates a [`CharStream`] over the content.
    pub fn stream(&self) -> CharStream<'a> {
        CharStream::new(self.content)
    }

    /// Returns the 1-based `(line, column)` of an absolute byte `position`.
    /// Only meaningful on the outermost source.
    pub fn line_col(&self, position: usize) -> (usize, usize) {
        let position = position.min(self.content.len());
        let before = &self.content[..position];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, column)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}
