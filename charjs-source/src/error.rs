//! Error taxonomy shared by every stage of the pipeline.
//!
//! None of these are recovered from: the first error aborts lexing, parsing or evaluation
//! and is returned to the caller of the evaluation entry point.

use thiserror::Error;

/// Result type used across the interpreter.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Unrecognized character or unterminated literal.
    #[error("lexical error: {message} at position {position}")]
    Lexical { message: String, position: usize },

    /// The current token does not fit the grammar.
    #[error("syntax error: expected {expected}, found {found} at position {position}")]
    Syntax {
        expected: String,
        found: String,
        position: usize,
    },

    /// An identifier is not bound anywhere in the environment chain.
    #[error("reference error: {name} is not defined")]
    Reference { name: String },

    /// Invalid operand, call of a non-function, member access on a non-object.
    #[error("type error: {0}")]
    Type(String),

    /// The construct is recognized by the grammar but has no evaluation rule.
    #[error("not implemented: {0}")]
    Unimplemented(String),

    /// Parser nesting or call depth went past its limit.
    #[error("maximum depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    /// Writing to an output sink failed.
    #[error("output error: {0}")]
    Output(String),
}

impl Error {
    pub fn lexical(message: impl ToString, position: usize) -> Self {
        Error::Lexical {
            message: message.to_string(),
            position,
        }
    }

    pub fn syntax(expected: impl ToString, found: impl ToString, position: usize) -> Self {
        Error::Syntax {
            expected: expected.to_string(),
            found: found.to_string(),
            position,
        }
    }

    pub fn type_error(message: impl ToString) -> Self {
        Error::Type(message.to_string())
    }

    pub fn unimplemented(what: impl ToString) -> Self {
        Error::Unimplemented(what.to_string())
    }

    /// Byte offset in the source, for errors raised before evaluation.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Lexical { position, .. } | Error::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}
