//! Error types for encoding and decoding.
//!
//! Every failure aborts the whole encode or decode call; there is no partial
//! result and no transient failure mode to retry. Decode-side errors carry the
//! 1-based line number of the offending input line.

use crate::schema::ScalarKind;
use std::fmt;
use thiserror::Error;

/// All failures the codec can produce.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A construct the notation deliberately does not support: rectangular
    /// sequences, or mapping entries whose declared value is not a scalar.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A scalar token that could not be parsed as its declared kind.
    #[error("line {line}: cannot read {token:?} as {kind}: {reason}")]
    Conversion {
        line: usize,
        token: String,
        kind: ScalarKind,
        reason: String,
    },

    /// Text that disagrees with the declared schema: an unknown field name, or
    /// a fixed-length sequence with the wrong element count.
    #[error("line {line}: {msg}")]
    Mismatch { line: usize, msg: String },

    /// Text that is not a well-formed document, independent of any schema.
    #[error("line {line}: malformed document: {msg}")]
    Document { line: usize, msg: String },

    /// Failure in a reader/writer adapter.
    #[error("io error: {0}")]
    Io(String),

    /// Anything else, mostly materialization failures.
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::Unsupported(msg.into())
    }

    pub fn conversion(
        line: usize,
        token: &str,
        kind: ScalarKind,
        reason: impl fmt::Display,
    ) -> Self {
        Error::Conversion {
            line,
            token: token.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }

    pub fn mismatch(line: usize, msg: impl Into<String>) -> Self {
        Error::Mismatch {
            line,
            msg: msg.into(),
        }
    }

    pub fn document(line: usize, msg: impl Into<String>) -> Self {
        Error::Document {
            line,
            msg: msg.into(),
        }
    }

    pub fn io(msg: impl fmt::Display) -> Self {
        Error::Io(msg.to_string())
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Error::Message(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
