//! Error types for the value model and the tag-delimited text format.
//!
//! Every failure in this crate is reported synchronously at the point of
//! violation and surfaces as an [`Error`] value through [`Result`].
//!
//! ## Error Categories
//!
//! - **Accessor errors**: calling a typed accessor on the wrong variant
//!   ([`Error::TypeMismatch`]) or indexing a value that is not a container
//!   ([`Error::NotIndexable`], [`Error::NotKeyable`])
//! - **Strict lookups**: [`Error::IndexOutOfBounds`] and [`Error::KeyNotFound`]
//!   from the read-strict `at` accessors
//! - **Parse errors**: [`Error::MalformedInput`] carries the 1-based line number
//!   of the offending tag
//! - **I/O errors**: reader/writer failures from the stream helpers
//!
//! File-open failures in [`Value::save`](crate::Value::save) and
//! [`Value::load`](crate::Value::load) are deliberately not reported here.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagconf::{parse, Error};
//!
//! let result = parse("</orphan>");
//! assert!(matches!(result, Err(Error::MalformedInput { line: 1, .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by the value model, the formatter and the parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A typed accessor was called on a value of another variant
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Positional access on a value that is neither Null nor an array
    #[error("cannot index into {found} by position")]
    NotIndexable { found: &'static str },

    /// Keyed access on a value that is neither Null nor an object
    #[error("cannot index into {found} by key")]
    NotKeyable { found: &'static str },

    /// Read-strict array access past the end
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Read-strict object access with an absent key
    #[error("key not found: {0:?}")]
    KeyNotFound(String),

    /// Structurally invalid tag sequence
    #[error("malformed input at line {line}: {msg}")]
    MalformedInput { line: usize, msg: String },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error, mostly raised through the serde bridge
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error for a wrong-variant accessor call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::Error;
    ///
    /// let err = Error::type_mismatch("string", "number");
    /// assert_eq!(err.to_string(), "type mismatch: expected string, found number");
    /// ```
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub fn not_indexable(found: &'static str) -> Self {
        Error::NotIndexable { found }
    }

    pub fn not_keyable(found: &'static str) -> Self {
        Error::NotKeyable { found }
    }

    /// Creates an out-of-bounds error for a strict array read.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates a missing-key error for a strict object read.
    pub fn key_not_found(key: &str) -> Self {
        Error::KeyNotFound(key.to_string())
    }

    /// Creates a parse error anchored at a 1-based line number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::Error;
    ///
    /// let err = Error::malformed(3, "unbalanced close tag");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn malformed(line: usize, msg: &str) -> Self {
        Error::MalformedInput {
            line,
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::index_out_of_bounds(5, 2).to_string(),
            "index 5 out of bounds for array of length 2"
        );
        assert_eq!(
            Error::key_not_found("port").to_string(),
            "key not found: \"port\""
        );
        assert_eq!(
            Error::not_keyable("array").to_string(),
            "cannot index into array by key"
        );
    }

    #[test]
    fn test_serde_custom() {
        let err = <Error as serde::de::Error>::custom("bad field");
        assert_eq!(err, Error::Custom("bad field".to_string()));
    }
}
