//! Configuration options for formatting and parsing.
//!
//! - [`FormatOptions`]: controls the cosmetic indentation of written text
//! - [`ParseOptions`]: opts into stricter scope checking, or into scalar
//!   lists under named scopes, when reading
//!
//! ## Examples
//!
//! ```rust
//! use serde_tagconf::{parse_with_options, to_string_with_options, FormatOptions, ParseOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Limits { cpu: u32 }
//!
//! #[derive(Serialize)]
//! struct Service { limits: Limits }
//!
//! let text = to_string_with_options(&Service { limits: Limits { cpu: 2 } }, FormatOptions::new().with_indent(4)).unwrap();
//! assert_eq!(text, "<limits>\n    <key=\"cpu\" type=\"Number\" value=\"2\">\n</limits>\n");
//!
//! // Unclosed scopes are accepted by default and rejected in strict mode
//! assert!(parse_with_options("<open>", ParseOptions::default()).is_ok());
//! assert!(parse_with_options("<open>", ParseOptions::strict()).is_err());
//! ```

/// Options for the text formatter.
///
/// Indentation carries no meaning for the parser; it only makes nesting
/// readable.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatOptions {
    pub indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions { indent: 2 }
    }
}

impl FormatOptions {
    /// Creates default options (2-space indent per nesting level).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::FormatOptions;
    ///
    /// let options = FormatOptions::new();
    /// assert_eq!(options.indent, 2);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Options for the line parser.
///
/// The default parser accepts scopes still open at end of input and pops
/// scopes without comparing close labels. `strict` rejects both.
///
/// A positional scalar is only accepted while the innermost scope is an
/// array. With `scalar_scopes`, a positional scalar inside a named scope that
/// is still unset turns that scope into an array first. This is how the
/// formatter writes sequences of scalars under a key.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ParseOptions {
    pub strict: bool,
    pub scalar_scopes: bool,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject unclosed scopes and mismatched close labels.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::ParseOptions;
    ///
    /// assert!(ParseOptions::strict().strict);
    /// assert!(!ParseOptions::new().strict);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions {
            strict: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Lets positional scalars build an array under an unset named scope.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::{parse_with_options, ParseOptions, Value};
    ///
    /// let text = "<ports>\n  <type=\"Number\" value=\"80\">\n</ports>\n";
    /// assert!(parse_with_options(text, ParseOptions::new()).is_err());
    ///
    /// let value = parse_with_options(text, ParseOptions::new().with_scalar_scopes(true)).unwrap();
    /// assert_eq!(value["ports"], Value::from(vec![Value::from(80)]));
    /// ```
    #[must_use]
    pub fn with_scalar_scopes(mut self, enabled: bool) -> Self {
        self.scalar_scopes = enabled;
        self
    }
}
