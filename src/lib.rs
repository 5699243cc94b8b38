//! # serde_tagconf
//!
//! A hierarchical configuration value model with a line-oriented,
//! tag-delimited text format, plus a Serde bridge for typed configuration.
//!
//! ## What is in the box?
//!
//! - **[`Value`]**: a dynamically typed tree (`Null`, `String`, `Number`,
//!   `Boolean`, `Array`, `Object`) with autovivifying writes
//! - **Text format**: one tag per line, readable and diffable; see
//!   [`syntax`] for the grammar
//! - **Persistence**: [`Value::save`] and [`Value::load`] with lenient
//!   file-open semantics
//! - **Serde compatible**: any `#[derive(Serialize, Deserialize)]` type can be
//!   written and read through the same format
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_tagconf = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Building a tree by hand
//!
//! ```rust
//! use serde_tagconf::{parse, parse_with_options, ParseOptions, Value};
//!
//! let mut config = Value::Null;
//! config["server"]["host"] = Value::from("localhost");
//! config["server"]["port"] = Value::from(8080);
//! config["features"][0] = Value::from("tls");
//!
//! let text = config.to_text();
//! assert_eq!(
//!     text,
//!     concat!(
//!         "<server>\n",
//!         "  <key=\"host\" type=\"String\" value=\"localhost\">\n",
//!         "  <key=\"port\" type=\"Number\" value=\"8080\">\n",
//!         "</server>\n",
//!         "<features>\n",
//!         "  <type=\"String\" value=\"tls\">\n",
//!         "</features>\n",
//!     )
//! );
//!
//! // scalars under a named scope need `scalar_scopes` to read back
//! assert!(parse(&text).is_err());
//! let options = ParseOptions::new().with_scalar_scopes(true);
//! assert_eq!(parse_with_options(&text, options).unwrap(), config);
//! ```
//!
//! ### Typed configuration
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tagconf::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     verbose: bool,
//! }
//!
//! let server = Server { host: "localhost".into(), port: 8080, verbose: false };
//! let text = to_string(&server).unwrap();
//! let back: Server = from_str(&text).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ### Literal trees with the `tagconf!` macro
//!
//! ```rust
//! use serde_tagconf::tagconf;
//!
//! let config = tagconf!({
//!     "name": "edge",
//!     "replicas": 3,
//!     "zones": ["a", "b"]
//! });
//! assert_eq!(config["zones"][1].as_string(), Ok("b"));
//! ```
//!
//! ## Format limits
//!
//! The text format has no escaping. Keys must not contain whitespace, `/` or
//! `#`, and string values must not contain `"` or line breaks. `Null` entries
//! and empty strings are not written, and empty containers reload as `Null`.
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `warn` when a
//! file cannot be opened for [`Value::save`] or [`Value::load`], `trace` for
//! every scope the parser opens or closes, and a `debug` summary per parse.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - typed round trip through the text format
//! - **`macro.rs`** - building trees with the `tagconf!` macro
//! - **`dynamic_values.rs`** - autovivification and typed access
//! - **`persistence.rs`** - saving and loading files
//!
//! Run any example with: `cargo run --example <name>`

pub mod array;
pub mod de;
pub mod error;
pub mod macros;
pub mod number;
pub mod object;
pub mod options;
pub mod ser;
pub mod syntax;
pub mod value;

pub use array::Array;
pub use de::{from_value, Parser, ValueDeserializer};
pub use error::{Error, Result};
pub use number::Number;
pub use object::Object;
pub use options::{FormatOptions, ParseOptions};
pub use ser::{to_value, Formatter, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to tag-delimited text.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(
///     text,
///     "<key=\"x\" type=\"Number\" value=\"1\">\n<key=\"y\" type=\"Number\" value=\"2\">\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a [`Value`] tree,
/// e.g. a map with non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, FormatOptions::default())
}

/// Serialize any `T: Serialize` to tag-delimited text with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a [`Value`] tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: FormatOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    Ok(Formatter::new(options).format(&tree))
}

/// Serialize any `T: Serialize` to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert!(buffer.starts_with(b"<key=\"x\""));
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, FormatOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: FormatOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parse tag-delimited text into a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::parse;
///
/// let value = parse("<key=\"retries\" type=\"Number\" value=\"3\">").unwrap();
/// assert_eq!(value["retries"].as_integer(), Ok(3));
/// ```
///
/// # Errors
///
/// Returns `MalformedInput` with the offending line number for structurally
/// invalid input, including positional scalars under a named scope that is
/// not an array.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse tag-delimited text with custom options.
///
/// # Errors
///
/// As [`parse`]; strict options additionally reject unclosed scopes and
/// mismatched close labels. With `scalar_scopes`, positional scalars under an
/// unset named scope are read as an array instead of rejected.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Value> {
    de::parse_str(input, options)
}

/// Deserialize an instance of type `T` from tag-delimited text.
///
/// Sequences of scalars are written as positional lines under a named scope,
/// so the typed readers parse with `scalar_scopes` enabled.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let text = "<key=\"x\" type=\"Number\" value=\"1\">\n<key=\"y\" type=\"Number\" value=\"2\">";
/// let point: Point = from_str(text).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or does not have the shape `T`
/// expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, typed_options())
}

/// Deserialize an instance of type `T` from text with custom parser options.
///
/// The options are used as given; see [`ParseOptions::with_scalar_scopes`]
/// for structs holding sequences of scalars.
///
/// # Errors
///
/// As [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// The stream is read line by line as it is parsed.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let bytes = b"<key=\"x\" type=\"Number\" value=\"1\">\n<key=\"y\" type=\"Number\" value=\"2\">\n";
/// let point: Point = from_reader(Cursor::new(bytes)).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is malformed, or the tree
/// does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let tree = de::parse_reader(io::BufReader::new(reader), typed_options())?;
    from_value(tree)
}

/// Deserialize an instance of type `T` from bytes of text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the input is malformed,
/// or the tree does not have the shape `T` expects.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

fn typed_options() -> ParseOptions {
    ParseOptions::new().with_scalar_scopes(true)
}
