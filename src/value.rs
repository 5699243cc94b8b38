//! Dynamic value representation for configuration documents.
//!
//! This module provides the [`Value`] enum, a closed set of six variants:
//! `Null`, `String`, `Number`, `Boolean`, `Array` and `Object`.
//!
//! ## Ownership
//!
//! A `Value` exclusively owns its subtree. `clone()` is a deep copy, so two
//! handles never alias the same mutable node. [`Value::take`] moves a subtree
//! out and leaves `Null` behind.
//!
//! ## Autovivification
//!
//! Indexed or keyed writes on a `Null` value turn it into an empty `Array` or
//! `Object` in place before returning the requested slot:
//!
//! ```rust
//! use serde_tagconf::Value;
//!
//! let mut config = Value::Null;
//! config["server"]["host"] = Value::from("localhost");
//! config["server"]["ports"][1] = Value::from(8080);
//!
//! assert!(config.is_object());
//! assert!(config["server"].is_object());
//! assert_eq!(config["server"]["ports"].as_array().unwrap().len(), 2);
//! assert!(config["server"]["ports"][0].is_null());
//! ```
//!
//! ## Typed access
//!
//! Typed accessors return a [`Result`] and fail with
//! [`Error::TypeMismatch`] on any other variant:
//!
//! ```rust
//! use serde_tagconf::{Error, Value};
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_integer(), Ok(42));
//! assert_eq!(
//!     value.as_string(),
//!     Err(Error::TypeMismatch { expected: "string", found: "number" })
//! );
//! ```

use crate::de::parse_reader;
use crate::options::{FormatOptions, ParseOptions};
use crate::ser::Formatter;
use crate::{Array, Error, Number, Object, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

static NULL: Value = Value::Null;

/// A dynamically-typed configuration value.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::{Number, Value};
///
/// let text = Value::string("hello");
/// let num = Value::number(7u32);
///
/// assert!(text.is_string());
/// assert_eq!(num, Value::Number(Number::Unsigned(7)));
/// assert!(Value::default().is_null());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    String(String),
    Number(Number),
    Boolean(bool),
    Array(Array),
    Object(Object),
}

impl Value {
    /// Returns the lowercase name of the active variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_string(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }

    pub fn as_number(&self) -> Result<&Number> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(Error::type_mismatch("number", other.type_name())),
        }
    }

    /// Shorthand for `as_number()?.to_int32()`.
    pub fn as_integer(&self) -> Result<i32> {
        self.as_number().map(Number::to_int32)
    }

    /// Shorthand for `as_number()?.to_double()`.
    pub fn as_double(&self) -> Result<f64> {
        self.as_number().map(Number::to_double)
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(Error::type_mismatch("boolean", other.type_name())),
        }
    }

    pub fn as_array(&self) -> Result<&Array> {
        match self {
            Value::Array(array) => Ok(array),
            other => Err(Error::type_mismatch("array", other.type_name())),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(array) => Ok(array),
            other => Err(Error::type_mismatch("array", other.type_name())),
        }
    }

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(object) => Ok(object),
            other => Err(Error::type_mismatch("object", other.type_name())),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(object) => Ok(object),
            other => Err(Error::type_mismatch("object", other.type_name())),
        }
    }

    /// Returns the slot at `index`, autovivifying along the way.
    ///
    /// A `Null` value first becomes an empty array; an array grows with `Null`
    /// slots up to and including `index`.
    ///
    /// # Errors
    ///
    /// Fails with `NotIndexable` on strings, numbers, booleans and objects,
    /// and with `IndexOutOfBounds` for `usize::MAX`, which no array can hold.
    pub fn element(&mut self, index: usize) -> Result<&mut Value> {
        if self.is_null() {
            *self = Value::Array(Array::new());
        }
        match self {
            Value::Array(array) if index == usize::MAX => {
                Err(Error::index_out_of_bounds(index, array.len()))
            }
            Value::Array(array) => Ok(array.get_or_grow(index)),
            other => Err(Error::not_indexable(other.type_name())),
        }
    }

    /// Returns the slot for `key`, autovivifying along the way.
    ///
    /// A `Null` value first becomes an empty object; an absent key is appended
    /// with a `Null` value.
    ///
    /// # Errors
    ///
    /// Fails with `NotKeyable` on strings, numbers, booleans and arrays.
    pub fn field(&mut self, key: &str) -> Result<&mut Value> {
        if self.is_null() {
            *self = Value::Object(Object::new());
        }
        match self {
            Value::Object(object) => Ok(object.get_or_insert(key)),
            other => Err(Error::not_keyable(other.type_name())),
        }
    }

    /// Looks up `key` without mutating; `None` unless this is an object holding it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Looks up `index` without mutating; `None` unless this is an array long enough.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(array) => array.get(index),
            _ => None,
        }
    }

    /// Moves the value out, leaving `Null` in its place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tagconf::Value;
    ///
    /// let mut slot = Value::from("moved");
    /// let taken = slot.take();
    /// assert!(slot.is_null());
    /// assert_eq!(taken.as_string(), Ok("moved"));
    /// ```
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Returns `true` if this is an object holding `key`. Never fails.
    #[must_use]
    pub fn has_field(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn has_string_field(&self, key: &str) -> bool {
        self.get(key).map_or(false, Value::is_string)
    }

    #[must_use]
    pub fn has_number_field(&self, key: &str) -> bool {
        self.get(key).map_or(false, Value::is_number)
    }

    #[must_use]
    pub fn has_boolean_field(&self, key: &str) -> bool {
        self.get(key).map_or(false, Value::is_boolean)
    }

    #[must_use]
    pub fn has_array_field(&self, key: &str) -> bool {
        self.get(key).map_or(false, Value::is_array)
    }

    #[must_use]
    pub fn has_object_field(&self, key: &str) -> bool {
        self.get(key).map_or(false, Value::is_object)
    }

    #[must_use]
    pub fn null() -> Value {
        Value::Null
    }

    #[must_use]
    pub fn string(value: impl Into<String>) -> Value {
        Value::String(value.into())
    }

    #[must_use]
    pub fn number(value: impl Into<Number>) -> Value {
        Value::Number(value.into())
    }

    #[must_use]
    pub fn boolean(value: bool) -> Value {
        Value::Boolean(value)
    }

    #[must_use]
    pub fn array() -> Value {
        Value::Array(Array::new())
    }

    /// An array pre-filled with `size` `Null` slots.
    #[must_use]
    pub fn array_with_size(size: usize) -> Value {
        Value::Array(Array::with_size(size))
    }

    #[must_use]
    pub fn array_from(elements: Vec<Value>) -> Value {
        Value::Array(Array::from(elements))
    }

    #[must_use]
    pub fn object() -> Value {
        Value::Object(Object::new())
    }

    /// An object seeded from ordered entries. Duplicate keys are kept as given.
    #[must_use]
    pub fn object_from(entries: Vec<(String, Value)>) -> Value {
        Value::Object(Object::from_entries(entries))
    }

    /// Renders this tree in the tag-delimited text format with default options.
    #[must_use]
    pub fn to_text(&self) -> String {
        Formatter::new(FormatOptions::default()).format(self)
    }

    /// Writes this tree to `path`, truncating any existing file.
    ///
    /// Does nothing if the file cannot be opened; the failure is only logged.
    pub fn save<P: AsRef<Path>>(&self, path: P) {
        let path = path.as_ref();
        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot open file for saving");
                return;
            }
        };

        let text = self.to_text();
        let mut writer = BufWriter::new(file);
        if let Err(e) = writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.flush())
        {
            tracing::warn!(path = %path.display(), error = %e, "write failed while saving");
        }
    }

    /// Reads a tree from `path`.
    ///
    /// Returns `Null` if the file cannot be opened.
    ///
    /// # Errors
    ///
    /// Fails with `MalformedInput` on structurally invalid tag sequences and
    /// with `Io` if reading fails after the file was opened. Files holding
    /// arrays of scalars under a key need [`Value::load_with_options`] with
    /// `scalar_scopes` enabled.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Value> {
        Self::load_with_options(path, ParseOptions::default())
    }

    /// Like [`Value::load`], with explicit parser options.
    pub fn load_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Value> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot open file for loading");
                return Ok(Value::Null);
            }
        };
        parse_reader(BufReader::new(file), options)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Returns `Null` when this is not an array or `index` is out of range.
    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl IndexMut<usize> for Value {
    /// Autovivifying write access; panics if this is not `Null` or an array.
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self.element(index) {
            Ok(slot) => slot,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Returns `Null` when this is not an object or `key` is absent.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Value {
    /// Autovivifying write access; panics if this is not `Null` or an object.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self.field(key) {
            Ok(slot) => slot,
            Err(e) => panic!("{}", e),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(Number::Signed(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Unsigned(u)) => serializer.serialize_u64(*u),
            Value::Number(Number::Double(f)) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Array(array) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(array.len()))?;
                for element in array {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(object) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (k, v) in object.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any configuration value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::Signed(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::Unsigned(value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::Double(value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut array = Array::new();
                while let Some(element) = seq.next_element()? {
                    array.push(element);
                }
                Ok(Value::Array(array))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut object = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    object.insert(key, value);
                }
                Ok(Value::Object(object))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autovivify_array_fills_gaps() {
        let mut value = Value::Null;
        value[3] = Value::from("x");
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 4);
        assert!(array.iter().take(3).all(Value::is_null));
        assert_eq!(value[3], Value::from("x"));
    }

    #[test]
    fn test_element_at_max_index_fails() {
        let mut value = Value::from(vec![Value::from(1)]);
        assert_eq!(
            value.element(usize::MAX),
            Err(Error::IndexOutOfBounds {
                index: usize::MAX,
                len: 1
            })
        );
        assert_eq!(value, Value::from(vec![Value::from(1)]));
    }

    #[test]
    fn test_autovivify_nested_objects() {
        let mut value = Value::Null;
        value["a"]["b"] = Value::from(1.5);
        assert!(value.is_object());
        assert!(value["a"].is_object());
        assert_eq!(value["a"]["b"].as_double(), Ok(1.5));
    }

    #[test]
    fn test_element_and_field_reject_wrong_containers() {
        let mut object = Value::object();
        assert_eq!(
            object.element(0),
            Err(Error::NotIndexable { found: "object" })
        );

        let mut array = Value::array();
        assert_eq!(array.field("k"), Err(Error::NotKeyable { found: "array" }));

        let mut text = Value::from("s");
        assert_eq!(text.field("k"), Err(Error::NotKeyable { found: "string" }));
        assert_eq!(text, Value::from("s"));
    }

    #[test]
    #[should_panic(expected = "cannot index into boolean by position")]
    fn test_index_mut_panics_on_scalar() {
        let mut value = Value::from(true);
        value[0] = Value::Null;
    }

    #[test]
    fn test_read_index_does_not_autovivify() {
        let value = Value::Null;
        assert!(value["missing"].is_null());
        assert!(value[9].is_null());
        assert!(value.is_null());
    }

    #[test]
    fn test_deep_copy_independence() {
        let mut original = Value::Null;
        original["list"][0] = Value::from(1);
        original["list"][1]["inner"] = Value::from("keep");

        let mut copy = original.clone();
        copy["list"][1]["inner"] = Value::from("changed");
        copy["list"][5] = Value::from(false);
        copy["extra"] = Value::from(2);

        assert_eq!(original["list"][1]["inner"], Value::from("keep"));
        assert_eq!(original["list"].as_array().unwrap().len(), 2);
        assert!(!original.has_field("extra"));
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(Value::from("s").as_string(), Ok("s"));
        assert_eq!(Value::from(false).as_boolean(), Ok(false));
        assert_eq!(Value::from(-7i64).as_integer(), Ok(-7));
        assert_eq!(
            Value::Null.as_boolean(),
            Err(Error::type_mismatch("boolean", "null"))
        );
        assert_eq!(
            Value::array().as_object(),
            Err(Error::type_mismatch("object", "array"))
        );
        assert_eq!(
            Value::object().as_number(),
            Err(Error::type_mismatch("number", "object"))
        );
    }

    #[test]
    fn test_has_field_family() {
        let mut value = Value::Null;
        value["name"] = Value::from("svc");
        value["port"] = Value::from(80u16);
        value["tls"] = Value::from(true);
        value["hosts"][0] = Value::from("a");
        value["limits"]["cpu"] = Value::from(2);
        value["unset"] = Value::Null;

        assert!(value.has_field("unset"));
        assert!(value.has_string_field("name"));
        assert!(value.has_number_field("port"));
        assert!(value.has_boolean_field("tls"));
        assert!(value.has_array_field("hosts"));
        assert!(value.has_object_field("limits"));
        assert!(!value.has_string_field("port"));
        assert!(!value.has_field("absent"));
        assert!(!Value::from(3).has_field("name"));
    }

    #[test]
    fn test_factories() {
        assert_eq!(Value::array_with_size(2), Value::from(vec![Value::Null, Value::Null]));
        assert_eq!(Value::number(1u64), Value::Number(Number::Unsigned(1)));
        assert_eq!(Value::number(1i32), Value::Number(Number::Signed(1)));
        assert_eq!(Value::boolean(true), Value::Boolean(true));
        assert!(Value::null().is_null());

        let object = Value::object_from(vec![
            ("a".to_string(), Value::from(1)),
            ("a".to_string(), Value::from(2)),
        ]);
        assert_eq!(object.as_object().unwrap().len(), 2);
        assert_eq!(object["a"], Value::from(1));
    }

    #[test]
    fn test_serde_json_interop() {
        let mut value = Value::Null;
        value["name"] = Value::from("Alice");
        value["ids"][0] = Value::from(1u8);
        value["ids"][1] = Value::from(-2);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"name":"Alice","ids":[1,-2]}"#);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back["ids"][0], Value::Number(Number::Unsigned(1)));
        assert_eq!(back["ids"][1], Value::Number(Number::Signed(-2)));
    }
}
