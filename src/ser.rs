//! Serialization to the tag-delimited text format.
//!
//! This module provides two pieces:
//!
//! - [`Formatter`] walks a [`Value`] tree top-down and writes one tag line per
//!   scalar, wrapping nested containers in delimiter tags
//! - [`ValueSerializer`] turns any `T: Serialize` into a [`Value`] so that Rust
//!   types can be persisted through the same formatter
//!
//! ## Output shape
//!
//! ```rust
//! use serde_tagconf::Value;
//!
//! let mut config = Value::Null;
//! config["name"] = Value::from("edge");
//! config["ports"][0] = Value::from(80);
//! config["ports"][1] = Value::from(443);
//! config["debug"] = Value::from(false);
//!
//! assert_eq!(
//!     config.to_text(),
//!     concat!(
//!         "<key=\"name\" type=\"String\" value=\"edge\">\n",
//!         "<ports>\n",
//!         "  <type=\"Number\" value=\"80\">\n",
//!         "  <type=\"Number\" value=\"443\">\n",
//!         "</ports>\n",
//!         "<key=\"debug\" type=\"Boolean\" value=\"false\">\n",
//!     )
//! );
//! ```
//!
//! `Null` entries inside arrays and objects are skipped entirely, so a saved
//! and reloaded tree loses them.

use crate::{Array, Error, FormatOptions, Number, Object, Result, Value};
use serde::{ser, Serialize};

/// Writes [`Value`] trees as tag-delimited text.
///
/// Created via [`Formatter::new`]; the whole tree is rendered into memory
/// before anything is handed to a writer.
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Formatter { options }
    }

    /// Renders `value` into a new string.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        let mut output = String::with_capacity(256);
        self.write_value(&mut output, value);
        output
    }

    /// Appends the rendering of `value` to `output`.
    ///
    /// A root array or object contributes only its children. A root scalar is
    /// written as a positional line; a root `Null` writes nothing.
    pub fn write_value(&self, output: &mut String, value: &Value) {
        match value {
            Value::Null => {}
            Value::Array(array) => self.write_array(output, array, 0),
            Value::Object(object) => self.write_object(output, object, 0),
            scalar => self.write_scalar(output, 0, None, scalar),
        }
    }

    fn write_indent(&self, output: &mut String, depth: usize) {
        for _ in 0..depth * self.options.indent {
            output.push(' ');
        }
    }

    fn write_tag(&self, output: &mut String, depth: usize, tag: &str) {
        self.write_indent(output, depth);
        output.push('<');
        output.push_str(tag);
        output.push_str(">\n");
    }

    fn write_array(&self, output: &mut String, array: &Array, depth: usize) {
        for element in array {
            match element {
                Value::Null => continue,
                Value::Array(inner) => {
                    self.write_tag(output, depth, "#Array");
                    self.write_array(output, inner, depth + 1);
                    self.write_tag(output, depth, "Array#");
                }
                Value::Object(inner) => {
                    self.write_tag(output, depth, "#Object");
                    self.write_object(output, inner, depth + 1);
                    self.write_tag(output, depth, "Object#");
                }
                scalar => self.write_scalar(output, depth, None, scalar),
            }
        }
    }

    fn write_object(&self, output: &mut String, object: &Object, depth: usize) {
        for (key, value) in object.iter() {
            match value {
                Value::Null => continue,
                Value::Array(inner) => {
                    self.write_tag(output, depth, key);
                    self.write_array(output, inner, depth + 1);
                    self.write_tag(output, depth, &format!("/{}", key));
                }
                Value::Object(inner) => {
                    self.write_tag(output, depth, key);
                    self.write_object(output, inner, depth + 1);
                    self.write_tag(output, depth, &format!("/{}", key));
                }
                scalar => self.write_scalar(output, depth, Some(key), scalar),
            }
        }
    }

    fn write_scalar(&self, output: &mut String, depth: usize, key: Option<&str>, value: &Value) {
        let (type_tag, text) = match value {
            Value::String(s) => ("String", s.clone()),
            Value::Number(n) => ("Number", n.to_string()),
            Value::Boolean(b) => ("Boolean", b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => return,
        };

        self.write_indent(output, depth);
        output.push('<');
        if let Some(key) = key {
            output.push_str("key=\"");
            output.push_str(key);
            output.push_str("\" ");
        }
        output.push_str("type=\"");
        output.push_str(type_tag);
        output.push_str("\" value=\"");
        output.push_str(&text);
        output.push_str("\">\n");
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::new(FormatOptions::default())
    }
}

/// Serializes Rust values into a [`Value`] tree.
///
/// Integer widths keep their signedness (`u32` becomes `Number::Unsigned`),
/// `None` and unit become `Null`, unit variants become strings, and data-carrying
/// enum variants become a single-key object named after the variant.
pub struct ValueSerializer;

pub struct SerializeVec {
    array: Array,
}

pub struct SerializeTupleVariant {
    name: String,
    array: Array,
}

pub struct SerializeMap {
    object: Object,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: String,
    object: Object,
}

fn tag_variant(variant: &str, value: Value) -> Value {
    let mut object = Object::new();
    object.insert(variant.to_string(), value);
    Value::Object(object)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Signed(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(Number::Unsigned(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Double(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(v.iter().map(|&b| Value::from(b)).collect::<Array>().into())
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tag_variant(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant.to_string(),
            array: Array::new(),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant.to_string(),
            object: Object::new(),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            array: Array::from(Vec::<Value>::with_capacity(capacity)),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            object: Object::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tag_variant(&self.name, Value::Array(self.array)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Value::Number(n) => {
                self.current_key = Some(n.to_string());
                Ok(())
            }
            other => Err(Error::custom(format!(
                "map keys must be strings or numbers, found {}",
                other.type_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.object.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.object.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.object.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tag_variant(&self.name, Value::Object(self.object)))
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::{to_value, Number, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: u32 }
///
/// let value = to_value(&Point { x: -1, y: 2 }).unwrap();
/// assert_eq!(value["x"], Value::Number(Number::Signed(-1)));
/// assert_eq!(value["y"], Value::Number(Number::Unsigned(2)));
/// ```
///
/// # Errors
///
/// Returns an error if a map key is not a string or number, or if the
/// `Serialize` implementation itself fails.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut value = Value::Null;
        value["title"] = Value::from("demo");
        value["matrix"][0][0] = Value::from(1);
        value["matrix"][0][1] = Value::from(2.5);
        value["matrix"][1]["flag"] = Value::from(true);
        value
    }

    #[test]
    fn test_nested_layout() {
        let text = Formatter::default().format(&sample());
        let expected = concat!(
            "<key=\"title\" type=\"String\" value=\"demo\">\n",
            "<matrix>\n",
            "  <#Array>\n",
            "    <type=\"Number\" value=\"1\">\n",
            "    <type=\"Number\" value=\"2.5\">\n",
            "  <Array#>\n",
            "  <#Object>\n",
            "    <key=\"flag\" type=\"Boolean\" value=\"true\">\n",
            "  <Object#>\n",
            "</matrix>\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_null_children_skipped() {
        let mut value = Value::Null;
        value["gone"] = Value::Null;
        value["list"][2] = Value::from("last");
        let text = Formatter::default().format(&value);
        assert_eq!(
            text,
            "<list>\n  <type=\"String\" value=\"last\">\n</list>\n"
        );
    }

    #[test]
    fn test_root_variants() {
        let formatter = Formatter::new(FormatOptions::new().with_indent(0));
        assert_eq!(formatter.format(&Value::Null), "");
        assert_eq!(
            formatter.format(&Value::from(3u8)),
            "<type=\"Number\" value=\"3\">\n"
        );
        assert_eq!(
            formatter.format(&Value::from(vec![Value::from(vec![Value::from(false)])])),
            "<#Array>\n<type=\"Boolean\" value=\"false\">\n<Array#>\n"
        );
    }

    #[test]
    fn test_to_value_enums() {
        #[derive(Serialize)]
        enum Mode {
            Off,
            Level(u8),
            Pair(i32, i32),
            Span { from: i32 },
        }

        assert_eq!(to_value(&Mode::Off).unwrap(), Value::from("Off"));
        assert_eq!(to_value(&Mode::Level(3)).unwrap()["Level"], Value::from(3u8));
        assert_eq!(
            to_value(&Mode::Pair(1, 2)).unwrap()["Pair"],
            Value::from(vec![Value::from(1), Value::from(2)])
        );
        assert_eq!(to_value(&Mode::Span { from: 4 }).unwrap()["Span"]["from"], Value::from(4));
    }

    #[test]
    fn test_to_value_options_and_maps() {
        use std::collections::BTreeMap;

        let mut map = BTreeMap::new();
        map.insert(2u32, Some("two"));
        map.insert(1u32, None);
        let value = to_value(&map).unwrap();
        assert!(value["1"].is_null());
        assert_eq!(value["2"], Value::from("two"));
        let keys: Vec<_> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["1", "2"]);
    }
}
