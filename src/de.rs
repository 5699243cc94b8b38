//! Deserialization from the tag-delimited text format.
//!
//! This module provides the [`Parser`], a single-pass state machine that
//! replays a flat stream of tag lines into a [`Value`] tree, and a
//! `Deserializer` over [`Value`] used by [`from_value`].
//!
//! ## Line classification
//!
//! Each line contributes at most one tag: the span from its first `<` to its
//! last `>`. The span is matched against these forms, first match wins:
//!
//! 1. `<name>` opens a named scope
//! 2. `</name>` closes the innermost scope
//! 3. `<#Array>` / 4. `<Array#>`
//! 5. `<#Object>` / 6. `<Object#>`
//! 7. `<key="K" type="T" value="V">` sets a keyed scalar
//! 8. `<type="T" value="V">` appends a positional scalar
//!
//! Anything else, blank lines included, is ignored.
//!
//! ## Frames
//!
//! Open scopes are kept on a stack of frames. A frame stores the step (key or
//! index) from its parent rather than a reference into the tree, and the
//! current target is re-resolved from the root on every tag, so growing a
//! container never invalidates an open scope.
//!
//! ```rust
//! use serde_tagconf::{parse, Value};
//!
//! let text = "<server>\n  <key=\"port\" type=\"Number\" value=\"8080\">\n</server>\n";
//! let value = parse(text).unwrap();
//! assert_eq!(value["server"]["port"].as_integer(), Ok(8080));
//! ```

use crate::{Array, Error, Number, Object, ParseOptions, Result, Value};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::io::BufRead;

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    ScopeOpen(&'a str),
    ScopeClose(&'a str),
    ArrayOpen,
    ArrayClose,
    ObjectOpen,
    ObjectClose,
    KeyedData {
        key: &'a str,
        kind: &'a str,
        text: &'a str,
    },
    PositionalData {
        kind: &'a str,
        text: &'a str,
    },
    Ignored,
}

const ARRAY_LABEL: &str = "#Array";
const OBJECT_LABEL: &str = "#Object";

/// Span from the first `<` to the last `>`, with at least one character between.
fn tag_span(line: &str) -> Option<&str> {
    let start = line.find('<')?;
    let end = line.rfind('>')?;
    if end < start + 2 {
        return None;
    }
    Some(&line[start + 1..end])
}

fn is_scope_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '/' || c == '#' || c.is_whitespace())
}

/// Matches `name1="v1" name2="v2" ...` exactly, with whitespace between
/// attributes and non-empty, quote-free values.
fn attributes<'a, const N: usize>(inner: &'a str, names: [&str; N]) -> Option<[&'a str; N]> {
    let mut values = [""; N];
    let mut rest = inner;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            let trimmed = rest.trim_start();
            if trimmed.len() == rest.len() {
                return None;
            }
            rest = trimmed;
        }
        rest = rest.strip_prefix(name)?.strip_prefix("=\"")?;
        let close = rest.find('"')?;
        if close == 0 {
            return None;
        }
        values[i] = &rest[..close];
        rest = &rest[close + 1..];
    }
    if rest.is_empty() {
        Some(values)
    } else {
        None
    }
}

pub(crate) fn classify(line: &str) -> LineKind<'_> {
    let inner = match tag_span(line) {
        Some(inner) => inner,
        None => return LineKind::Ignored,
    };

    if is_scope_name(inner) {
        return LineKind::ScopeOpen(inner);
    }
    if let Some(name) = inner.strip_prefix('/') {
        if !name.is_empty() && !name.chars().any(|c| c == '#' || c.is_whitespace()) {
            return LineKind::ScopeClose(name);
        }
    }
    match inner {
        "#Array" => return LineKind::ArrayOpen,
        "Array#" => return LineKind::ArrayClose,
        "#Object" => return LineKind::ObjectOpen,
        "Object#" => return LineKind::ObjectClose,
        _ => {}
    }
    if let Some([key, kind, text]) = attributes(inner, ["key", "type", "value"]) {
        return LineKind::KeyedData { key, kind, text };
    }
    if let Some([kind, text]) = attributes(inner, ["type", "value"]) {
        return LineKind::PositionalData { kind, text };
    }
    LineKind::Ignored
}

/// Decodes the textual number encoding.
///
/// A `.` selects the floating-point parse; otherwise the text is read as a
/// signed integer, then as an unsigned one, then as a double.
pub(crate) fn parse_number(text: &str) -> Option<Number> {
    if text.contains('.') {
        return text.parse::<f64>().ok().map(Number::Double);
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::Signed(i));
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(Number::Unsigned(u));
    }
    text.parse::<f64>().ok().map(Number::Double)
}

fn decode_scalar(kind: &str, text: &str, line: usize) -> Result<Value> {
    match kind {
        "String" => Ok(Value::String(text.to_string())),
        "Number" => parse_number(text)
            .map(Value::Number)
            .ok_or_else(|| Error::malformed(line, &format!("invalid number {:?}", text))),
        "Boolean" => Ok(Value::Boolean(text != "false")),
        other => Err(Error::malformed(
            line,
            &format!("unknown value type {:?}", other),
        )),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Key(String),
    Index(usize),
}

/// One open scope: the label it was opened with and the step from its parent.
#[derive(Debug, Clone)]
struct Frame {
    label: String,
    step: Step,
}

fn resolve<'v>(root: &'v mut Value, frames: &[Frame]) -> Result<&'v mut Value> {
    let mut target = root;
    for frame in frames {
        target = match &frame.step {
            Step::Key(key) => target.field(key)?,
            Step::Index(index) => target.element(*index)?,
        };
    }
    Ok(target)
}

/// Streaming line parser.
///
/// Feed lines one at a time with [`Parser::feed_line`], then call
/// [`Parser::finish`] to take the built tree.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::{ParseOptions, Parser};
///
/// let mut parser = Parser::new(ParseOptions::new().with_scalar_scopes(true));
/// parser.feed_line("<hosts>").unwrap();
/// parser.feed_line("  <type=\"String\" value=\"a\">").unwrap();
/// assert_eq!(parser.depth(), 1);
///
/// let value = parser.finish().unwrap();
/// assert_eq!(value["hosts"][0].as_string(), Ok("a"));
/// ```
pub struct Parser {
    root: Value,
    frames: Vec<Frame>,
    line: usize,
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser {
            root: Value::Null,
            frames: Vec::new(),
            line: 0,
            options,
        }
    }

    /// Number of scopes currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Consumes one line of input.
    ///
    /// # Errors
    ///
    /// Fails with `MalformedInput` on a close tag without an open scope, on a
    /// positional scalar outside an array, on an element scope at the top of
    /// a root that already holds keys, on an unknown value type or an
    /// unparsable number. Keyed or indexed writes into a container of the other
    /// kind fail with `NotKeyable` / `NotIndexable`.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        match classify(line) {
            LineKind::ScopeOpen(name) => {
                resolve(&mut self.root, &self.frames)?.field(name)?;
                self.push(name, Step::Key(name.to_string()));
                Ok(())
            }
            LineKind::ScopeClose(name) => self.pop(name),
            LineKind::ArrayOpen => self.open_element(ARRAY_LABEL, Value::array()),
            LineKind::ArrayClose => self.pop(ARRAY_LABEL),
            LineKind::ObjectOpen => self.open_element(OBJECT_LABEL, Value::object()),
            LineKind::ObjectClose => self.pop(OBJECT_LABEL),
            LineKind::KeyedData { key, kind, text } => {
                let scalar = decode_scalar(kind, text, self.line)?;
                *resolve(&mut self.root, &self.frames)?.field(key)? = scalar;
                Ok(())
            }
            LineKind::PositionalData { kind, text } => self.append_scalar(kind, text),
            LineKind::Ignored => Ok(()),
        }
    }

    /// Ends the input and returns the built tree.
    ///
    /// Scopes still open are accepted unless the parser is strict.
    pub fn finish(self) -> Result<Value> {
        tracing::debug!(
            lines = self.line,
            open_scopes = self.frames.len(),
            "tag stream parsed"
        );
        if self.options.strict {
            if let Some(frame) = self.frames.last() {
                return Err(Error::malformed(
                    self.line,
                    &format!("scope <{}> is never closed", frame.label),
                ));
            }
        }
        Ok(self.root)
    }

    fn push(&mut self, label: &str, step: Step) {
        tracing::trace!(line = self.line, label, depth = self.frames.len() + 1, "open scope");
        self.frames.push(Frame {
            label: label.to_string(),
            step,
        });
    }

    fn pop(&mut self, label: &str) -> Result<()> {
        let frame = self.frames.pop().ok_or_else(|| {
            Error::malformed(self.line, &format!("close tag for {} without an open scope", label))
        })?;
        if self.options.strict && frame.label != label {
            return Err(Error::malformed(
                self.line,
                &format!("scope <{}> closed by {}", frame.label, label),
            ));
        }
        tracing::trace!(line = self.line, label, depth = self.frames.len(), "close scope");
        Ok(())
    }

    /// Turns the current target into an array if needed, appends `slot` and
    /// opens it as a new scope. The slot is typed before it is entered.
    ///
    /// At the top level only an unset or array root may take elements.
    fn open_element(&mut self, label: &str, slot: Value) -> Result<()> {
        let line = self.line;
        let top_level = self.frames.is_empty();
        let target = resolve(&mut self.root, &self.frames)?;
        if top_level && !(target.is_null() || target.is_array()) {
            return Err(Error::malformed(
                line,
                &format!("{} at the top level of {}", label, target.type_name()),
            ));
        }
        if !target.is_array() {
            *target = Value::array();
        }
        let array = target.as_array_mut()?;
        let index = array.len();
        array.push(slot);
        self.push(label, Step::Index(index));
        Ok(())
    }

    fn append_scalar(&mut self, kind: &str, text: &str) -> Result<()> {
        let line = self.line;
        if self.frames.is_empty() {
            return Err(Error::malformed(line, "positional data outside of any scope"));
        }
        let target = resolve(&mut self.root, &self.frames)?;
        if target.is_null() && self.options.scalar_scopes {
            *target = Value::array();
        }
        match target {
            Value::Array(array) => {
                array.push(decode_scalar(kind, text, line)?);
                Ok(())
            }
            other => Err(Error::malformed(
                line,
                &format!("positional data inside {}", other.type_name()),
            )),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParseOptions::default())
    }
}

/// Parses text held in memory.
pub(crate) fn parse_str(input: &str, options: ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(options);
    for line in input.lines() {
        parser.feed_line(line)?;
    }
    parser.finish()
}

/// Parses a buffered stream line by line.
pub(crate) fn parse_reader<R: BufRead>(reader: R, options: ParseOptions) -> Result<Value> {
    let mut parser = Parser::new(options);
    for line in reader.lines() {
        let line = line.map_err(|e| Error::io(&e.to_string()))?;
        parser.feed_line(&line)?;
    }
    parser.finish()
}

/// Deserializes a `T` out of a [`Value`] tree.
///
/// `Null` is accepted wherever a sequence, map or struct is expected and
/// reads as an empty one, since the text format cannot tell an empty container
/// from an unset one.
///
/// # Examples
///
/// ```rust
/// use serde_tagconf::{from_value, Value};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let mut value = Value::Null;
/// value["x"] = Value::from(1);
/// value["y"] = Value::from(2u8);
/// assert_eq!(from_value::<Point>(value).unwrap(), Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not have the shape `T` expects.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(array: Array) -> Self {
        SeqDeserializer {
            iter: array.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(String, Value)>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(object: Object) -> Self {
        MapDeserializer {
            iter: object.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(self.variant.into_deserializer())?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value.unwrap_or_default()))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(array)) => visitor.visit_seq(SeqDeserializer::new(array)),
            Some(Value::Null) | None => visitor.visit_seq(SeqDeserializer::new(Array::new())),
            Some(other) => Err(Error::type_mismatch("array", other.type_name())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(object)) => visitor.visit_map(MapDeserializer::new(object)),
            Some(Value::Null) | None => visitor.visit_map(MapDeserializer::new(Object::new())),
            Some(other) => Err(Error::type_mismatch("object", other.type_name())),
        }
    }
}

/// A `Deserializer` that consumes an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::String(s) => visitor.visit_string(s),
            Value::Number(Number::Signed(i)) => visitor.visit_i64(i),
            Value::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            Value::Number(Number::Double(f)) => visitor.visit_f64(f),
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Array(array) => visitor.visit_seq(SeqDeserializer::new(array)),
            Value::Object(object) => visitor.visit_map(MapDeserializer::new(object)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_seq(SeqDeserializer::new(Array::new())),
            Value::Array(array) => visitor.visit_seq(SeqDeserializer::new(array)),
            other => Err(Error::type_mismatch("array", other.type_name())),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_map(MapDeserializer::new(Object::new())),
            Value::Object(object) => visitor.visit_map(MapDeserializer::new(object)),
            other => Err(Error::type_mismatch("object", other.type_name())),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            Value::Object(object) if object.len() == 1 => {
                let mut entries = object.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("enum object without a variant key")),
                }
            }
            other => Err(Error::type_mismatch(
                "string or single-key object",
                other.type_name(),
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn parse(input: &str) -> Result<Value> {
        parse_str(input, ParseOptions::default())
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("  <server>  "), LineKind::ScopeOpen("server"));
        assert_eq!(classify("</server>"), LineKind::ScopeClose("server"));
        assert_eq!(classify("<#Array>"), LineKind::ArrayOpen);
        assert_eq!(classify("<Array#>"), LineKind::ArrayClose);
        assert_eq!(classify("<#Object>"), LineKind::ObjectOpen);
        assert_eq!(classify("<Object#>"), LineKind::ObjectClose);
        assert_eq!(
            classify("<key=\"a\" type=\"Number\" value=\"1\">"),
            LineKind::KeyedData {
                key: "a",
                kind: "Number",
                text: "1"
            }
        );
        assert_eq!(
            classify("<type=\"String\"   value=\"x y\">"),
            LineKind::PositionalData {
                kind: "String",
                text: "x y"
            }
        );
        // no whitespace inside, so it is a scope name
        assert_eq!(classify("<key=\"a\">"), LineKind::ScopeOpen("key=\"a\""));
    }

    #[test]
    fn test_classify_ignored() {
        assert_eq!(classify(""), LineKind::Ignored);
        assert_eq!(classify("plain text"), LineKind::Ignored);
        assert_eq!(classify("<>"), LineKind::Ignored);
        assert_eq!(classify("<a b>"), LineKind::Ignored);
        assert_eq!(classify("<type=\"String\" value=\"\">"), LineKind::Ignored);
        assert_eq!(
            classify("<type=\"String\"value=\"x\">"),
            LineKind::Ignored
        );
        assert_eq!(classify("</#x>"), LineKind::Ignored);
    }

    #[test]
    fn test_tag_span_uses_outermost_brackets() {
        assert_eq!(
            classify("junk <key=\"k\" type=\"String\" value=\"a>b\"> trailing"),
            LineKind::KeyedData {
                key: "k",
                kind: "String",
                text: "a>b"
            }
        );
    }

    #[test]
    fn test_number_routing() {
        assert_eq!(parse_number("-5"), Some(Number::Signed(-5)));
        assert_eq!(parse_number("2.5"), Some(Number::Double(2.5)));
        assert_eq!(parse_number("3.0"), Some(Number::Double(3.0)));
        assert_eq!(
            parse_number("18446744073709551615"),
            Some(Number::Unsigned(u64::MAX))
        );
        assert_eq!(parse_number("1e3"), Some(Number::Double(1000.0)));
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_boolean_encoding() {
        let value = parse(concat!(
            "<key=\"a\" type=\"Boolean\" value=\"false\">\n",
            "<key=\"b\" type=\"Boolean\" value=\"FALSE\">\n",
            "<key=\"c\" type=\"Boolean\" value=\"nonsense\">\n",
        ))
        .unwrap();
        assert_eq!(value["a"], Value::Boolean(false));
        assert_eq!(value["b"], Value::Boolean(true));
        assert_eq!(value["c"], Value::Boolean(true));
    }

    #[test]
    fn test_unbalanced_close_fails() {
        assert_eq!(
            parse("\n</x>"),
            Err(Error::malformed(
                2,
                "close tag for x without an open scope"
            ))
        );
        assert!(matches!(
            parse("<Array#>"),
            Err(Error::MalformedInput { line: 1, .. })
        ));
        assert!(matches!(
            parse("<Object#>"),
            Err(Error::MalformedInput { line: 1, .. })
        ));
    }

    #[test]
    fn test_positional_requires_scope() {
        assert!(matches!(
            parse("<type=\"Number\" value=\"3\">"),
            Err(Error::MalformedInput { line: 1, .. })
        ));

        let inside_object = "<#Object>\n<type=\"Number\" value=\"3\">\n";
        assert!(matches!(
            parse(inside_object),
            Err(Error::MalformedInput { line: 2, .. })
        ));
    }

    #[test]
    fn test_positional_under_unset_scope_fails_by_default() {
        assert_eq!(
            parse("<k>\n<type=\"Number\" value=\"3\">\n</k>"),
            Err(Error::malformed(2, "positional data inside null"))
        );
    }

    #[test]
    fn test_scalar_scopes_build_array() {
        let options = ParseOptions::new().with_scalar_scopes(true);
        let input = "<ids>\n<type=\"Number\" value=\"1\">\n<type=\"Number\" value=\"2\">\n</ids>";
        let value = parse_str(input, options.clone()).unwrap();
        assert_eq!(
            value["ids"],
            Value::from(vec![Value::from(1i64), Value::from(2i64)])
        );

        // a scope that already holds keys is not an array
        let keyed = "<ids>\n<key=\"a\" type=\"Number\" value=\"1\">\n<type=\"Number\" value=\"2\">\n</ids>";
        assert_eq!(
            parse_str(keyed, options),
            Err(Error::malformed(3, "positional data inside object"))
        );
    }

    #[test]
    fn test_element_open_pretypes_slot() {
        let value = parse("<list>\n<#Array>\n<Array#>\n<#Object>\n<Object#>\n</list>").unwrap();
        assert_eq!(
            value["list"],
            Value::from(vec![Value::array(), Value::object()])
        );
    }

    #[test]
    fn test_element_open_at_root() {
        let value = parse("<#Object>\n<key=\"a\" type=\"String\" value=\"x\">\n<Object#>").unwrap();
        assert_eq!(value[0]["a"], Value::from("x"));
    }

    #[test]
    fn test_element_open_at_keyed_root_fails() {
        let input = "<key=\"a\" type=\"String\" value=\"x\">\n<#Object>\n<Object#>";
        assert_eq!(
            parse(input),
            Err(Error::malformed(2, "#Object at the top level of object"))
        );

        // an array root keeps taking elements
        let value = parse("<#Array>\n<Array#>\n<#Object>\n<Object#>").unwrap();
        assert_eq!(value, Value::from(vec![Value::array(), Value::object()]));
    }

    #[test]
    fn test_empty_scope_leaves_null_entry() {
        let value = parse("<empty>\n</empty>").unwrap();
        assert!(value.has_field("empty"));
        assert!(value["empty"].is_null());
    }

    #[test]
    fn test_unclosed_scopes_accepted_by_default() {
        let value = parse("<a>\n<key=\"b\" type=\"Number\" value=\"1\">").unwrap();
        assert_eq!(value["a"]["b"].as_integer(), Ok(1));

        let strict = parse_str("<a>\n", ParseOptions::strict());
        assert_eq!(
            strict,
            Err(Error::malformed(1, "scope <a> is never closed"))
        );
    }

    #[test]
    fn test_strict_close_label_check() {
        assert!(parse("<a>\n</b>").is_ok());
        assert_eq!(
            parse_str("<a>\n</b>", ParseOptions::strict()),
            Err(Error::malformed(2, "scope <a> closed by b"))
        );
        assert!(parse_str("<a>\n<#Array>\n<Object#>\n</a>", ParseOptions::strict()).is_err());
    }

    #[test]
    fn test_keyed_data_into_array_fails() {
        assert_eq!(
            parse("<#Array>\n<key=\"k\" type=\"String\" value=\"v\">"),
            Err(Error::NotKeyable { found: "array" })
        );
    }

    #[test]
    fn test_unknown_type_and_bad_number() {
        assert_eq!(
            parse("<key=\"k\" type=\"Date\" value=\"today\">"),
            Err(Error::malformed(1, "unknown value type \"Date\""))
        );
        assert_eq!(
            parse("<key=\"k\" type=\"Number\" value=\"1.2.3\">"),
            Err(Error::malformed(1, "invalid number \"1.2.3\""))
        );
    }

    #[test]
    fn test_frames_survive_container_growth() {
        let mut input = String::from("<items>\n");
        for i in 0..64 {
            input.push_str("<#Object>\n");
            input.push_str(&format!("<key=\"id\" type=\"Number\" value=\"{}\">\n", i));
            input.push_str("<#Array>\n<Array#>\n");
            input.push_str("<Object#>\n");
        }
        input.push_str("</items>\n");

        let value = parse(&input).unwrap();
        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 64);
        assert_eq!(items[63]["id"].as_integer(), Ok(63));
    }

    #[test]
    fn test_from_value_lenient_null_containers() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Settings {
            tags: Vec<String>,
            nickname: Option<String>,
        }

        let mut value = Value::Null;
        value["tags"] = Value::Null;
        assert_eq!(
            from_value::<Settings>(value).unwrap(),
            Settings {
                tags: vec![],
                nickname: None
            }
        );
    }

    #[test]
    fn test_from_value_enums() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Mode {
            Off,
            Level(u8),
            Span { from: i32 },
        }

        assert_eq!(from_value::<Mode>(Value::from("Off")).unwrap(), Mode::Off);

        let mut level = Value::Null;
        level["Level"] = Value::from(3i64);
        assert_eq!(from_value::<Mode>(level).unwrap(), Mode::Level(3));

        let mut span = Value::Null;
        span["Span"]["from"] = Value::from(-1);
        assert_eq!(from_value::<Mode>(span).unwrap(), Mode::Span { from: -1 });

        assert!(from_value::<Mode>(Value::from(1)).is_err());
    }
}
