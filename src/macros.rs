/// Builds a [`Value`](crate::Value) tree from a JSON-like literal.
///
/// Object keys must be string literals and keep their written order. Any
/// other expression goes through `Value::from`.
///
/// ```rust
/// use serde_tagconf::{tagconf, Value};
///
/// let port = 8080;
/// let config = tagconf!({
///     "host": "localhost",
///     "port": port,
///     "tls": false,
///     "upstreams": [{ "name": "a" }, { "name": "b" }]
/// });
/// assert_eq!(config["port"].as_integer(), Ok(8080));
/// assert_eq!(config["upstreams"][1]["name"], Value::from("b"));
/// ```
#[macro_export]
macro_rules! tagconf {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array($crate::Array::from(vec![$($crate::tagconf!($elem)),*]))
    };

    ({}) => {
        $crate::Value::Object($crate::Object::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Object::new();
        $(
            object.insert($key.to_string(), $crate::tagconf!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($e:expr) => {
        $crate::Value::from($e)
    };
}
