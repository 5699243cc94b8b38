use serde::{Deserialize, Serialize};
use serde_tagconf::{
    from_str, to_string, to_string_with_options, to_value, Error, FormatOptions, Number,
    ParseOptions, Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Wrapper<T> {
    value: T,
}

fn alice(tags: &[&str]) -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn test_simple_struct() {
    let user = alice(&["admin", "developer"]);

    let text = to_string(&user).unwrap();
    println!("User:\n{}", text);

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: alice(&["vip"]),
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    };

    let text = to_string(&order).unwrap();
    println!("Order:\n{}", text);

    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_array_of_objects() {
    let products = vec![
        Product {
            sku: "A001".to_string(),
            price: 10.99,
            quantity: 5,
        },
        Product {
            sku: "B002".to_string(),
            price: 15.0,
            quantity: 3,
        },
    ];

    let text = to_string(&products).unwrap();
    let products_back: Vec<Product> = from_str(&text).unwrap();
    assert_eq!(products, products_back);
}

#[test]
fn test_primitives() {
    assert_roundtrip(&42i32);
    assert_roundtrip(&3.5f64);
    assert_roundtrip(&true);
    assert_roundtrip(&false);
    assert_roundtrip(&"hello world".to_string());
    assert_roundtrip(&vec![1, 2, 3, 4, 5]);
    assert_roundtrip(&Some(7i64));
    assert_roundtrip(&None::<i64>);
}

#[test]
fn test_options() {
    let user = alice(&["admin", "developer"]);

    let text = to_string_with_options(&user, FormatOptions::new().with_indent(8)).unwrap();
    assert!(text.contains("\n        <type=\"String\" value=\"admin\">\n"));

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);

    let strict = ParseOptions::strict().with_scalar_scopes(true);
    let strict_back: User = serde_tagconf::from_str_with_options(&text, strict).unwrap();
    assert_eq!(user, strict_back);
}

#[test]
fn test_to_value() {
    let value = to_value(&alice(&["admin"])).unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(object.get("id"), Some(&Value::Number(Number::Unsigned(123))));
    assert_eq!(object.get("name"), Some(&Value::String("Alice".to_string())));
    assert_eq!(object.get("active"), Some(&Value::Boolean(true)));

    let tags = object.get("tags").unwrap().as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0], Value::String("admin".to_string()));
}

#[test]
fn test_empty_collections() {
    let empty_vec: Vec<i32> = vec![];
    assert_roundtrip(&empty_vec);

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Empty {}

    assert_roundtrip(&Empty {});

    let empty_map: BTreeMap<String, i32> = BTreeMap::new();
    assert_roundtrip(&empty_map);
}

#[test]
fn test_empty_collections_reload_as_null() {
    let text = to_string(&Wrapper { value: Vec::<i32>::new() }).unwrap();
    assert_eq!(text, "<value>\n</value>\n");
    let tree = serde_tagconf::parse(&text).unwrap();
    assert!(tree["value"].is_null());
}

#[test]
fn test_special_strings() {
    let special_strings = [
        "hello, world",
        "tab\there",
        "pipe|here",
        " leading space",
        "trailing space ",
        "   ",
        "true",
        "false",
        "null",
        "123",
        "3.5",
        "<looks like a tag>",
        "#Array",
        "</close>",
        "a > b",
        "ünïcödé ✓",
    ];

    for s in special_strings {
        println!("Testing string: {:?}", s);
        assert_roundtrip(&s.to_string());
    }
}

#[test]
fn test_unrepresentable_strings() {
    // an empty value is written but the reader ignores the line
    let text = to_string(&Wrapper { value: String::new() }).unwrap();
    assert_eq!(text, "<key=\"value\" type=\"String\" value=\"\">\n");
    assert!(from_str::<Wrapper<String>>(&text).is_err());

    let text = to_string(&Wrapper {
        value: "say \"hi\"".to_string(),
    })
    .unwrap();
    assert!(from_str::<Wrapper<String>>(&text).is_err());
}

#[test]
fn test_numbers() {
    assert_roundtrip(&0i8);
    assert_roundtrip(&127i8);
    assert_roundtrip(&-128i8);
    assert_roundtrip(&32767i16);
    assert_roundtrip(&-32768i16);
    assert_roundtrip(&2147483647i32);
    assert_roundtrip(&-2147483648i32);
    assert_roundtrip(&9223372036854775807i64);
    assert_roundtrip(&-9223372036854775808i64);

    assert_roundtrip(&255u8);
    assert_roundtrip(&65535u16);
    assert_roundtrip(&4294967295u32);
    assert_roundtrip(&u64::MAX);

    assert_roundtrip(&0.0f32);
    assert_roundtrip(&3.5f32);
    assert_roundtrip(&-2.5f32);
    assert_roundtrip(&0.0f64);
    assert_roundtrip(&4.25f64);
    assert_roundtrip(&-5.75f64);
    assert_roundtrip(&1e300f64);
    assert_roundtrip(&f64::MIN_POSITIVE);
}

#[test]
fn test_whole_doubles_stay_doubles() {
    let tree = serde_tagconf::parse(&to_string(&Wrapper { value: 3.0f64 }).unwrap()).unwrap();
    assert_eq!(tree["value"], Value::Number(Number::Double(3.0)));
}

#[test]
fn test_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Backend {
        Memory,
        Disk { path: String, sync: bool },
        Remote(String),
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Store {
        primary: Backend,
        replicas: Vec<Backend>,
    }

    let store = Store {
        primary: Backend::Disk {
            path: "/var/lib/store".to_string(),
            sync: true,
        },
        replicas: vec![Backend::Memory, Backend::Remote("10.0.0.2".to_string())],
    };
    assert_roundtrip(&store);
}

#[test]
fn test_maps_keep_key_order() {
    let mut limits = BTreeMap::new();
    limits.insert("cpu".to_string(), 2);
    limits.insert("memory".to_string(), 512);
    assert_roundtrip(&limits);

    let tree = serde_tagconf::parse(&to_string(&limits).unwrap()).unwrap();
    let keys: Vec<_> = tree.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["cpu", "memory"]);
}

#[test]
fn test_shape_mismatch_is_reported() {
    let text = "<key=\"id\" type=\"String\" value=\"abc\">\n";
    let result = from_str::<Wrapper<u32>>(text);
    assert!(result.is_err());

    let err = from_str::<User>("<key=\"id\" type=\"Number\" value=\"-1\">").unwrap_err();
    assert!(matches!(err, Error::Custom(_)));
}

fn assert_roundtrip<T>(original: &T)
where
    T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug,
{
    let wrapped = Wrapper { value: original };
    let text = to_string(&wrapped).unwrap();
    let deserialized: Wrapper<T> = from_str(&text).unwrap();
    assert_eq!(*original, deserialized.value);
}

fn lists() -> ParseOptions {
    ParseOptions::new().with_scalar_scopes(true)
}

fn sample_config() -> Value {
    let mut config = Value::Null;
    config["name"] = Value::from("edge");
    config["listen"]["port"] = Value::from(8443);
    config["listen"]["tls"] = Value::from(true);
    config["upstreams"][0]["host"] = Value::from("10.0.0.1");
    config["upstreams"][0]["weight"] = Value::from(0.75);
    config["upstreams"][1]["host"] = Value::from("10.0.0.2");
    config["upstreams"][1]["weight"] = Value::from(0.25);
    config["zones"][0] = Value::from("eu-west");
    config["zones"][1] = Value::from("eu-north");
    config
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edge.conf");

    let config = sample_config();
    config.save(&path);

    let loaded = Value::load_with_options(&path, lists()).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded["upstreams"][1]["weight"].as_double(), Ok(0.25));
    assert_eq!(loaded["zones"][1].as_string(), Ok("eu-north"));

    // the zones scope holds bare scalars, which the default parser rejects
    assert!(matches!(
        Value::load(&path),
        Err(Error::MalformedInput { .. })
    ));
}

#[test]
fn test_save_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edge.conf");

    sample_config().save(&path);
    let mut small = Value::Null;
    small["only"] = Value::from(1);
    small.save(&path);

    assert_eq!(Value::load(&path).unwrap(), small);
}

#[test]
fn test_load_missing_file_is_null() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Value::load(dir.path().join("absent.conf")).unwrap();
    assert!(loaded.is_null());
}

#[test]
fn test_save_to_unwritable_path_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("edge.conf");

    sample_config().save(&path);
    assert!(!path.exists());
}

#[test]
fn test_load_reports_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.conf");
    std::fs::write(&path, "<a>\n</a>\n</a>\n").unwrap();

    assert_eq!(
        Value::load(&path),
        Err(Error::MalformedInput {
            line: 3,
            msg: "close tag for a without an open scope".to_string(),
        })
    );
}

#[test]
fn test_load_with_strict_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("open.conf");
    std::fs::write(&path, "<a>\n  <key=\"b\" type=\"Number\" value=\"1\">\n").unwrap();

    let lenient = Value::load(&path).unwrap();
    assert_eq!(lenient["a"]["b"].as_integer(), Ok(1));
    assert!(Value::load_with_options(&path, ParseOptions::strict()).is_err());
}

#[test]
fn test_load_rejects_invalid_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.conf");
    std::fs::write(&path, [0x3c, 0xff, 0x3e, 0x0a]).unwrap();

    assert!(matches!(Value::load(&path), Err(Error::Io(_))));
}

#[test]
fn test_typed_config_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.conf");

    let user = alice(&["ops"]);
    to_value(&user).unwrap().save(&path);

    let tree = Value::load_with_options(&path, lists()).unwrap();
    let loaded: User = serde_tagconf::from_value(tree).unwrap();
    assert_eq!(loaded, user);
}
