//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_tagconf::{from_value, to_value, Error, Value};

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Error> {
    // writes autovivify missing containers
    let mut config = Value::Null;
    config["host"] = Value::from("localhost");
    config["port"] = Value::from(8080);
    config["features"][0] = Value::from("auth");
    config["features"][2] = Value::from("metrics");
    config["limits"]["cpu"] = Value::from(1.5);

    println!("Config:\n{}", config);

    // typed reads return Result
    println!("host: {}", config["host"].as_string()?);
    println!("port: {}", config["port"].as_integer()?);
    println!("cpu:  {}", config["limits"]["cpu"].as_double()?);

    match config["host"].as_integer() {
        Err(e) => println!("as_integer on a string: {}", e),
        Ok(_) => unreachable!(),
    }

    // index 1 was never written and holds Null
    let features = config["features"].as_array()?;
    println!("features: {} slots, slot 1 is null: {}", features.len(), features[1].is_null());

    // presence checks
    println!("has number field 'port': {}", config.has_number_field("port"));
    println!("has object field 'limits': {}", config.has_object_field("limits"));
    println!("has field 'missing': {}", config.has_field("missing"));

    // strict mutation helpers do not autovivify
    match config.as_array_mut() {
        Err(e) => println!("as_array_mut on an object: {}", e),
        Ok(_) => unreachable!(),
    }
    let removed = config.as_object_mut()?.erase("limits")?;
    println!("removed limits: {}", removed.is_object());

    // clones are deep
    let mut copy = config.clone();
    copy["host"] = Value::from("example.org");
    assert_eq!(config["host"].as_string()?, "localhost");

    // structs in and out of a tree
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let mut user_value = to_value(&user)?;
    user_value["roles"][2] = Value::from("auditor");
    println!("User as Value:\n{}", user_value);

    let user_back: User = from_value(user_value)?;
    println!("roles after edit: {:?}", user_back.roles);

    Ok(())
}
