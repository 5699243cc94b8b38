//! Using the tagconf! macro for literal value trees.
//!
//! Run with: cargo run --example macro

use serde_tagconf::{tagconf, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let user = tagconf!({
        "id": 123,
        "name": "Alice",
        "email": "alice@example.com",
        "active": true
    });

    println!("Object:\n{}", user);

    let config = tagconf!({
        "app": {
            "name": "MyApp",
            "version": "1.0.0"
        },
        "database": {
            "host": "localhost",
            "port": 5432
        },
        "features": ["auth", "logging", "metrics"],
        "matrix": [[1, 2], [3, 4]],
        "debug": true
    });

    println!("Nested structures:\n{}", config);

    let items = vec![
        tagconf!({"id": 1, "status": "active"}),
        tagconf!({"id": 2, "status": "pending"}),
        tagconf!({"id": 3, "status": "completed"}),
    ];

    let summary = tagconf!({
        "total": 3,
        "items": items
    });

    println!("Dynamic construction:\n{}", summary);

    println!("Accessing values:");
    println!("  App name: {}", config["app"]["name"].as_string()?);
    println!("  Features: {}", config["features"].as_array()?.len());
    println!("  Matrix[1][0]: {}", config["matrix"][1][0].as_integer()?);

    // nulls are dropped when written
    let sparse = tagconf!({ "kept": 1, "dropped": null });
    assert_eq!(sparse.to_text(), "<key=\"kept\" type=\"Number\" value=\"1\">\n");
    assert!(matches!(sparse["dropped"], Value::Null));

    Ok(())
}
