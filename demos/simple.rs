//! Basic typed configuration through the tag format.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tagconf::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    host: String,
    port: u16,
    pool_size: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct AppConfig {
    name: String,
    debug: bool,
    database: Database,
    admins: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig {
        name: "inventory".to_string(),
        debug: false,
        database: Database {
            host: "db.internal".to_string(),
            port: 5432,
            pool_size: 16,
        },
        admins: vec!["alice".to_string(), "bob".to_string()],
    };

    let text = to_string(&config)?;
    println!("Tag output:\n{}", text);

    let config_back: AppConfig = from_str(&text)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}
